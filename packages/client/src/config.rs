//! Client configuration.

use crate::tool::Brush;

/// Everything a client session needs to start, resolved from the command line
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint of the relay
    pub url: String,
    /// Initial tool, color and width
    pub brush: Brush,
    /// Surface size in pixels, used for SVG export
    pub surface_width: u32,
    pub surface_height: u32,
}
