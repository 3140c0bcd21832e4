//! Domain validation errors.

use thiserror::Error;

/// Errors raised while building domain values from untrusted input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Participant ID was empty or blank
    #[error("Participant ID must not be empty")]
    EmptyParticipantId,

    /// Stroke ID was empty or blank
    #[error("Stroke ID must not be empty")]
    EmptyStrokeId,

    /// Color string was empty or blank
    #[error("Color must not be empty")]
    EmptyColor,

    /// Width was zero, negative or not a finite number
    #[error("Brush width must be a positive finite number (got {0})")]
    InvalidWidth(f64),

    /// Coordinate was NaN or infinite
    #[error("Point coordinates must be finite (got {x}, {y})")]
    InvalidPoint { x: f64, y: f64 },

    /// Stroke carried no points
    #[error("Stroke '{0}' has no points")]
    EmptyStroke(String),

    /// Entry kind that only exists in local history
    #[error("Entry of kind '{0}' is local-only and cannot be replicated")]
    NotReplicated(String),
}
