//! Headless Sketchboard drawing client with reconnection support.
//!
//! Connects to the relay, receives a session id and drives a local canvas from
//! typed commands (`down X Y`, `move X Y`, `up`, `undo`, `redo`, `clear`, ...).
//! Strokes drawn by other participants are applied as they arrive; `save PATH`
//! exports the canvas as SVG.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sketchboard-client
//! cargo run --bin sketchboard-client -- --color "#e33" --width 8
//! ```

use clap::Parser;
use sketchboard_client::{config::ClientConfig, run_client, tool::Brush};
use sketchboard_shared::{
    domain::{BrushWidth, Color, DomainError},
    logger::setup_logger,
};

#[derive(Parser, Debug)]
#[command(name = "sketchboard-client")]
#[command(about = "Headless drawing client for the Sketchboard shared canvas", long_about = None)]
struct Args {
    /// WebSocket relay URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Brush color (any CSS color)
    #[arg(short = 'c', long, default_value = "#000")]
    color: String,

    /// Brush width in pixels
    #[arg(short = 'w', long, default_value_t = 5.0)]
    width: f64,

    /// Background color, also used by the eraser
    #[arg(long, default_value = "#fff")]
    background: String,

    /// Surface width in pixels for SVG export
    #[arg(long, default_value_t = 800)]
    width_px: u32,

    /// Surface height in pixels for SVG export
    #[arg(long, default_value_t = 600)]
    height_px: u32,
}

impl Args {
    fn into_config(self) -> Result<ClientConfig, DomainError> {
        let brush = Brush::new(
            Color::new(self.color)?,
            BrushWidth::new(self.width)?,
            Color::new(self.background)?,
        );
        Ok(ClientConfig {
            url: self.url,
            brush,
            surface_width: self.width_px,
            surface_height: self.height_px,
        })
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid argument: {}", e);
            std::process::exit(2);
        }
    };

    // Run the client
    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
