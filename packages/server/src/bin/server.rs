//! Sketchboard stroke relay.
//!
//! Forwards drawing events between connected participants and broadcasts the
//! live participant count. Holds no strokes.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sketchboard-server
//! cargo run --bin sketchboard-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use sketchboard_server::bootstrap::build_in_memory_server;
use sketchboard_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "sketchboard-server")]
#[command(about = "Broadcast relay for the Sketchboard shared canvas", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let server = build_in_memory_server(Arc::new(SystemClock));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
