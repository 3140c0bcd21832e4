//! Drawing client for Sketchboard.
//!
//! The core is the [`store::StrokeStore`] (visible strokes plus per-participant
//! undo/redo) and the [`sync::SyncEngine`] that keeps it in step with the other
//! participants through the relay. The rest is the headless command-line
//! front end: session handling, reconnection and SVG export.

pub mod command;
pub mod config;
pub mod error;
pub mod id;
pub mod render;
pub mod store;
pub mod sync;
pub mod tool;

mod domain;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
pub use session::ChannelTransport;
