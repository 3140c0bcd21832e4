//! Shared library for Sketchboard.
//!
//! Holds everything both the relay and the drawing client need to agree on:
//! the stroke domain model, the WebSocket wire DTOs, logging setup and the
//! clock abstraction.

pub mod domain;
pub mod dto;
pub mod logger;
pub mod time;
