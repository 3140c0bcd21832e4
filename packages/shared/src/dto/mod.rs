//! Data Transfer Objects (DTOs) for Sketchboard.
//!
//! DTOs are organized by protocol:
//! - `websocket`: event messages exchanged over the relay
//! - `http`: HTTP API response DTOs
//!
//! `conversion` maps the WebSocket DTOs to and from the domain entities.

pub mod conversion;
pub mod http;
pub mod websocket;
