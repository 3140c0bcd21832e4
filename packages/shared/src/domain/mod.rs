//! Domain layer shared by the relay and the drawing client.
//!
//! - `value_object`: identifiers and rendering attributes with validation
//! - `entity`: points, strokes and segments
//! - `error`: domain validation errors

pub mod entity;
pub mod error;
pub mod value_object;

pub use entity::{Point, Segment, Stroke};
pub use error::DomainError;
pub use value_object::{BrushWidth, Color, ParticipantId, StrokeId};
