//! Stroke entities.

use super::{BrushWidth, Color, DomainError, ParticipantId, StrokeId};

/// A sample on the drawing surface, in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point from untrusted input, rejecting NaN and infinities.
    pub fn try_new(x: f64, y: f64) -> Result<Self, DomainError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(DomainError::InvalidPoint { x, y });
        }
        Ok(Self { x, y })
    }
}

/// A completed freehand drawing action.
///
/// Immutable once built: the point list is frozen when the gesture ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    owner_id: ParticipantId,
    stroke_id: StrokeId,
    color: Color,
    width: BrushWidth,
    points: Vec<Point>,
}

impl Stroke {
    pub fn new(
        owner_id: ParticipantId,
        stroke_id: StrokeId,
        color: Color,
        width: BrushWidth,
        points: Vec<Point>,
    ) -> Result<Self, DomainError> {
        if points.is_empty() {
            return Err(DomainError::EmptyStroke(stroke_id.into_string()));
        }
        Ok(Self {
            owner_id,
            stroke_id,
            color,
            width,
            points,
        })
    }

    pub fn owner_id(&self) -> &ParticipantId {
        &self.owner_id
    }

    pub fn stroke_id(&self) -> &StrokeId {
        &self.stroke_id
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn width(&self) -> BrushWidth {
        self.width
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether this stroke was drawn by `participant`.
    pub fn is_owned_by(&self, participant: &ParticipantId) -> bool {
        &self.owner_id == participant
    }
}

/// One incremental line piece of a stroke that is still being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub owner_id: ParticipantId,
    pub stroke_id: StrokeId,
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub width: BrushWidth,
}
