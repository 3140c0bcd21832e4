//! Conversion logic between DTOs and domain entities.

use crate::domain::{BrushWidth, Color, DomainError, ParticipantId, Point, Segment, Stroke, StrokeId};
use crate::dto::websocket as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<dto::PointDto> for Point {
    type Error = DomainError;

    fn try_from(dto: dto::PointDto) -> Result<Self, Self::Error> {
        Point::try_new(dto.x, dto.y)
    }
}

impl TryFrom<dto::StrokeMessage> for Stroke {
    type Error = DomainError;

    fn try_from(dto: dto::StrokeMessage) -> Result<Self, Self::Error> {
        if dto.kind != dto::StrokeKind::Stroke {
            return Err(DomainError::NotReplicated("clear".to_string()));
        }
        let points = dto
            .points
            .into_iter()
            .map(Point::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Stroke::new(
            ParticipantId::new(dto.id)?,
            StrokeId::new(dto.stroke_id)?,
            Color::new(dto.color)?,
            BrushWidth::new(dto.width)?,
            points,
        )
    }
}

impl TryFrom<dto::SegmentMessage> for Segment {
    type Error = DomainError;

    fn try_from(dto: dto::SegmentMessage) -> Result<Self, Self::Error> {
        Ok(Segment {
            owner_id: ParticipantId::new(dto.id)?,
            stroke_id: StrokeId::new(dto.stroke_id)?,
            from: Point::try_new(dto.x1, dto.y1)?,
            to: Point::try_new(dto.x2, dto.y2)?,
            color: Color::new(dto.color)?,
            width: BrushWidth::new(dto.width)?,
        })
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Point> for dto::PointDto {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<&Stroke> for dto::StrokeMessage {
    fn from(stroke: &Stroke) -> Self {
        Self {
            id: stroke.owner_id().as_str().to_string(),
            stroke_id: stroke.stroke_id().as_str().to_string(),
            kind: dto::StrokeKind::Stroke,
            color: stroke.color().as_str().to_string(),
            width: stroke.width().value(),
            points: stroke.points().iter().copied().map(Into::into).collect(),
        }
    }
}

impl From<&Segment> for dto::SegmentMessage {
    fn from(segment: &Segment) -> Self {
        Self {
            id: segment.owner_id.as_str().to_string(),
            stroke_id: segment.stroke_id.as_str().to_string(),
            x1: segment.from.x,
            y1: segment.from.y,
            x2: segment.to.x,
            y2: segment.to.y,
            color: segment.color.as_str().to_string(),
            width: segment.width.value(),
        }
    }
}
