//! Stroke id generation.

use sketchboard_shared::domain::{ParticipantId, StrokeId};

/// Source of fresh stroke ids for one session.
///
/// Implementations must never hand out the same id twice.
pub trait StrokeIdGenerator: Send {
    fn next_id(&mut self) -> StrokeId;
}

/// Random UUID v4 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidStrokeIdGenerator;

impl StrokeIdGenerator for UuidStrokeIdGenerator {
    fn next_id(&mut self) -> StrokeId {
        StrokeId::generate()
    }
}

/// Monotonic counter keyed by the session id: `<session>-0`, `<session>-1`, ...
///
/// Unique as long as session ids are, which the relay guarantees.
#[derive(Debug, Clone)]
pub struct SequentialStrokeIdGenerator {
    session: ParticipantId,
    next: u64,
}

impl SequentialStrokeIdGenerator {
    pub fn new(session: ParticipantId) -> Self {
        Self { session, next: 0 }
    }
}

impl StrokeIdGenerator for SequentialStrokeIdGenerator {
    fn next_id(&mut self) -> StrokeId {
        let id = StrokeId::scoped(&self.session, self.next);
        self.next += 1;
        id
    }
}
