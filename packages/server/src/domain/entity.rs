//! Entities held by the relay.

use super::{ParticipantId, Timestamp};

/// A connected participant session
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub connected_at: Timestamp,
}

impl Participant {
    pub fn new(id: ParticipantId, connected_at: Timestamp) -> Self {
        Self { id, connected_at }
    }
}
