//! Delivery rules per event kind.
//!
//! The relay never inspects payloads; the event name alone decides who gets
//! a copy of the frame.

use sketchboard_shared::dto::websocket::EventKind;

/// Who receives a relayed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Everyone except the sender
    OthersOnly,
    /// Everyone, the sender included
    Everyone,
    /// Not relayable from a participant
    Drop,
}

impl Delivery {
    pub fn for_event(kind: EventKind) -> Self {
        match kind {
            // The sender already drew these locally.
            EventKind::Segment | EventKind::StrokeEnd => Delivery::OthersOnly,
            // The sender's copy is an idempotent re-application.
            EventKind::Undo | EventKind::Redo => Delivery::Everyone,
            // Relay-originated events.
            EventKind::Session | EventKind::OnlineCount => Delivery::Drop,
        }
    }
}
