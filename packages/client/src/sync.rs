//! Stroke synchronization engine.
//!
//! Turns local input into store operations, paints the result and broadcasts
//! it; applies inbound relay messages to the store. Local ink is rendered
//! before it is sent, so the originator never waits for a round trip.
//!
//! Delivery is best-effort: send failures are logged and the local state is
//! kept, frames that cannot be decoded are dropped.

use std::collections::HashSet;

use sketchboard_shared::{
    domain::{DomainError, ParticipantId, Point, Segment, Stroke, StrokeId},
    dto::websocket::{RedoMessage, SegmentMessage, StrokeMessage, UndoMessage, WireMessage},
};

use crate::{
    error::ClientError,
    render::{RenderSink, redraw},
    store::{HistoryStep, StrokeStore},
    tool::Brush,
};

/// Outbound half of the connection to the relay
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn send(&mut self, message: WireMessage) -> Result<(), ClientError>;
}

/// Input produced by the drawing surface and the command line
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Undo,
    Redo,
    Clear,
}

/// Effect of one inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundOutcome {
    /// Painted on top of the surface, or already painted by its segments
    Drawn,
    /// Visible set changed and the surface was repainted
    Redrawn,
    /// Echo, duplicate or already applied
    Ignored,
    /// Relay reported the number of connected participants
    OnlineCount(usize),
    /// Frame could not be decoded
    Rejected,
}

pub struct SyncEngine<R: RenderSink, T: Transport> {
    store: StrokeStore,
    sink: R,
    transport: T,
    brush: Brush,
    online_count: Option<usize>,
    /// Remote strokes whose segments are on the surface since the last redraw
    painted_remote: HashSet<StrokeId>,
}

impl<R: RenderSink, T: Transport> SyncEngine<R, T> {
    pub fn new(store: StrokeStore, sink: R, transport: T, brush: Brush) -> Self {
        Self {
            store,
            sink,
            transport,
            brush,
            online_count: None,
            painted_remote: HashSet::new(),
        }
    }

    pub fn local_id(&self) -> &ParticipantId {
        self.store.local_id()
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }

    /// Last participant count reported by the relay
    pub fn online_count(&self) -> Option<usize> {
        self.online_count
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(point) => {
                self.store.begin_stroke(
                    point,
                    self.brush.stroke_color().clone(),
                    self.brush.width(),
                );
            }
            InputEvent::PointerMove(point) => self.extend_stroke(point),
            InputEvent::PointerUp => self.end_stroke(),
            InputEvent::Undo => self.undo(),
            InputEvent::Redo => self.redo(),
            InputEvent::Clear => self.clear_local(),
        }
    }

    fn extend_stroke(&mut self, point: Point) {
        let Some(segment) = self.store.extend_stroke(point) else {
            return;
        };
        self.sink
            .draw_line(segment.from, segment.to, &segment.color, segment.width);
        self.send(WireMessage::Segment(SegmentMessage::from(&segment)));
    }

    fn end_stroke(&mut self) {
        if let Some(stroke) = self.store.end_stroke() {
            self.send(WireMessage::StrokeEnd(StrokeMessage::from(&stroke)));
        }
    }

    fn undo(&mut self) {
        let Some(step) = self.store.undo() else {
            return;
        };
        self.redraw();
        if let HistoryStep::Stroke(stroke) = step {
            self.send(WireMessage::Undo(UndoMessage {
                user_id: self.local_id().as_str().to_string(),
                stroke_id: stroke.stroke_id().as_str().to_string(),
            }));
        }
    }

    fn redo(&mut self) {
        let Some(step) = self.store.redo() else {
            return;
        };
        self.redraw();
        if let HistoryStep::Stroke(stroke) = step {
            self.send(WireMessage::Redo(RedoMessage {
                user_id: self.local_id().as_str().to_string(),
                stroke: StrokeMessage::from(&stroke),
            }));
        }
    }

    fn clear_local(&mut self) {
        if self.store.clear_local() {
            self.redraw();
        }
    }

    /// Decode and apply one text frame from the relay.
    pub fn apply_inbound_text(&mut self, text: &str) -> InboundOutcome {
        match WireMessage::from_json(text) {
            Ok(message) => self.apply_inbound(message),
            Err(e) => {
                tracing::warn!("Dropping undecodable frame: {}", e);
                InboundOutcome::Rejected
            }
        }
    }

    pub fn apply_inbound(&mut self, message: WireMessage) -> InboundOutcome {
        let kind = message.kind();
        match self.apply(message) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Dropping invalid {:?} message: {}", kind, e);
                InboundOutcome::Rejected
            }
        }
    }

    fn apply(&mut self, message: WireMessage) -> Result<InboundOutcome, DomainError> {
        // Authoritative state only changes for messages from someone else
        let from_self = message.is_from(self.local_id().as_str());

        let outcome = match message {
            WireMessage::Segment(msg) => {
                if from_self {
                    return Ok(InboundOutcome::Ignored);
                }
                let segment = Segment::try_from(msg)?;
                self.sink
                    .draw_line(segment.from, segment.to, &segment.color, segment.width);
                self.painted_remote.insert(segment.stroke_id);
                InboundOutcome::Drawn
            }
            WireMessage::StrokeEnd(msg) => {
                if from_self {
                    return Ok(InboundOutcome::Ignored);
                }
                let stroke = Stroke::try_from(msg)?;
                let painted = self.painted_remote.remove(stroke.stroke_id());
                if self.store.apply_remote_stroke_end(stroke.clone()) {
                    // Segments missed or wiped by a redraw
                    if !painted {
                        self.sink
                            .draw_polyline(stroke.points(), stroke.color(), stroke.width());
                    }
                    InboundOutcome::Drawn
                } else {
                    InboundOutcome::Ignored
                }
            }
            WireMessage::Undo(msg) => {
                let origin = ParticipantId::new(msg.user_id)?;
                let stroke_id = StrokeId::new(msg.stroke_id)?;
                if self.store.apply_remote_undo(&origin, &stroke_id) {
                    self.redraw();
                    InboundOutcome::Redrawn
                } else {
                    InboundOutcome::Ignored
                }
            }
            WireMessage::Redo(msg) => {
                let origin = ParticipantId::new(msg.user_id)?;
                let stroke = Stroke::try_from(msg.stroke)?;
                if self.store.apply_remote_redo(&origin, stroke) {
                    self.redraw();
                    InboundOutcome::Redrawn
                } else {
                    InboundOutcome::Ignored
                }
            }
            WireMessage::OnlineCount(count) => {
                self.online_count = Some(count);
                InboundOutcome::OnlineCount(count)
            }
            WireMessage::Session(msg) => {
                tracing::warn!("Ignoring session greeting '{}' mid-session", msg.id);
                InboundOutcome::Ignored
            }
        };
        Ok(outcome)
    }

    fn redraw(&mut self) {
        self.painted_remote.clear();
        redraw(
            &mut self.sink,
            self.store.visible_strokes(),
            self.store.in_progress(),
        );
    }

    fn send(&mut self, message: WireMessage) {
        let kind = message.kind();
        if let Err(e) = self.transport.send(message) {
            tracing::warn!("Failed to send {:?}: {}", kind, e);
        }
    }
}
