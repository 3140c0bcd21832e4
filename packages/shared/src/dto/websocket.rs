//! WebSocket event messages.
//!
//! Every frame is a JSON text frame shaped as an event envelope:
//!
//! ```text
//! {"event": "segment",      "data": {"id", "strokeId", "x1", "y1", "x2", "y2", "color", "width"}}
//! {"event": "stroke-end",   "data": {"id", "strokeId", "type": "stroke", "color", "width", "points": [{"x", "y"}]}}
//! {"event": "undo",         "data": {"userId", "strokeId"}}
//! {"event": "redo",         "data": {"userId", "stroke": {...}}}
//! {"event": "online-count", "data": 3}
//! {"event": "session",      "data": {"id"}}
//! ```

use serde::{Deserialize, Serialize};

/// Event name carried in the `event` field of every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// Relay → new participant: the session id assigned to it
    Session,
    /// Incremental line piece of an in-progress stroke
    Segment,
    /// Completed stroke
    StrokeEnd,
    /// Owner undid one of its strokes
    Undo,
    /// Owner redid one of its strokes
    Redo,
    /// Relay → all: live participant count
    OnlineCount,
}

/// Routing header: the `event` field only, `data` is left untouched
#[derive(Debug, Deserialize)]
pub struct EventHeader {
    pub event: EventKind,
}

impl EventHeader {
    /// Read the event kind of a raw frame without decoding its payload.
    pub fn peek(text: &str) -> Result<EventKind, serde_json::Error> {
        serde_json::from_str::<EventHeader>(text).map(|header| header.event)
    }
}

/// Point on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointDto {
    pub x: f64,
    pub y: f64,
}

/// Kind tag of a stroke object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    Stroke,
    /// Local history marker; never valid on the wire
    Clear,
}

/// `session` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMessage {
    pub id: String,
}

/// `segment` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMessage {
    /// Owner (session id of the drawing participant)
    pub id: String,
    pub stroke_id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: String,
    pub width: f64,
}

/// Full stroke object, the `stroke-end` payload and the `stroke` of a redo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeMessage {
    /// Owner (session id of the drawing participant)
    pub id: String,
    pub stroke_id: String,
    #[serde(rename = "type")]
    pub kind: StrokeKind,
    pub color: String,
    pub width: f64,
    pub points: Vec<PointDto>,
}

/// `undo` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoMessage {
    pub user_id: String,
    pub stroke_id: String,
}

/// `redo` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedoMessage {
    pub user_id: String,
    pub stroke: StrokeMessage,
}

/// Event envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum WireMessage {
    Session(SessionMessage),
    Segment(SegmentMessage),
    StrokeEnd(StrokeMessage),
    Undo(UndoMessage),
    Redo(RedoMessage),
    OnlineCount(usize),
}

impl WireMessage {
    pub fn kind(&self) -> EventKind {
        match self {
            WireMessage::Session(_) => EventKind::Session,
            WireMessage::Segment(_) => EventKind::Segment,
            WireMessage::StrokeEnd(_) => EventKind::StrokeEnd,
            WireMessage::Undo(_) => EventKind::Undo,
            WireMessage::Redo(_) => EventKind::Redo,
            WireMessage::OnlineCount(_) => EventKind::OnlineCount,
        }
    }

    /// Origin tag of the message: the participant whose action produced it.
    ///
    /// Relay-originated events (`session`, `online-count`) have no origin.
    pub fn origin(&self) -> Option<&str> {
        match self {
            WireMessage::Segment(msg) => Some(&msg.id),
            WireMessage::StrokeEnd(msg) => Some(&msg.id),
            WireMessage::Undo(msg) => Some(&msg.user_id),
            WireMessage::Redo(msg) => Some(&msg.user_id),
            WireMessage::Session(_) | WireMessage::OnlineCount(_) => None,
        }
    }

    /// Whether the message originated from `participant_id`.
    pub fn is_from(&self, participant_id: &str) -> bool {
        self.origin() == Some(participant_id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke_message() -> StrokeMessage {
        StrokeMessage {
            id: "alice".to_string(),
            stroke_id: "s-1".to_string(),
            kind: StrokeKind::Stroke,
            color: "#000".to_string(),
            width: 5.0,
            points: vec![PointDto { x: 10.0, y: 10.0 }, PointDto { x: 20.0, y: 20.0 }],
        }
    }

    #[test]
    fn test_stroke_end_wire_format() {
        // テスト項目: stroke-end が event/data の封筒と camelCase のフィールドで直列化される
        // given (前提条件):
        let msg = WireMessage::StrokeEnd(stroke_message());

        // when (操作):
        let value: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(value["event"], "stroke-end");
        assert_eq!(value["data"]["id"], "alice");
        assert_eq!(value["data"]["strokeId"], "s-1");
        assert_eq!(value["data"]["type"], "stroke");
        assert_eq!(value["data"]["points"][1]["x"], 20.0);
    }

    #[test]
    fn test_online_count_wire_format() {
        // テスト項目: online-count の data は整数そのものになる
        // given (前提条件):
        let msg = WireMessage::OnlineCount(3);

        // when (操作):
        let json = msg.to_json().unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"event":"online-count","data":3}"#);
    }

    #[test]
    fn test_parse_undo_from_raw_json() {
        // テスト項目: 手書きの undo JSON がパースできる
        // given (前提条件):
        let text = r#"{"event":"undo","data":{"userId":"bob","strokeId":"s-9"}}"#;

        // when (操作):
        let msg = WireMessage::from_json(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            msg,
            WireMessage::Undo(UndoMessage {
                user_id: "bob".to_string(),
                stroke_id: "s-9".to_string(),
            })
        );
        assert_eq!(msg.origin(), Some("bob"));
    }

    #[test]
    fn test_peek_reads_event_without_decoding_payload() {
        // テスト項目: ペイロードの形が不正でもイベント種別だけは読み取れる
        // given (前提条件):
        let text = r#"{"event":"segment","data":{"anything":[1,2,3]}}"#;

        // when (操作):
        let kind = EventHeader::peek(text);

        // then (期待する結果):
        assert_eq!(kind.unwrap(), EventKind::Segment);
        assert!(WireMessage::from_json(text).is_err());
    }

    #[test]
    fn test_peek_rejects_unknown_event() {
        // テスト項目: 未知のイベント名はエラーになる
        // given (前提条件):
        let text = r#"{"event":"clear","data":{}}"#;

        // when (操作):
        let kind = EventHeader::peek(text);

        // then (期待する結果):
        assert!(kind.is_err());
    }

    #[test]
    fn test_relay_events_have_no_origin() {
        // テスト項目: リレー発のイベントは送信元タグを持たない
        // given (前提条件):
        let count = WireMessage::OnlineCount(1);
        let session = WireMessage::Session(SessionMessage {
            id: "alice".to_string(),
        });

        // when (操作):

        // then (期待する結果):
        assert_eq!(count.origin(), None);
        assert_eq!(session.origin(), None);
        assert!(!session.is_from("alice"));
    }
}
