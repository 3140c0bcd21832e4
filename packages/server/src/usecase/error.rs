//! UseCase 層のエラー定義

use sketchboard_shared::dto::websocket::EventKind;
use thiserror::Error;

/// 参加者接続エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Failed to register participant: {0}")]
    RegistrationFailed(String),
}

/// 参加者切断エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("Participant '{0}' is not connected")]
    NotConnected(String),
}

/// イベント中継エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// `event` タグを読み取れないフレーム
    #[error("Frame has no recognizable event tag: {0}")]
    UnknownEvent(String),

    /// 参加者から中継できないイベント（リレー発のイベント）
    #[error("Event {0:?} is not relayable from a participant")]
    NotRelayable(EventKind),

    #[error("Broadcast failed: {0}")]
    BroadcastFailed(String),
}
