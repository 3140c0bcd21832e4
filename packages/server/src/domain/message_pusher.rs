//! MessagePusher trait 定義
//!
//! 参加者へのメッセージ配送のインターフェース。
//! WebSocket などの具体的な配送手段は Infrastructure 層が提供します。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::ParticipantId;

/// 参加者ごとの送信チャンネル（pusher loop がソケットに書き出す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ配送エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}

/// MessagePusher trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 参加者の送信チャンネルを登録
    async fn register_client(&self, id: ParticipantId, sender: PusherChannel);

    /// 参加者の送信チャンネルを登録解除
    async fn unregister_client(&self, id: &ParticipantId);

    /// 複数の参加者に送信（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ParticipantId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
