//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 参加者ごとの `UnboundedSender` を管理
//! - 参加者へのフレーム配送（broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、フレームの送信に使用します。
//! 中継するフレームはパースせず、受信したテキストをそのまま配送します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, ParticipantId, PusherChannel};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中の参加者の WebSocket sender
    ///
    /// Key: participant id
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<ParticipantId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ParticipantId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, id: ParticipantId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Participant '{}' registered to MessagePusher", id);
        clients.insert(id, sender);
    }

    async fn unregister_client(&self, id: &ParticipantId) {
        let mut clients = self.clients.lock().await;
        clients.remove(id);
        tracing::debug!("Participant '{}' unregistered from MessagePusher", id);
    }

    async fn broadcast(
        &self,
        targets: Vec<ParticipantId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容（best-effort）
                Some(sender) => {
                    if let Err(e) = sender.send(content.to_string()) {
                        tracing::warn!("Failed to push frame to participant '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::warn!(
                        "Participant '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - broadcast: 複数参加者への送信（部分失敗の許容）
    // - register / unregister 後の配送可否
    // ========================================

    fn create_test_pusher() -> (
        WebSocketMessagePusher,
        Arc<Mutex<HashMap<ParticipantId, PusherChannel>>>,
    ) {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = WebSocketMessagePusher::new(clients.clone());
        (pusher, clients)
    }

    fn pid(id: &str) -> ParticipantId {
        ParticipantId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: 一部の参加者が存在しなくてもブロードキャストは成功する
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(pid("alice"), tx).await;

        // when (操作):
        let result = pusher
            .broadcast(vec![pid("alice"), pid("ghost")], "frame")
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("frame".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_closed_receiver() {
        // テスト項目: 受信側が閉じた参加者がいても他の参加者には届く
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx_closed, rx_closed) = mpsc::unbounded_channel();
        let (tx_open, mut rx_open) = mpsc::unbounded_channel();
        drop(rx_closed);
        pusher.register_client(pid("alice"), tx_closed).await;
        pusher.register_client(pid("bob"), tx_open).await;

        // when (操作):
        let result = pusher.broadcast(vec![pid("alice"), pid("bob")], "frame").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx_open.recv().await, Some("frame".to_string()));
    }

    #[tokio::test]
    async fn test_unregister_removes_client() {
        // テスト項目: 登録解除した参加者には送信できない
        // given (前提条件):
        let (pusher, clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(pid("alice"), tx).await;

        // when (操作):
        pusher.unregister_client(&pid("alice")).await;
        pusher.broadcast(vec![pid("alice")], "x").await.unwrap();

        // then (期待する結果):
        assert!(clients.lock().await.is_empty());
        assert!(rx.try_recv().is_err());
    }
}
