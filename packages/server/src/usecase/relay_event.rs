//! UseCase: 描画イベントの中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayEventUseCase::execute() メソッド
//! - イベント種別ごとの配送先（送信者を除く / 送信者を含む / 中継しない）
//!
//! ### なぜこのテストが必要か
//! - リレーはペイロードを解釈せず、`event` タグだけで配送先を決める
//! - undo / redo は送信者にも返り、クライアント側で冪等に再適用される
//!
//! ### どのような状況を想定しているか
//! - 正常系：segment, stroke-end, undo, redo
//! - 異常系：タグのないフレーム、クライアントからの online-count

use std::sync::Arc;

use sketchboard_shared::dto::websocket::{EventHeader, EventKind};

use crate::domain::{Delivery, MessagePusher, ParticipantId, ParticipantRepository};

use super::error::RelayError;

/// イベント中継のユースケース
pub struct RelayEventUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ParticipantRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayEventUseCase {
    /// 新しい RelayEventUseCase を作成
    pub fn new(
        repository: Arc<dyn ParticipantRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// イベントを中継
    ///
    /// # Arguments
    ///
    /// * `from` - フレームを送ってきた参加者のセッション ID
    /// * `frame` - 受信したテキストフレーム（そのまま転送する）
    ///
    /// # Returns
    ///
    /// * `Ok((EventKind, Vec<ParticipantId>))` - イベント種別と配送先
    /// * `Err(RelayError)` - 中継しなかった
    pub async fn execute(
        &self,
        from: &ParticipantId,
        frame: &str,
    ) -> Result<(EventKind, Vec<ParticipantId>), RelayError> {
        let kind = EventHeader::peek(frame).map_err(|e| RelayError::UnknownEvent(e.to_string()))?;

        let all = self.repository.get_all_participant_ids().await;
        let targets: Vec<ParticipantId> = match Delivery::for_event(kind) {
            Delivery::OthersOnly => all.into_iter().filter(|id| id != from).collect(),
            Delivery::Everyone => all,
            Delivery::Drop => return Err(RelayError::NotRelayable(kind)),
        };

        tracing::debug!(
            "Relaying {:?} from '{}' to {} participant(s)",
            kind,
            from,
            targets.len()
        );

        self.message_pusher
            .broadcast(targets.clone(), frame)
            .await
            .map_err(|e| RelayError::BroadcastFailed(e.to_string()))?;

        Ok((kind, targets))
    }
}
