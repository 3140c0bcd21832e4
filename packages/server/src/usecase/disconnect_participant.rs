//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 参加者の削除、オンライン人数の減算と残りの参加者への通知
//!
//! ### なぜこのテストが必要か
//! - 描画途中で切断しても中継済みのセグメントは巻き戻さない（リレーは状態を持たない）
//! - 人数の減算と通知がひとつのクリティカルセクションで行われることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人中 1 人の切断
//! - エッジケース：最後の参加者の切断（通知対象なし）
//! - 異常系：未接続の参加者の切断

use std::sync::Arc;

use crate::domain::{
    MessagePusher, OnlineCount, ParticipantId, ParticipantRepository, SharedOnlineCount,
};

use super::{error::DisconnectError, presence::broadcast_online_count};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ParticipantRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// オンライン人数（接続・切断で共有）
    online_count: SharedOnlineCount,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn ParticipantRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        online_count: SharedOnlineCount,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            online_count,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `id` - 切断する参加者のセッション ID
    ///
    /// # Returns
    ///
    /// * `Ok(OnlineCount)` - 切断後のオンライン人数
    /// * `Err(DisconnectError)` - 参加者が接続していない
    pub async fn execute(&self, id: &ParticipantId) -> Result<OnlineCount, DisconnectError> {
        // decrement-then-broadcast をひとつのクリティカルセクションで行う
        let mut online = self.online_count.lock().await;

        // 1. Repository から参加者を削除
        self.repository
            .remove_participant(id)
            .await
            .map_err(|_| DisconnectError::NotConnected(id.to_string()))?;

        // 2. MessagePusher から登録解除
        self.message_pusher.unregister_client(id).await;

        // 3. 人数を更新して残りの参加者に通知
        *online = online.decrement();
        broadcast_online_count(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            *online,
        )
        .await;

        Ok(*online)
    }
}
