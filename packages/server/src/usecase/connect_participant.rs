//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - セッション ID の採番、参加者の登録、オンライン人数のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - オンライン人数は接続・切断をまたいで共有される唯一の可変状態
//! - 新しい参加者自身を含む全員に最新の人数が届くことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：1 人目、2 人目の接続
//! - 並行接続：同時に接続しても人数の通知順が単調に増える

use std::sync::Arc;

use sketchboard_shared::time::Clock;

use crate::domain::{
    MessagePusher, Participant, ParticipantId, ParticipantRepository, PusherChannel,
    SharedOnlineCount, Timestamp,
};

use super::{error::ConnectError, presence::broadcast_online_count};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ParticipantRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// オンライン人数（接続・切断で共有）
    online_count: SharedOnlineCount,
    /// 接続時刻の取得元
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn ParticipantRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        online_count: SharedOnlineCount,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            online_count,
            clock,
        }
    }

    /// 参加者接続を実行
    ///
    /// セッション ID を採番して参加者を登録し、オンライン人数を
    /// 新しい参加者を含む全員にブロードキャストする。
    ///
    /// # Arguments
    ///
    /// * `sender` - 参加者へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 接続成功（採番されたセッション ID と接続時刻）
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(&self, sender: PusherChannel) -> Result<Participant, ConnectError> {
        let participant = Participant::new(
            ParticipantId::generate(),
            Timestamp::new(self.clock.now_millis()),
        );

        // increment-then-broadcast をひとつのクリティカルセクションで行う
        let mut online = self.online_count.lock().await;

        // 1. Repository に参加者を追加
        self.repository
            .add_participant(participant.clone())
            .await
            .map_err(|e| ConnectError::RegistrationFailed(e.to_string()))?;

        // 2. MessagePusher に送信チャンネルを登録
        self.message_pusher
            .register_client(participant.id.clone(), sender)
            .await;

        // 3. 人数を更新して全員に通知
        *online = online.increment();
        broadcast_online_count(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            *online,
        )
        .await;

        Ok(participant)
    }
}
