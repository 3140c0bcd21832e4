//! UseCase: 接続状況の取得

use std::sync::Arc;

use crate::domain::{OnlineCount, Participant, ParticipantRepository, SharedOnlineCount};

/// 接続状況取得のユースケース
pub struct GetPresenceUseCase {
    repository: Arc<dyn ParticipantRepository>,
    online_count: SharedOnlineCount,
}

impl GetPresenceUseCase {
    pub fn new(repository: Arc<dyn ParticipantRepository>, online_count: SharedOnlineCount) -> Self {
        Self {
            repository,
            online_count,
        }
    }

    /// オンライン人数と参加者リスト（接続順）を返す
    pub async fn execute(&self) -> (OnlineCount, Vec<Participant>) {
        // 人数と参加者リストが食い違わないよう、人数のロックを保持したまま読む
        let online = self.online_count.lock().await;
        let participants = self.repository.get_participants().await;
        (*online, participants)
    }
}
