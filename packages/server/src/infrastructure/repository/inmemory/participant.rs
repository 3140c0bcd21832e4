//! InMemory Participant Repository 実装
//!
//! ドメイン層が定義する ParticipantRepository trait の具体的な実装。
//! 接続順を保つため Vec をインメモリストアとして使用します。
//! サーバー再起動をまたいだ永続化は行いません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Participant, ParticipantId, ParticipantRepository, RepositoryError};

/// インメモリ Participant Repository 実装
pub struct InMemoryParticipantRepository {
    /// 接続中の参加者（接続順）
    participants: Arc<Mutex<Vec<Participant>>>,
}

impl InMemoryParticipantRepository {
    /// 新しい InMemoryParticipantRepository を作成
    pub fn new(participants: Arc<Mutex<Vec<Participant>>>) -> Self {
        Self { participants }
    }
}

impl Default for InMemoryParticipantRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Vec::new())))
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn add_participant(&self, participant: Participant) -> Result<(), RepositoryError> {
        let mut participants = self.participants.lock().await;
        if participants.iter().any(|p| p.id == participant.id) {
            return Err(RepositoryError::DuplicateParticipant(
                participant.id.into_string(),
            ));
        }
        participants.push(participant);
        Ok(())
    }

    async fn remove_participant(&self, id: &ParticipantId) -> Result<(), RepositoryError> {
        let mut participants = self.participants.lock().await;
        let position = participants
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| RepositoryError::ParticipantNotFound(id.to_string()))?;
        participants.remove(position);
        Ok(())
    }

    async fn get_all_participant_ids(&self) -> Vec<ParticipantId> {
        let participants = self.participants.lock().await;
        participants.iter().map(|p| p.id.clone()).collect()
    }

    async fn count_participants(&self) -> usize {
        self.participants.lock().await.len()
    }

    async fn get_participants(&self) -> Vec<Participant> {
        self.participants.lock().await.clone()
    }
}
