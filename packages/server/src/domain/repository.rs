//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! リレーが保持するのは接続中の参加者だけで、ストロークは保持しません。

use async_trait::async_trait;

use super::{Participant, ParticipantId, RepositoryError};

/// Participant Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// 参加者を追加
    async fn add_participant(&self, participant: Participant) -> Result<(), RepositoryError>;

    /// 参加者を削除
    async fn remove_participant(&self, id: &ParticipantId) -> Result<(), RepositoryError>;

    /// 接続中の全ての参加者 ID を取得（接続順）
    async fn get_all_participant_ids(&self) -> Vec<ParticipantId>;

    /// 接続中の参加者数を取得
    async fn count_participants(&self) -> usize;

    /// 参加者リストを取得（接続順）
    async fn get_participants(&self) -> Vec<Participant>;
}
