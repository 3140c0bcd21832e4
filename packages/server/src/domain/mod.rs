//! ドメイン層
//!
//! リレーサーバーのドメインモデルと、インフラ層が実装すべき trait を定義します。
//!
//! - `entity`: 接続中の参加者
//! - `value_object`: タイムスタンプ、オンライン人数
//! - `routing`: イベント種別ごとの配送先ルール
//! - `repository`: 参加者ストアの trait
//! - `message_pusher`: メッセージ配送の trait

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod routing;
pub mod value_object;

pub use entity::Participant;
pub use error::RepositoryError;
pub use message_pusher::{MessagePushError, MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::ParticipantRepository;
pub use routing::Delivery;
pub use value_object::{OnlineCount, SharedOnlineCount, Timestamp};

pub use sketchboard_shared::domain::ParticipantId;
