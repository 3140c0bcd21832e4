//! UseCase 層
//!
//! - `connect_participant`: 接続受付、セッション ID 採番、オンライン人数の通知
//! - `disconnect_participant`: 切断処理、オンライン人数の通知
//! - `relay_event`: 描画イベントの中継
//! - `get_presence`: 接続状況の取得（HTTP API 用）

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod get_presence;
pub mod relay_event;

mod presence;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, DisconnectError, RelayError};
pub use get_presence::GetPresenceUseCase;
pub use relay_event::RelayEventUseCase;
