//! Online count broadcast shared by the connect and disconnect use cases.

use sketchboard_shared::dto::websocket::WireMessage;

use crate::domain::{MessagePusher, OnlineCount, ParticipantRepository};

/// Send `online-count` to every connected participant.
///
/// Callers hold the online count guard while calling this.
pub(crate) async fn broadcast_online_count(
    repository: &dyn ParticipantRepository,
    message_pusher: &dyn MessagePusher,
    count: OnlineCount,
) {
    let frame = match WireMessage::OnlineCount(count.value()).to_json() {
        Ok(frame) => frame,
        Err(e) => {
            tracing::error!("Failed to serialize online-count: {}", e);
            return;
        }
    };

    let targets = repository.get_all_participant_ids().await;
    if let Err(e) = message_pusher.broadcast(targets, &frame).await {
        tracing::warn!("Failed to broadcast online-count: {}", e);
    } else {
        tracing::info!("Broadcasted online-count {}", count.value());
    }
}
