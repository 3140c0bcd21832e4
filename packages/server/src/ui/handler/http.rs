//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use sketchboard_shared::{
    dto::http::{ParticipantDetailDto, PresenceDto},
    time::timestamp_to_rfc3339,
};

use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Online count and connected participants
pub async fn get_participants(State(state): State<Arc<AppState>>) -> Json<PresenceDto> {
    let (online, participants) = state.get_presence_usecase.execute().await;

    // Domain Model から DTO への変換
    let participants = participants
        .into_iter()
        .map(|p| ParticipantDetailDto {
            id: p.id.into_string(),
            connected_at: timestamp_to_rfc3339(p.connected_at.value()),
        })
        .collect();

    Json(PresenceDto {
        online: online.value(),
        participants,
    })
}
