//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use sketchboard_shared::dto::websocket::{SessionMessage, WireMessage};
use tokio::sync::mpsc;

use crate::{
    domain::ParticipantId,
    ui::state::AppState,
    usecase::RelayError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound flow: frames relayed from other participants
/// (and relay events such as `online-count`) are written to this participant's socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this participant to receive relayed frames
    let (tx, rx) = mpsc::unbounded_channel();

    // Register the participant; the new online-count is queued on rx
    let participant = match state.connect_participant_usecase.execute(tx).await {
        Ok(participant) => participant,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return;
        }
    };
    let participant_id = participant.id;
    tracing::info!("Participant '{}' connected", participant_id);

    // Tell the participant its session id before anything else is flushed
    let greeting = WireMessage::Session(SessionMessage {
        id: participant_id.as_str().to_string(),
    });
    let greeting_sent = match greeting.to_json() {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to serialize session greeting: {}", e);
            false
        }
    };

    if greeting_sent {
        let state_clone = state.clone();
        let participant_id_clone = participant_id.clone();

        // Spawn a task to receive frames from this participant
        let mut recv_task = tokio::spawn(async move {
            while let Some(msg) = receiver.next().await {
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::warn!("WebSocket error from '{}': {}", participant_id_clone, e);
                        break;
                    }
                };

                match msg {
                    Message::Text(text) => {
                        relay_frame(&state_clone, &participant_id_clone, text.as_str()).await;
                    }
                    Message::Binary(data) => {
                        tracing::warn!(
                            "Ignoring {} bytes of binary data from '{}'",
                            data.len(),
                            participant_id_clone
                        );
                    }
                    Message::Close(_) => {
                        tracing::info!("Participant '{}' requested close", participant_id_clone);
                        break;
                    }
                    // Ping/pong is handled automatically by the WebSocket protocol
                    _ => {}
                }
            }
        });

        // Spawn a task to push relayed frames to this participant
        let mut send_task = pusher_loop(rx, sender);

        // If any one of the tasks completes, abort the other
        tokio::select! {
            _ = &mut recv_task => send_task.abort(),
            _ = &mut send_task => recv_task.abort(),
        };
    } else {
        tracing::warn!("Failed to greet participant '{}'", participant_id);
    }

    // In-flight strokes are not rolled back: the relay holds no stroke state
    match state
        .disconnect_participant_usecase
        .execute(&participant_id)
        .await
    {
        Ok(remaining) => tracing::info!(
            "Participant '{}' disconnected ({} online)",
            participant_id,
            remaining.value()
        ),
        Err(e) => tracing::warn!("Failed to disconnect participant: {}", e),
    }
}

async fn relay_frame(state: &AppState, from: &ParticipantId, text: &str) {
    match state.relay_event_usecase.execute(from, text).await {
        Ok((kind, targets)) => {
            tracing::debug!(
                "Relayed {:?} from '{}' to {} participant(s)",
                kind,
                from,
                targets.len()
            );
        }
        Err(RelayError::UnknownEvent(e)) => {
            tracing::warn!("Dropping untagged frame from '{}': {}", from, e);
        }
        Err(e) => {
            tracing::warn!("Dropping frame from '{}': {}", from, e);
        }
    }
}
