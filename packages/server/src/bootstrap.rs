//! Composition root: wires repositories, pushers and use cases into a Server.

use std::{collections::HashMap, sync::Arc};

use sketchboard_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    domain::OnlineCount,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryParticipantRepository,
    },
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetPresenceUseCase,
        RelayEventUseCase,
    },
};

/// Build a relay server backed by in-memory state.
///
/// Dependencies are initialized in order:
/// 1. Repository
/// 2. MessagePusher
/// 3. Online count
/// 4. UseCases
/// 5. Server
pub fn build_in_memory_server(clock: Arc<dyn Clock>) -> Server {
    // 1. Create Repository (in-memory participant store)
    let repository = Arc::new(InMemoryParticipantRepository::default());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));

    // 3. Shared online count
    let online_count = Arc::new(Mutex::new(OnlineCount::default()));

    // 4. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        online_count.clone(),
        clock,
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        online_count.clone(),
    ));
    let relay_event_usecase = Arc::new(RelayEventUseCase::new(
        repository.clone(),
        message_pusher,
    ));
    let get_presence_usecase = Arc::new(GetPresenceUseCase::new(repository, online_count));

    // 5. Create the server
    Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        relay_event_usecase,
        get_presence_usecase,
    )
}
