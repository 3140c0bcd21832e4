//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    config::ClientConfig,
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::run_client_session,
    ui::spawn_line_reader,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the drawing client with reconnection logic.
///
/// Every reconnect starts a fresh session: the relay assigns a new id and the
/// canvas starts empty, since nothing replays history to new participants.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let mut input_rx = spawn_line_reader();
    let mut brush = config.brush.clone();
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            config.url,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&config, &mut brush, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // The user left, don't reconnect
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Session ended: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    if !should_exit_immediately(&e) {
                        tracing::error!(
                            "Failed to reconnect after {} attempts. Exiting.",
                            MAX_RECONNECT_ATTEMPTS
                        );
                    }
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds with a fresh session... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
