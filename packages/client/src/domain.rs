//! Reconnection policy.
//!
//! Pure functions deciding what the runner does after a session fails.

use crate::error::ClientError;

/// Errors after which retrying cannot help.
///
/// A relay that does not greet us speaks another protocol, and a frame we
/// cannot even encode will fail the same way next time.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::HandshakeRejected(_) | ClientError::Protocol(_)
    )
}

/// Whether another connection attempt should be made.
///
/// `current_attempt` counts the failures so far.
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
