//! Domain-level errors for the relay.

use thiserror::Error;

/// Participant store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Participant '{0}' is already registered")]
    DuplicateParticipant(String),

    #[error("Participant '{0}' not found")]
    ParticipantNotFound(String),
}
