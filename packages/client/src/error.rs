//! Error types for the drawing client.

use sketchboard_shared::domain::DomainError;
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not reach the relay, or the connection dropped
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The relay did not greet us with a session id
    #[error("Handshake rejected: {0}")]
    HandshakeRejected(String),

    /// Frame could not be encoded or decoded
    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    /// Frame decoded but carried invalid values
    #[error("Invalid data: {0}")]
    Domain(#[from] DomainError),

    /// Writing an exported image failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
