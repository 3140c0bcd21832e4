//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Connected participant as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub id: String,
    /// RFC 3339 connection time
    pub connected_at: String,
}

/// Response of `GET /api/participants`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceDto {
    pub online: usize,
    pub participants: Vec<ParticipantDetailDto>,
}
