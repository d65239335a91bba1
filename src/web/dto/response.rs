//! Response DTOs for the room API.

use serde::Serialize;

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new acknowledgement.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Room creation response.
#[derive(Debug, Serialize)]
pub struct CreateRoomResponse {
    /// ID of the created room.
    pub room_id: String,
    /// Human-readable message.
    pub message: String,
}

/// Pending join requests of a room.
#[derive(Debug, Serialize)]
pub struct GuestRequestsResponse {
    /// Nicknames in submission order.
    pub guest_requests: Vec<String>,
}

/// Chat start response.
#[derive(Debug, Serialize)]
pub struct StartChatResponse {
    /// Human-readable message.
    pub message: String,
    /// WebSocket URL template with a literal `{username}` placeholder.
    pub websocket_url: String,
}
