//! Request DTOs for the room API.

use serde::Deserialize;

/// Room creation request.
#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    /// Host's username.
    pub host_username: String,
    /// Host's language tag.
    pub host_language: String,
    /// Guests' language tag.
    pub guest_language: String,
}

/// Join request from a guest.
#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    /// Guest's nickname.
    pub nickname: String,
}
