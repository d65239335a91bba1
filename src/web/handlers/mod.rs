//! API handlers for the room broker.

pub mod room;

pub use room::*;

use std::sync::Arc;

use crate::chat::RoomManager;
use crate::config::Config;

/// Shared state for all handlers.
pub struct AppState {
    /// Room registry.
    pub rooms: Arc<RoomManager>,
    /// Base URL used in `websocket_url` templates.
    pub public_ws_url: String,
    /// Only the host and approved guests may attach to the relay.
    pub require_approval: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new(rooms: Arc<RoomManager>, public_ws_url: impl Into<String>) -> Self {
        Self {
            rooms,
            public_ws_url: public_ws_url.into(),
            require_approval: false,
        }
    }

    /// Create the application state from configuration.
    pub fn from_config(config: &Config, rooms: Arc<RoomManager>) -> Self {
        Self::new(rooms, &config.server.public_ws_url)
            .with_require_approval(config.relay.require_approval)
    }

    /// Set whether relay attach requires approval.
    pub fn with_require_approval(mut self, require_approval: bool) -> Self {
        self.require_approval = require_approval;
        self
    }

    /// Build the WebSocket URL template for a room.
    ///
    /// The `{username}` placeholder is left for the client to fill in.
    pub fn websocket_url(&self, room_id: &str) -> String {
        format!(
            "{}/ws/{}/{{username}}",
            self.public_ws_url.trim_end_matches('/'),
            room_id
        )
    }
}
