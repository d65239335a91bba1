//! Room registry for tandem.
//!
//! The manager is shared by every HTTP handler and relay connection and
//! owns all rooms for the lifetime of the process.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::room::Room;
use crate::{Result, TandemError};

/// Registry of chat rooms keyed by room ID.
pub struct RoomManager {
    rooms: RwLock<HashMap<String, Arc<Room>>>,
}

impl RoomManager {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Create a room and return it.
    ///
    /// A room already registered under the same ID is replaced: requests and
    /// approvals start over empty, while live relay connections move into
    /// the new room so the ID keeps a single connection list.
    pub async fn create_room(
        &self,
        host_username: &str,
        host_language: &str,
        guest_language: &str,
    ) -> Arc<Room> {
        let room = Arc::new(Room::new(host_username, host_language, guest_language));
        let mut rooms = self.rooms.write().await;

        match rooms.insert(room.id().to_string(), Arc::clone(&room)) {
            Some(replaced) => {
                let carried = replaced.take_connections().await;
                let connections = carried.len();
                room.adopt_connections(carried).await;
                tracing::info!(room_id = %room.id(), connections, "Room replaced");
            }
            None => tracing::info!(room_id = %room.id(), "Room created"),
        }
        room
    }

    /// Get a room by ID.
    pub async fn get_room(&self, room_id: &str) -> Option<Arc<Room>> {
        self.rooms.read().await.get(room_id).cloned()
    }

    /// Get a room by ID or fail with `RoomNotFound`.
    pub async fn room(&self, room_id: &str) -> Result<Arc<Room>> {
        self.get_room(room_id).await.ok_or(TandemError::RoomNotFound)
    }

    /// Check if a room exists.
    pub async fn exists(&self, room_id: &str) -> bool {
        self.rooms.read().await.contains_key(room_id)
    }

    /// Get the number of rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Submit a join request for `nickname`.
    pub async fn submit_request(&self, room_id: &str, nickname: &str) -> Result<()> {
        let room = self.room(room_id).await?;
        room.request_join(nickname).await;
        tracing::debug!(room_id, nickname, "Join request submitted");
        Ok(())
    }

    /// List pending join requests.
    pub async fn guest_requests(&self, room_id: &str) -> Result<Vec<String>> {
        Ok(self.room(room_id).await?.guest_requests().await)
    }

    /// Approve a pending join request.
    pub async fn approve_guest(&self, room_id: &str, nickname: &str) -> Result<()> {
        let room = self.room(room_id).await?;
        room.approve(nickname).await?;
        tracing::info!(room_id, nickname, "Guest approved");
        Ok(())
    }

    /// List approved guests.
    pub async fn approved_guests(&self, room_id: &str) -> Result<Vec<String>> {
        Ok(self.room(room_id).await?.approved_guests().await)
    }

    /// Check that `nickname` may start chatting in the room.
    pub async fn start_chat(&self, room_id: &str, nickname: &str) -> Result<Arc<Room>> {
        let room = self.room(room_id).await?;
        if !room.is_approved(nickname).await {
            return Err(TandemError::GuestNotApproved);
        }
        Ok(room)
    }

    /// Register a relay connection in the room currently registered under
    /// `room_id`.
    ///
    /// Connection operations go through the registry so a replaced room
    /// never keeps a stale connection list.
    pub async fn attach(
        &self,
        room_id: &str,
        username: &str,
    ) -> Result<(Uuid, mpsc::UnboundedReceiver<String>)> {
        let rooms = self.rooms.read().await;
        let room = rooms.get(room_id).ok_or(TandemError::RoomNotFound)?;
        Ok(room.attach(username).await)
    }

    /// Relay a connection's text to the rest of its room.
    pub async fn relay(
        &self,
        room_id: &str,
        connection_id: Uuid,
        username: &str,
        content: &str,
    ) -> usize {
        let rooms = self.rooms.read().await;
        match rooms.get(room_id) {
            Some(room) => room.relay(connection_id, username, content).await,
            None => 0,
        }
    }

    /// Remove a connection from its room and send the departure notice.
    pub async fn detach(&self, room_id: &str, connection_id: Uuid) -> bool {
        let rooms = self.rooms.read().await;
        match rooms.get(room_id) {
            Some(room) => room.detach(connection_id).await,
            None => false,
        }
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}
