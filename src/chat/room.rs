//! Chat room implementation for tandem.
//!
//! A room owns the host's pending join requests, the approved guest list and
//! the live relay connections. All three live behind one mutex so approval
//! and attach/detach are serialized per room.

use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use super::message::RelayMessage;
use crate::{Result, TandemError};

/// Separator between the parts of a room ID.
const ROOM_ID_SEPARATOR: char = '-';

/// A live relay connection registered in a room.
#[derive(Debug, Clone)]
pub(super) struct Participant {
    connection_id: Uuid,
    username: String,
    /// Outbound frame queue drained by the connection's writer task.
    sender: mpsc::UnboundedSender<String>,
}

#[derive(Debug, Default)]
struct RoomState {
    guest_requests: Vec<String>,
    approved_guests: Vec<String>,
    connections: Vec<Participant>,
}

/// A chat room.
#[derive(Debug)]
pub struct Room {
    id: String,
    host_username: String,
    host_language: String,
    guest_language: String,
    state: Mutex<RoomState>,
}

impl Room {
    /// Build the room ID for a host and language pair.
    pub fn make_id(host_username: &str, host_language: &str, guest_language: &str) -> String {
        format!(
            "{host_username}{sep}{host_language}{sep}{guest_language}",
            sep = ROOM_ID_SEPARATOR
        )
    }

    /// Create a new room with empty queues.
    pub fn new(
        host_username: impl Into<String>,
        host_language: impl Into<String>,
        guest_language: impl Into<String>,
    ) -> Self {
        let host_username = host_username.into();
        let host_language = host_language.into();
        let guest_language = guest_language.into();
        Self {
            id: Self::make_id(&host_username, &host_language, &guest_language),
            host_username,
            host_language,
            guest_language,
            state: Mutex::new(RoomState::default()),
        }
    }

    /// Get the room ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the host's username.
    pub fn host_username(&self) -> &str {
        &self.host_username
    }

    /// Get the host's language tag.
    pub fn host_language(&self) -> &str {
        &self.host_language
    }

    /// Get the guests' language tag.
    pub fn guest_language(&self) -> &str {
        &self.guest_language
    }

    /// Queue a join request. Duplicates are kept.
    pub async fn request_join(&self, nickname: impl Into<String>) {
        self.state.lock().await.guest_requests.push(nickname.into());
    }

    /// Pending join requests in submission order.
    pub async fn guest_requests(&self) -> Vec<String> {
        self.state.lock().await.guest_requests.clone()
    }

    /// Approve the first pending request for `nickname`.
    pub async fn approve(&self, nickname: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let pos = state
            .guest_requests
            .iter()
            .position(|n| n == nickname)
            .ok_or(TandemError::GuestRequestNotFound)?;
        let nickname = state.guest_requests.remove(pos);
        state.approved_guests.push(nickname);
        Ok(())
    }

    /// Approved guests in approval order.
    pub async fn approved_guests(&self) -> Vec<String> {
        self.state.lock().await.approved_guests.clone()
    }

    /// Check if a nickname has been approved.
    pub async fn is_approved(&self, nickname: &str) -> bool {
        self.state
            .lock()
            .await
            .approved_guests
            .iter()
            .any(|n| n == nickname)
    }

    /// Check if a username may attach when approval is enforced.
    pub async fn may_attach(&self, username: &str) -> bool {
        username == self.host_username || self.is_approved(username).await
    }

    /// Register a new connection.
    ///
    /// Returns the connection ID and the receiver for frames addressed to it.
    pub async fn attach(
        &self,
        username: impl Into<String>,
    ) -> (Uuid, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let participant = Participant {
            connection_id: Uuid::new_v4(),
            username: username.into(),
            sender,
        };
        let connection_id = participant.connection_id;

        self.state.lock().await.connections.push(participant);
        (connection_id, receiver)
    }

    /// Move every live connection out of this room.
    pub(super) async fn take_connections(&self) -> Vec<Participant> {
        std::mem::take(&mut self.state.lock().await.connections)
    }

    /// Register connections carried over from a replaced room.
    pub(super) async fn adopt_connections(&self, connections: Vec<Participant>) {
        self.state.lock().await.connections.extend(connections);
    }

    /// Remove a connection and notify the rest of the room.
    ///
    /// Returns false if the connection was not registered.
    pub async fn detach(&self, connection_id: Uuid) -> bool {
        let mut state = self.state.lock().await;
        let Some(pos) = state
            .connections
            .iter()
            .position(|p| p.connection_id == connection_id)
        else {
            return false;
        };
        let participant = state.connections.remove(pos);
        drop(state);

        self.broadcast(None, &RelayMessage::left(participant.username))
            .await;
        true
    }

    /// Relay a participant's text to every other connection in the room.
    ///
    /// Returns the number of connections the frame was queued for.
    pub async fn relay(&self, connection_id: Uuid, username: &str, content: &str) -> usize {
        self.broadcast(Some(connection_id), &RelayMessage::chat(username, content))
            .await
    }

    /// Send a frame to all connections except `skip`.
    ///
    /// The connection list is copied before sending so detaches during the
    /// fan-out cannot invalidate it. A closed peer is skipped.
    pub async fn broadcast(&self, skip: Option<Uuid>, message: &RelayMessage) -> usize {
        let targets: Vec<Participant> = self
            .state
            .lock()
            .await
            .connections
            .iter()
            .filter(|p| Some(p.connection_id) != skip)
            .cloned()
            .collect();

        let frame = message.format();
        let mut delivered = 0;
        for target in targets {
            if target.sender.send(frame.clone()).is_err() {
                tracing::debug!(
                    room_id = %self.id,
                    connection_id = %target.connection_id,
                    "Dropping frame for closed connection"
                );
                continue;
            }
            delivered += 1;
        }
        delivered
    }

    /// Get the number of live connections.
    pub async fn connection_count(&self) -> usize {
        self.state.lock().await.connections.len()
    }

    /// Usernames of live connections in attach order.
    pub async fn connected_usernames(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .connections
            .iter()
            .map(|p| p.username.clone())
            .collect()
    }
}
