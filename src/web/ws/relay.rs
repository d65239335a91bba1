//! Relay WebSocket handler.
//!
//! Every connection gets a reader loop (this task) and a writer task fed by
//! the room. Inbound text frames are fanned out to the rest of the room.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::chat::RoomManager;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::TandemError;

/// WebSocket relay handler.
///
/// GET /ws/:room_id/:username
///
/// Unknown rooms are rejected before the upgrade. The username is only
/// checked against the approval list when `require_approval` is set.
pub async fn relay_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path((room_id, username)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let room = state.rooms.room(&room_id).await.map_err(|e| {
        tracing::debug!(room_id = %room_id, "Relay connection rejected: {}", e);
        e
    })?;

    if state.require_approval && !room.may_attach(&username).await {
        tracing::debug!(room_id = %room_id, username = %username, "Relay connection not approved");
        return Err(TandemError::NotApproved(username).into());
    }

    let rooms = Arc::clone(&state.rooms);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, rooms, room_id, username)))
}

/// Drive one relay connection until the client goes away.
///
/// The room is looked up by ID for every operation, so the connection
/// follows its room across a re-create.
async fn handle_socket(
    socket: WebSocket,
    rooms: Arc<RoomManager>,
    room_id: String,
    username: String,
) {
    let (connection_id, mut outbound) = match rooms.attach(&room_id, &username).await {
        Ok(attached) => attached,
        Err(e) => {
            tracing::debug!(room_id = %room_id, "Relay attach failed: {}", e);
            return;
        }
    };
    tracing::info!(
        room_id = %room_id,
        connection_id = %connection_id,
        username = %username,
        "Relay connection opened"
    );

    let (mut ws_sender, mut ws_receiver) = socket.split();

    let mut writer = tokio::spawn(async move {
        while let Some(frame) = outbound.recv().await {
            if ws_sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            msg = ws_receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        rooms.relay(&room_id, connection_id, &username, &text).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(connection_id = %connection_id, "WebSocket error: {}", e);
                        break;
                    }
                }
            }
            // Writer only stops when the peer can no longer be written to.
            _ = &mut writer => break,
        }
    }

    rooms.detach(&room_id, connection_id).await;
    writer.abort();

    tracing::info!(
        room_id = %room_id,
        connection_id = %connection_id,
        username = %username,
        "Relay connection closed"
    );
}
