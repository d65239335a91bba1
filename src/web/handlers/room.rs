//! Room handlers: creation, join requests, approval and chat start.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::web::dto::{
    ApiJson, CreateRoomRequest, CreateRoomResponse, GuestRequestsResponse, JoinRequest,
    MessageResponse, StartChatResponse,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /room/create/ - Create (or replace) a room.
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateRoomRequest>,
) -> Json<CreateRoomResponse> {
    let room = state
        .rooms
        .create_room(&req.host_username, &req.host_language, &req.guest_language)
        .await;

    Json(CreateRoomResponse {
        room_id: room.id().to_string(),
        message: "Room created successfully".to_string(),
    })
}

/// POST /room/request/:room_id - Ask to join a room.
pub async fn request_to_join(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    ApiJson(req): ApiJson<JoinRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.rooms.submit_request(&room_id, &req.nickname).await?;
    Ok(Json(MessageResponse::new(
        "Request to join room sent successfully",
    )))
}

/// GET /room/requests/:room_id - List pending join requests.
pub async fn list_guest_requests(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<GuestRequestsResponse>, ApiError> {
    let guest_requests = state.rooms.guest_requests(&room_id).await?;
    Ok(Json(GuestRequestsResponse { guest_requests }))
}

/// POST /room/approve/:room_id/:guest_nickname - Approve a pending guest.
pub async fn approve_guest(
    State(state): State<Arc<AppState>>,
    Path((room_id, guest_nickname)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.rooms.approve_guest(&room_id, &guest_nickname).await?;
    Ok(Json(MessageResponse::new(format!(
        "Guest {guest_nickname} approved"
    ))))
}

/// GET /room/start/:room_id/:guest_nickname - Hand an approved guest the relay URL.
pub async fn start_chat(
    State(state): State<Arc<AppState>>,
    Path((room_id, guest_nickname)): Path<(String, String)>,
) -> Result<Json<StartChatResponse>, ApiError> {
    let room = state.rooms.start_chat(&room_id, &guest_nickname).await?;
    Ok(Json(StartChatResponse {
        message: format!("Chat started with {guest_nickname}"),
        websocket_url: state.websocket_url(room.id()),
    }))
}
