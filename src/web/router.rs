//! Router configuration for the room API and relay.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    approve_guest, create_room, list_guest_requests, request_to_join, start_chat, AppState,
};
use super::middleware::create_cors_layer;
use super::ws::relay_ws_handler;

/// Create the main router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let room_routes = Router::new()
        .route("/create/", post(create_room))
        .route("/create", post(create_room))
        .route("/request/:room_id", post(request_to_join))
        .route("/requests/:room_id", get(list_guest_requests))
        .route("/approve/:room_id/:guest_nickname", post(approve_guest))
        .route("/start/:room_id/:guest_nickname", get(start_chat));

    Router::new()
        .nest("/room", room_routes)
        .route("/ws/:room_id/:username", get(relay_ws_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
