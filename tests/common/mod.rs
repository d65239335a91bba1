//! Test helpers for integration tests.
//!
//! Provides an in-process API test server, a real relay server bound to an
//! ephemeral port, and a small WebSocket client wrapper.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use tandem::web::handlers::AppState;
use tandem::web::router::create_router;
use tandem::{Config, RoomManager, WebServer};

/// Default timeout for test operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a client must stay quiet to count as "received nothing".
pub const SILENCE: Duration = Duration::from_millis(200);

/// Public relay URL used by test servers.
pub const TEST_PUBLIC_WS_URL: &str = "ws://localhost:8000";

/// Create an in-process API server and the registry behind it.
pub fn create_test_server() -> (TestServer, Arc<RoomManager>) {
    let rooms = Arc::new(RoomManager::new());
    let state = Arc::new(AppState::new(Arc::clone(&rooms), TEST_PUBLIC_WS_URL));
    let router = create_router(state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");
    (server, rooms)
}

/// Start a real server on 127.0.0.1 with an ephemeral port.
pub async fn spawn_relay_server(require_approval: bool) -> (SocketAddr, Arc<RoomManager>) {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.relay.require_approval = require_approval;

    let rooms = Arc::new(RoomManager::new());
    let addr = WebServer::new(&config, Arc::clone(&rooms))
        .run_with_addr()
        .await
        .expect("Failed to start relay server");
    (addr, rooms)
}

/// Wait until a room has exactly `expected` live connections.
pub async fn wait_for_connections(rooms: &RoomManager, room_id: &str, expected: usize) {
    let room = rooms.get_room(room_id).await.expect("room exists");
    let deadline = tokio::time::Instant::now() + DEFAULT_TIMEOUT;
    while room.connection_count().await != expected {
        if tokio::time::Instant::now() > deadline {
            panic!(
                "room {room_id} has {} connections, expected {expected}",
                room.connection_count().await
            );
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// WebSocket test client.
pub struct RelayClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl RelayClient {
    /// Connect to the relay endpoint for a room.
    pub async fn connect(
        addr: SocketAddr,
        room_id: &str,
        username: &str,
    ) -> Result<Self, tokio_tungstenite::tungstenite::Error> {
        let url = format!("ws://{addr}/ws/{room_id}/{username}");
        let (stream, _) = connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Send a text frame.
    pub async fn send(&mut self, text: &str) {
        self.stream
            .send(Message::text(text))
            .await
            .expect("send failed");
    }

    /// Send a binary frame.
    pub async fn send_binary(&mut self, data: &[u8]) {
        self.stream
            .send(Message::binary(data.to_vec()))
            .await
            .expect("send failed");
    }

    /// Receive the next text frame.
    pub async fn recv(&mut self) -> String {
        loop {
            let msg = timeout(DEFAULT_TIMEOUT, self.stream.next())
                .await
                .expect("timed out waiting for frame")
                .expect("stream ended")
                .expect("websocket error");
            if msg.is_text() {
                return msg.to_text().expect("text frame").to_string();
            }
        }
    }

    /// Collect every text frame that arrives before the client goes quiet.
    pub async fn drain(&mut self) -> Vec<String> {
        let mut frames = Vec::new();
        while let Ok(Some(Ok(msg))) = timeout(SILENCE, self.stream.next()).await {
            if msg.is_text() {
                frames.push(msg.to_text().expect("text frame").to_string());
            }
        }
        frames
    }

    /// Close the connection.
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
