//! Web server for tandem.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::chat::RoomManager;
use crate::config::Config;

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// HTTP and WebSocket server.
pub struct WebServer {
    host: String,
    port: u16,
    app_state: Arc<AppState>,
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server over a shared room registry.
    pub fn new(config: &Config, rooms: Arc<RoomManager>) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            app_state: Arc::new(AppState::from_config(config, rooms)),
            cors_origins: config.server.cors_origins.clone(),
        }
    }

    /// Get the room registry served by this server.
    pub fn rooms(&self) -> Arc<RoomManager> {
        Arc::clone(&self.app_state.rooms)
    }

    fn router(&self) -> Router {
        create_router(Arc::clone(&self.app_state), &self.cors_origins)
            .merge(create_health_router())
    }

    async fn bind(&self) -> Result<(TcpListener, SocketAddr), std::io::Error> {
        let listener = TcpListener::bind((self.host.as_str(), self.port)).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);
        Ok((listener, local_addr))
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.router();
        let (listener, _) = self.bind().await?;
        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let router = self.router();
        let (listener, local_addr) = self.bind().await?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
