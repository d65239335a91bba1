use std::sync::Arc;

use tracing::{error, info};

use tandem::{Config, RoomManager, WebServer};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = tandem::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        tandem::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    info!("tandem chat broker");
    info!(
        "Server configured on {}:{} (public relay URL {})",
        config.server.host, config.server.port, config.server.public_ws_url
    );

    let server = WebServer::new(&config, Arc::new(RoomManager::new()));
    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
