//! Configuration module for tandem.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, TandemError};

/// Environment variable overriding `server.public_ws_url`.
pub const PUBLIC_WS_URL_ENV: &str = "TANDEM_PUBLIC_WS_URL";

/// HTTP / WebSocket server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base URL handed to clients in the `websocket_url` template.
    #[serde(default = "default_public_ws_url")]
    pub public_ws_url: String,
    /// CORS allowed origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_public_ws_url() -> String {
    "ws://localhost:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_ws_url: default_public_ws_url(),
            cors_origins: vec![],
        }
    }
}

/// Relay configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayConfig {
    /// Only let the host and approved guests attach to a room's relay.
    #[serde(default)]
    pub require_approval: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty means console only.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/tandem.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Relay configuration.
    #[serde(default)]
    pub relay: RelayConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| TandemError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `TANDEM_PUBLIC_WS_URL`: Override the public WebSocket base URL
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(PUBLIC_WS_URL_ENV) {
            if !url.is_empty() {
                self.server.public_ws_url = url;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if `public_ws_url` is not a `ws://` or `wss://` URL.
    pub fn validate(&self) -> Result<()> {
        let url = &self.server.public_ws_url;
        if !url.starts_with("ws://") && !url.starts_with("wss://") {
            return Err(TandemError::Config(format!(
                "public_ws_url must start with ws:// or wss://, got {url:?}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.public_ws_url, "ws://localhost:8000");
        assert!(config.server.cors_origins.is_empty());

        assert!(!config.relay.require_approval);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/tandem.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
public_ws_url = "wss://chat.example.com"
cors_origins = ["http://localhost:3000"]

[relay]
require_approval = true

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.public_ws_url, "wss://chat.example.com");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
        assert!(config.relay.require_approval);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 3000
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.public_ws_url, "ws://localhost:8000");
        assert!(!config.relay.require_approval);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        if let Err(TandemError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_parse_console_only_logging() {
        let config = Config::parse("[logging]\nfile = \"\"").unwrap();
        assert!(config.logging.file.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(TandemError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 8123").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8123);
    }

    #[test]
    fn test_apply_env_overrides_public_ws_url() {
        let original = std::env::var(PUBLIC_WS_URL_ENV).ok();

        std::env::set_var(PUBLIC_WS_URL_ENV, "wss://relay.example.org");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.server.public_ws_url, "wss://relay.example.org");

        std::env::set_var(PUBLIC_WS_URL_ENV, "");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.server.public_ws_url, "ws://localhost:8000");

        if let Some(val) = original {
            std::env::set_var(PUBLIC_WS_URL_ENV, val);
        } else {
            std::env::remove_var(PUBLIC_WS_URL_ENV);
        }
    }

    #[test]
    fn test_validate_public_ws_url() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.server.public_ws_url = "wss://chat.example.com".to_string();
        assert!(config.validate().is_ok());

        config.server.public_ws_url = "http://localhost:8000".to_string();
        assert!(matches!(config.validate(), Err(TandemError::Config(_))));
    }
}
