//! Configuration System
//!
//! `blockvote.toml` settings with `BLOCKVOTE_*` environment overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig;
use crate::chain::LatencyProfile;
use crate::websocket::HubConfig;

/// Everything the server binary reads at startup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub chain: ChainConfig,

    #[serde(default)]
    pub websocket: WebSocketConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_size() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_size: default_max_body_size(),
        }
    }
}

impl ServerConfig {
    pub fn to_api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.host.clone(),
            port: self.port,
            max_body_size: self.max_body_size,
        }
    }
}

/// Mock chain configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// Directory holding the wallet flag file
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Multiplier on the built-in operation delays; 0 disables them
    #[serde(default = "default_latency_scale")]
    pub latency_scale: f64,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("blockvote").to_string_lossy().to_string())
        .unwrap_or_else(|| "./blockvote_data".to_string())
}

fn default_latency_scale() -> f64 {
    1.0
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            latency_scale: default_latency_scale(),
        }
    }
}

impl ChainConfig {
    /// Data directory with a leading `~/` expanded
    pub fn data_path(&self) -> PathBuf {
        match (self.data_dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.data_dir),
        }
    }

    /// Path of the file backing the wallet flag
    pub fn flag_file(&self) -> PathBuf {
        self.data_path().join("local_storage.json")
    }

    pub fn latency(&self) -> LatencyProfile {
        LatencyProfile::default().scaled(self.latency_scale)
    }
}

/// WebSocket hub configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_max_connections() -> usize {
    1000
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
        }
    }
}

impl WebSocketConfig {
    pub fn to_hub_config(&self) -> HubConfig {
        HubConfig {
            max_connections: self.max_connections,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Defaults plus environment
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// File first, then environment
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// First config file found, else defaults; environment applies either way
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("blockvote").join("config.toml")),
            Some(PathBuf::from("/etc/blockvote/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply `BLOCKVOTE_*` environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup; unparsable numbers are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("BLOCKVOTE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("BLOCKVOTE_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        if let Some(data_dir) = lookup("BLOCKVOTE_DATA_DIR") {
            self.chain.data_dir = data_dir;
        }
        if let Some(scale) = lookup("BLOCKVOTE_LATENCY_SCALE").and_then(|s| s.parse().ok()) {
            self.chain.latency_scale = scale;
        }

        if let Some(level) = lookup("BLOCKVOTE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BLOCKVOTE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Commented TOML for `--print-config`
pub fn generate_default_config() -> String {
    r#"# BlockVote Configuration
#
# Environment variables override these settings:
# - BLOCKVOTE_HOST
# - BLOCKVOTE_PORT
# - BLOCKVOTE_DATA_DIR
# - BLOCKVOTE_LATENCY_SCALE
# - BLOCKVOTE_LOG_LEVEL
# - BLOCKVOTE_LOG_FORMAT

[server]
# Server host
host = "0.0.0.0"

# Server port
port = 8080

# Maximum request body size (bytes)
max_body_size = 65536

[chain]
# Directory holding the wallet flag file
data_dir = "~/.local/share/blockvote"

# Multiplier on simulated chain delays (0 disables them)
latency_scale = 1.0

[websocket]
# Maximum concurrent WebSocket connections
max_connections = 1000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/blockvote/blockvote.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.chain.latency_scale, 1.0);
        assert_eq!(config.websocket.max_connections, 1000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.max_body_size, 65536);
        assert_eq!(config.chain.data_dir, "~/.local/share/blockvote");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(
            r#"
            [server]
            port = 9000

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.websocket.max_connections, 1000);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::parse("[server]\nport = \"not a number\"").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/blockvote.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chain]\nlatency_scale = 0.0\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.chain.latency_scale, 0.0);
        assert_eq!(config.chain.latency().cast_vote, Duration::ZERO);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BLOCKVOTE_HOST", "127.0.0.1"),
            ("BLOCKVOTE_PORT", "3000"),
            ("BLOCKVOTE_DATA_DIR", "/tmp/bv"),
            ("BLOCKVOTE_LATENCY_SCALE", "0.5"),
            ("BLOCKVOTE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.chain.flag_file(), PathBuf::from("/tmp/bv/local_storage.json"));
        assert_eq!(config.chain.latency_scale, 0.5);
        assert_eq!(config.chain.latency().cast_vote, Duration::from_millis(1000));
        assert!(config.logging.is_json());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_data_path_expands_home() {
        let chain = ChainConfig {
            data_dir: "~/.local/share/blockvote".to_string(),
            latency_scale: 1.0,
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(chain.data_path(), home.join(".local/share/blockvote"));
        }
    }

    #[test]
    fn test_bad_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "BLOCKVOTE_PORT").then(|| "abc".to_string()));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_conversions() {
        let config = Config::default();
        let api = config.server.to_api_config();
        assert_eq!(api.addr(), "0.0.0.0:8080");
        assert_eq!(config.websocket.to_hub_config().max_connections, 1000);
    }
}
