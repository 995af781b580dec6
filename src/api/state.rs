//! Application State
//!
//! Shared state accessible by all API and page handlers.
//! Shared by page handlers, API routes and the socket upgrade.

use std::sync::Arc;
use std::time::Instant;

use crate::chain::VotingChain;
use crate::websocket::{ConnectionHub, HubConfig, WsEvent};

/// Chain handle, hub and settings behind every request
#[derive(Clone)]
pub struct AppState {
    /// Chain the pages and API call into
    pub chain: Arc<dyn VotingChain>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Set at boot; feeds `/health`
    pub start_time: Instant,
    /// WebSocket connection hub for live events
    pub ws_hub: Arc<ConnectionHub>,
}

impl AppState {
    pub fn new(chain: Arc<dyn VotingChain>, config: ApiConfig) -> Self {
        Self::with_ws_config(chain, config, HubConfig::default())
    }

    /// Same as [`AppState::new`] with an explicit hub limit
    pub fn with_ws_config(
        chain: Arc<dyn VotingChain>,
        config: ApiConfig,
        hub_config: HubConfig,
    ) -> Self {
        Self {
            chain,
            config: Arc::new(config),
            start_time: Instant::now(),
            ws_hub: Arc::new(ConnectionHub::new(hub_config)),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }

    /// Push an event to live subscribers
    pub async fn notify(&self, event: WsEvent) {
        self.ws_hub.publish(event).await;
    }
}

/// Listener settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Request bodies above this are rejected
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_size: 64 * 1024,
        }
    }
}

impl ApiConfig {
    /// Bind address with default body limit
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// `host:port` for the listener
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addr() {
        assert_eq!(ApiConfig::new("127.0.0.1", 9000).addr(), "127.0.0.1:9000");
        assert_eq!(ApiConfig::default().addr(), "0.0.0.0:8080");
    }
}
