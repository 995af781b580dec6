//! # BlockVote
//!
//! A blockchain voting mockup: voting pages, a JSON API and a live event
//! socket served on top of a simulated voting contract.
//!
//! Nothing here is a ledger. The chain returns fixed data after artificial
//! delays, every address is an admin, and votes do not move the tallies.
//!
//! ## Modules
//!
//! - [`chain`]: Mock chain client and the persisted wallet flag
//! - [`pages`]: Server-rendered HTML views
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Live event hub
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blockvote::api::{serve, ApiConfig, AppState};
//! use blockvote::chain::{LatencyProfile, MockChain};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let chain = Arc::new(MockChain::in_memory(LatencyProfile::default()));
//!     let config = ApiConfig::new("127.0.0.1", 8080);
//!
//!     serve(AppState::new(chain, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chain;
pub mod config;
pub mod pages;
pub mod websocket;

pub use chain::{
    Address, BallotEntry, Candidate, ChainError, ChainResult, Election, ElectionResults,
    FileFlagStore, FlagStore, LatencyProfile, MemoryFlagStore, MockChain, TxHash, Voter,
    VoterStatus, VotingChain,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use websocket::{
    websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage, Topic,
    WsEvent,
};

pub use config::{Config, ConfigError, LoggingConfig};
