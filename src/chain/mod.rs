//! BlockVote Mock Chain
//!
//! Simulates the voting contract the pages and API expect:
//!
//! - **types**: Records handed out by the chain (Voter, Candidate, Election, ...)
//! - **fixtures**: The static roster, tallies and demo account
//! - **latency**: Artificial per-operation delays
//! - **wallet**: The persisted "wallet connected" flag
//! - **client**: `VotingChain` trait and the `MockChain` implementation
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use blockvote::chain::{LatencyProfile, MockChain, VotingChain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let chain = MockChain::in_memory(LatencyProfile::default());
//!
//!     let address = chain.connect_wallet(false).await?;
//!     let status = chain.check_voter_status(address.as_str()).await?;
//!     println!("{} is {}", address, status);
//!
//!     chain.create_election("Presidential Election 2024", "2024-11-01", "2024-11-05").await?;
//!     let tx = chain.cast_vote(1).await?;
//!     println!("vote recorded in {}", tx);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod fixtures;
pub mod latency;
pub mod types;
pub mod wallet;

pub use client::{MockChain, VotingChain};
pub use error::{ChainError, ChainResult};
pub use latency::LatencyProfile;
pub use types::{
    Address, BallotEntry, Candidate, Election, ElectionResults, RegistrationForm,
    RegistrationReceipt, TxHash, Voter, VoterStatus,
};
pub use wallet::{FileFlagStore, FlagStore, MemoryFlagStore, WALLET_CONNECTED_KEY};
