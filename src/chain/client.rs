//! Mock chain client
//!
//! `VotingChain` is the contract surface the pages and the API call into.
//! `MockChain` answers it with fixed data after artificial delays:
//! - wallet connect always resolves to the demo account
//! - every address is an admin
//! - votes produce a random transaction hash and change nothing
//! - the election record is the only mutable state (last write wins)

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::{ChainError, ChainResult};
use super::fixtures;
use super::latency::{simulate, LatencyProfile};
use super::types::{
    Address, BallotEntry, Election, ElectionResults, RegistrationForm, RegistrationReceipt,
    TxHash, Voter, VoterStatus,
};
use super::wallet::{FlagStore, MemoryFlagStore, WALLET_CONNECTED_KEY};

/// Operations exposed by a voting contract
#[async_trait]
pub trait VotingChain: Send + Sync {
    /// Resolve the connected account
    ///
    /// With `check_only` the stored connection flag must already be set,
    /// otherwise `ChainError::NoWalletConnected` is returned. Without it the
    /// flag is set unconditionally.
    async fn connect_wallet(&self, check_only: bool) -> ChainResult<Address>;

    /// Forget the stored connection flag
    async fn disconnect_wallet(&self) -> ChainResult<()>;

    async fn is_admin(&self, address: &str) -> ChainResult<bool>;

    async fn check_voter_status(&self, address: &str) -> ChainResult<VoterStatus>;

    /// Cast a vote; `candidate_id` is not validated
    async fn cast_vote(&self, candidate_id: i64) -> ChainResult<TxHash>;

    async fn get_election_results(&self) -> ChainResult<ElectionResults>;

    async fn get_voter_list(&self) -> ChainResult<Vec<Voter>>;

    async fn create_election(
        &self,
        title: &str,
        start_date: &str,
        end_date: &str,
    ) -> ChainResult<bool>;

    async fn end_election(&self) -> ChainResult<bool>;

    async fn get_election_status(&self) -> ChainResult<Election>;

    /// Candidates as listed on the ballot
    async fn ballot(&self) -> ChainResult<Vec<BallotEntry>>;

    /// Acknowledge a registration form; the roster is not changed
    async fn submit_registration(&self, form: RegistrationForm)
        -> ChainResult<RegistrationReceipt>;
}

/// In-memory stand-in for the voting contract
pub struct MockChain {
    flags: Arc<dyn FlagStore>,
    election: RwLock<Election>,
    roster: Vec<Voter>,
    results: ElectionResults,
    latency: LatencyProfile,
}

impl MockChain {
    pub fn new(flags: Arc<dyn FlagStore>, latency: LatencyProfile) -> Self {
        Self {
            flags,
            election: RwLock::new(Election::inactive()),
            roster: fixtures::voter_roster(),
            results: fixtures::election_results(),
            latency,
        }
    }

    /// Chain backed by an in-memory flag store
    pub fn in_memory(latency: LatencyProfile) -> Self {
        Self::new(Arc::new(MemoryFlagStore::new()), latency)
    }

    /// Replace the voter roster
    #[cfg(test)]
    pub(crate) fn with_roster(mut self, roster: Vec<Voter>) -> Self {
        self.roster = roster;
        self
    }
}

#[async_trait]
impl VotingChain for MockChain {
    async fn connect_wallet(&self, check_only: bool) -> ChainResult<Address> {
        simulate(self.latency.connect_wallet).await;

        if check_only {
            return match self.flags.get(WALLET_CONNECTED_KEY).await? {
                Some(_) => Ok(fixtures::demo_account()),
                None => Err(ChainError::NoWalletConnected),
            };
        }

        self.flags.set(WALLET_CONNECTED_KEY, "true").await?;
        let account = fixtures::demo_account();
        tracing::info!(address = %account, "Wallet connected");
        Ok(account)
    }

    async fn disconnect_wallet(&self) -> ChainResult<()> {
        self.flags.remove(WALLET_CONNECTED_KEY).await?;
        tracing::info!("Wallet disconnected");
        Ok(())
    }

    async fn is_admin(&self, address: &str) -> ChainResult<bool> {
        simulate(self.latency.is_admin).await;
        tracing::debug!(address = %address, "Admin check");
        Ok(true)
    }

    async fn check_voter_status(&self, address: &str) -> ChainResult<VoterStatus> {
        simulate(self.latency.voter_status).await;
        let status = VoterStatus::of(&self.roster, address);
        tracing::debug!(address = %address, status = %status, "Voter status checked");
        Ok(status)
    }

    async fn cast_vote(&self, candidate_id: i64) -> ChainResult<TxHash> {
        simulate(self.latency.cast_vote).await;
        let tx_hash = TxHash::random();
        tracing::info!(candidate_id, tx_hash = %tx_hash, "Vote cast");
        Ok(tx_hash)
    }

    async fn get_election_results(&self) -> ChainResult<ElectionResults> {
        simulate(self.latency.results).await;
        Ok(self.results.clone())
    }

    async fn get_voter_list(&self) -> ChainResult<Vec<Voter>> {
        simulate(self.latency.voter_list).await;
        Ok(self.roster.clone())
    }

    async fn create_election(
        &self,
        title: &str,
        start_date: &str,
        end_date: &str,
    ) -> ChainResult<bool> {
        simulate(self.latency.create_election).await;
        *self.election.write().await = Election::open(title, start_date, end_date);
        tracing::info!(
            title = %title,
            start_date = %start_date,
            end_date = %end_date,
            "Election created"
        );
        Ok(true)
    }

    async fn end_election(&self) -> ChainResult<bool> {
        simulate(self.latency.end_election).await;
        *self.election.write().await = Election::inactive();
        tracing::info!("Election ended");
        Ok(true)
    }

    async fn get_election_status(&self) -> ChainResult<Election> {
        simulate(self.latency.election_status).await;
        Ok(self.election.read().await.clone())
    }

    async fn ballot(&self) -> ChainResult<Vec<BallotEntry>> {
        Ok(fixtures::ballot())
    }

    async fn submit_registration(
        &self,
        form: RegistrationForm,
    ) -> ChainResult<RegistrationReceipt> {
        simulate(self.latency.registration).await;
        tracing::info!(name = %form.name, "Registration received");
        Ok(RegistrationReceipt {
            name: form.name,
            email: form.email,
            received_at: Utc::now(),
        })
    }
}
