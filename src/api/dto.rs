//! Data Transfer Objects
//!
//! Request and response types for the API endpoints. Field names are
//! camelCase to line up with the chain records they wrap.

use serde::{Deserialize, Serialize};

use crate::chain::{Address, Election, TxHash, Voter, VoterStatus};

// ============================================
// WALLET DTOs
// ============================================

/// Query parameters for POST /wallet/connect
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectWalletParams {
    /// Only report an existing connection, never create one
    #[serde(default)]
    pub check_only: bool,
}

/// Connected wallet
#[derive(Debug, Serialize)]
pub struct WalletResponse {
    pub address: Address,
    pub connected: bool,
}

/// Admin check result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub address: String,
    pub is_admin: bool,
}

// ============================================
// VOTER DTOs
// ============================================

/// Voter status lookup result
#[derive(Debug, Serialize)]
pub struct VoterStatusResponse {
    pub address: String,
    pub status: VoterStatus,
}

/// Voter roster
#[derive(Debug, Serialize)]
pub struct VoterListResponse {
    pub total: usize,
    pub voters: Vec<Voter>,
}

// ============================================
// VOTE DTOs
// ============================================

/// Cast vote request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    /// Any integer is accepted
    pub candidate_id: i64,
}

/// Cast vote response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteResponse {
    pub candidate_id: i64,
    pub tx_hash: TxHash,
}

// ============================================
// ELECTION DTOs
// ============================================

/// Create election request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateElectionRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Result of an election lifecycle call
#[derive(Debug, Serialize)]
pub struct ElectionActionResponse {
    pub success: bool,
    pub election: Election,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub chain: String,
    pub uptime_seconds: u64,
    pub ws_connections: usize,
    pub version: String,
}
