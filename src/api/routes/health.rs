//! Health Routes
//!
//! Liveness and readiness checks for BlockVote.
//!
//! - GET /health/live: always 200
//! - GET /health/ready: 200 once the chain answers
//! - GET /health: uptime, version and open sockets

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the chain answers a ballot lookup.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if check_chain_health(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let chain_ok = check_chain_health(&state).await;

    Json(HealthResponse {
        status: if chain_ok { "healthy" } else { "unhealthy" }.to_string(),
        chain: if chain_ok { "ok" } else { "error" }.to_string(),
        uptime_seconds: state.uptime_seconds(),
        ws_connections: state.ws_connection_count().await,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// The ballot lookup carries no artificial delay, so probes stay fast.
async fn check_chain_health(state: &AppState) -> bool {
    match state.chain.ballot().await {
        Ok(ballot) => !ballot.is_empty(),
        Err(e) => {
            tracing::warn!(error = %e, "Chain health check failed");
            false
        }
    }
}
