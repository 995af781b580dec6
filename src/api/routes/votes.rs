//! Vote Routes
//!
//! - GET /api/v1/candidates - Ballot
//! - POST /api/v1/votes - Cast a vote
//! - GET /api/v1/results - Election results

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{CastVoteRequest, CastVoteResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::chain::{BallotEntry, ElectionResults};
use crate::websocket::WsEvent;

/// GET /api/v1/candidates
pub async fn list_candidates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BallotEntry>>> {
    Ok(Json(state.chain.ballot().await?))
}

/// POST /api/v1/votes
///
/// The candidate ID is passed through unchecked; tallies do not move.
pub async fn cast_vote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CastVoteRequest>,
) -> ApiResult<(StatusCode, Json<CastVoteResponse>)> {
    let tx_hash = state.chain.cast_vote(req.candidate_id).await?;
    state
        .notify(WsEvent::vote_cast(req.candidate_id, &tx_hash))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(CastVoteResponse {
            candidate_id: req.candidate_id,
            tx_hash,
        }),
    ))
}

/// GET /api/v1/results
pub async fn get_results(State(state): State<Arc<AppState>>) -> ApiResult<Json<ElectionResults>> {
    Ok(Json(state.chain.get_election_results().await?))
}
