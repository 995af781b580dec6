//! Election Routes
//!
//! - GET /api/v1/election - Current election record
//! - POST /api/v1/election - Open an election
//! - DELETE /api/v1/election - End the election

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{CreateElectionRequest, ElectionActionResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chain::Election;
use crate::websocket::WsEvent;

/// GET /api/v1/election
pub async fn get_election(State(state): State<Arc<AppState>>) -> ApiResult<Json<Election>> {
    Ok(Json(state.chain.get_election_status().await?))
}

/// POST /api/v1/election
///
/// Overwrites whatever election is current. The response carries the record
/// read back from the chain, so a concurrent end is reflected.
pub async fn create_election(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateElectionRequest>,
) -> ApiResult<(StatusCode, Json<ElectionActionResponse>)> {
    validate_create_request(&req)?;

    let success = state
        .chain
        .create_election(&req.title, &req.start_date, &req.end_date)
        .await?;

    let election = state.chain.get_election_status().await?;
    state.notify(WsEvent::election_created(&election)).await;

    Ok((
        StatusCode::CREATED,
        Json(ElectionActionResponse { success, election }),
    ))
}

/// DELETE /api/v1/election
pub async fn end_election(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ElectionActionResponse>> {
    let success = state.chain.end_election().await?;
    state.notify(WsEvent::election_ended()).await;

    Ok(Json(ElectionActionResponse {
        success,
        election: Election::inactive(),
    }))
}

/// Title, start date and end date must all be present
pub(crate) fn validate_create_request(req: &CreateElectionRequest) -> ApiResult<()> {
    let missing: Vec<&str> = [
        ("title", &req.title),
        ("startDate", &req.start_date),
        ("endDate", &req.end_date),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}
