//! Voter Routes
//!
//! - GET /api/v1/voters - Voter roster
//! - GET /api/v1/voters/:address/status - Registration/voting status
//! - POST /api/v1/registrations - Submit a registration form

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{VoterListResponse, VoterStatusResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chain::{RegistrationForm, RegistrationReceipt};

/// GET /api/v1/voters
pub async fn list_voters(State(state): State<Arc<AppState>>) -> ApiResult<Json<VoterListResponse>> {
    let voters = state.chain.get_voter_list().await?;
    Ok(Json(VoterListResponse {
        total: voters.len(),
        voters,
    }))
}

/// GET /api/v1/voters/:address/status
pub async fn voter_status(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<VoterStatusResponse>> {
    let status = state.chain.check_voter_status(&address).await?;
    Ok(Json(VoterStatusResponse { address, status }))
}

/// POST /api/v1/registrations
///
/// All three fields are required. The roster is not changed.
pub async fn submit_registration(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RegistrationForm>,
) -> ApiResult<(StatusCode, Json<RegistrationReceipt>)> {
    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let receipt = state.chain.submit_registration(form).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
