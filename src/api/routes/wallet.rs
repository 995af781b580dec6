//! Wallet Routes
//!
//! - POST /api/v1/wallet/connect - Connect (or with `?checkOnly=true`, check) the wallet
//! - GET /api/v1/wallet - Report the connected wallet
//! - DELETE /api/v1/wallet - Forget the connection
//! - GET /api/v1/admins/:address - Admin check

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{AdminResponse, ConnectWalletParams, WalletResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::websocket::WsEvent;

/// POST /api/v1/wallet/connect
pub async fn connect_wallet(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConnectWalletParams>,
) -> ApiResult<Json<WalletResponse>> {
    let address = state.chain.connect_wallet(params.check_only).await?;

    if !params.check_only {
        state.notify(WsEvent::wallet_connected(&address)).await;
    }

    Ok(Json(WalletResponse {
        address,
        connected: true,
    }))
}

/// GET /api/v1/wallet
///
/// 401 when no wallet is connected.
pub async fn current_wallet(State(state): State<Arc<AppState>>) -> ApiResult<Json<WalletResponse>> {
    let address = state.chain.connect_wallet(true).await?;
    Ok(Json(WalletResponse {
        address,
        connected: true,
    }))
}

/// DELETE /api/v1/wallet
pub async fn disconnect_wallet(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.chain.disconnect_wallet().await?;
    state.notify(WsEvent::wallet_disconnected()).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admins/:address
pub async fn is_admin(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<AdminResponse>> {
    let is_admin = state.chain.is_admin(&address).await?;
    Ok(Json(AdminResponse { address, is_admin }))
}
