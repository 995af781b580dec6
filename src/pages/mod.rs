//! BlockVote Pages
//!
//! Server-rendered HTML views over the mock chain:
//!
//! - `/` - Landing page
//! - `/register` - Voter registration
//! - `/vote` - Ballot and vote receipt
//! - `/results` - Tallies
//! - `/admin` - Election management, voter registry, settings
//!
//! Chain failures are logged and the page falls back to its previous view;
//! they never surface as error responses.

pub mod admin;
pub mod home;
pub mod layout;
pub mod register;
pub mod results;
pub mod vote;

use axum::{
    extract::State,
    response::Redirect,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::websocket::WsEvent;

/// Page routes, merged into the main router
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home::home_page))
        .route(
            "/register",
            get(register::register_page).post(register::submit),
        )
        .route("/register/connect", post(register::connect))
        .route("/vote", get(vote::vote_page).post(vote::submit))
        .route("/vote/connect", post(vote::connect))
        .route("/results", get(results::results_page))
        .route("/admin", get(admin::admin_page))
        .route("/admin/connect", post(admin::connect))
        .route("/admin/election", post(admin::create_election))
        .route("/admin/election/end", post(admin::end_election))
        .route("/logout", post(logout))
}

/// POST /logout
async fn logout(State(state): State<Arc<AppState>>) -> Redirect {
    match state.chain.disconnect_wallet().await {
        Ok(()) => state.notify(WsEvent::wallet_disconnected()).await,
        Err(e) => tracing::error!(error = %e, "Failed to disconnect wallet"),
    }
    Redirect::to("/")
}
