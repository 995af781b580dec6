//! BlockVote HTTP API
//!
//! HTTP layer for BlockVote, built with Axum. Serves the JSON API over the
//! mock chain, the server-rendered pages and the live event socket.
//!
//! # Endpoints
//!
//! ## Wallet
//! - `POST /api/v1/wallet/connect` - Connect the wallet (`?checkOnly=true` to only check)
//! - `GET /api/v1/wallet` - Connected wallet, 401 if none
//! - `DELETE /api/v1/wallet` - Disconnect
//! - `GET /api/v1/admins/:address` - Admin check
//!
//! ## Voters
//! - `GET /api/v1/voters` - Voter roster
//! - `GET /api/v1/voters/:address/status` - Voter status
//! - `POST /api/v1/registrations` - Submit a registration form
//!
//! ## Voting
//! - `GET /api/v1/candidates` - Ballot
//! - `POST /api/v1/votes` - Cast a vote
//! - `GET /api/v1/results` - Election results
//!
//! ## Election
//! - `GET /api/v1/election` - Current election
//! - `POST /api/v1/election` - Create an election
//! - `DELETE /api/v1/election` - End the election
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Live chain events
//!
//! ## Pages
//! - `/`, `/register`, `/vote`, `/results`, `/admin` - see [`crate::pages`]
//!
//! # Example
//!
//! ```rust,ignore
//! use blockvote::api::{serve, ApiConfig, AppState};
//! use blockvote::chain::{LatencyProfile, MockChain};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let chain = Arc::new(MockChain::in_memory(LatencyProfile::default()));
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(chain, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::pages;
use crate::websocket::{websocket_handler, ConnectionHub, WsEvent};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let max_body_size = state.config.max_body_size;

    let api_routes = Router::new()
        // Wallet routes
        .route("/wallet/connect", post(routes::wallet::connect_wallet))
        .route(
            "/wallet",
            get(routes::wallet::current_wallet).delete(routes::wallet::disconnect_wallet),
        )
        .route("/admins/:address", get(routes::wallet::is_admin))
        // Voter routes
        .route("/voters", get(routes::voters::list_voters))
        .route("/voters/:address/status", get(routes::voters::voter_status))
        .route("/registrations", post(routes::voters::submit_registration))
        // Voting routes
        .route("/candidates", get(routes::votes::list_candidates))
        .route("/votes", post(routes::votes::cast_vote))
        .route("/results", get(routes::votes::get_results))
        // Election routes
        .route(
            "/election",
            get(routes::election::get_election)
                .post(routes::election::create_election)
                .delete(routes::election::end_election),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .merge(pages::routes())
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .route("/ws", get(websocket_handler))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let hub = Arc::clone(&state.ws_hub);
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("BlockVote listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(hub))
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("BlockVote shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal, then tell live subscribers
async fn shutdown_signal(hub: Arc<ConnectionHub>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
    hub.publish(WsEvent::system("Server shutting down")).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{LatencyProfile, MockChain};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let chain = Arc::new(MockChain::in_memory(LatencyProfile::none()));
        let state = AppState::new(chain, ApiConfig::default());
        build_router(state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_test_app();

        let (status, _) = send(&app, "GET", "/health/live", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "GET", "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["ws_connections"], 0);
    }

    #[tokio::test]
    async fn test_wallet_check_before_connect_is_unauthorized() {
        let app = create_test_app();

        let (status, body) = send(&app, "GET", "/api/v1/wallet", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "WALLET_NOT_CONNECTED");

        let (status, _) = send(&app, "POST", "/api/v1/wallet/connect?checkOnly=true", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wallet_connect_flow() {
        let app = create_test_app();

        let (status, body) = send(&app, "POST", "/api/v1/wallet/connect", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["address"], "0x1234567890123456789012345678901234567890");

        let (status, body) = send(&app, "GET", "/api/v1/wallet", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["connected"], true);

        let (status, _) = send(&app, "DELETE", "/api/v1/wallet", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", "/api/v1/wallet", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_check_always_true() {
        let app = create_test_app();
        let (status, body) = send(&app, "GET", "/api/v1/admins/anyone", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isAdmin"], true);
        assert_eq!(body["address"], "anyone");
    }

    #[tokio::test]
    async fn test_voter_status_endpoint() {
        let app = create_test_app();

        let (_, body) = send(
            &app,
            "GET",
            "/api/v1/voters/0x2345678901234567890123456789012345678901/status",
            None,
        )
        .await;
        assert_eq!(body["status"], "registered");

        let (_, body) = send(&app, "GET", "/api/v1/voters/0xnobody/status", None).await;
        assert_eq!(body["status"], "unregistered");
    }

    #[tokio::test]
    async fn test_list_voters() {
        let app = create_test_app();
        let (status, body) = send(&app, "GET", "/api/v1/voters", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5);
        assert_eq!(body["voters"][0]["hasVoted"], true);
        assert_eq!(body["voters"][0]["registrationDate"], "2024-04-01");
    }

    #[tokio::test]
    async fn test_cast_vote_out_of_range() {
        let app = create_test_app();
        let (status, body) =
            send(&app, "POST", "/api/v1/votes", Some(r#"{"candidateId": 42}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["candidateId"], 42);
        let tx = body["txHash"].as_str().unwrap();
        assert!(tx.starts_with("0x"));
        assert_eq!(tx.len(), 66);
    }

    #[tokio::test]
    async fn test_cast_vote_invalid_json() {
        let app = create_test_app();
        let (status, _) = send(&app, "POST", "/api/v1/votes", Some("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_results_and_candidates() {
        let app = create_test_app();

        let (_, body) = send(&app, "GET", "/api/v1/results", None).await;
        assert_eq!(body["totalVotes"], 156);
        assert_eq!(body["candidates"].as_array().unwrap().len(), 4);

        let (_, body) = send(&app, "GET", "/api/v1/candidates", None).await;
        let ballot = body.as_array().unwrap();
        assert_eq!(ballot.len(), 4);
        assert!(ballot[0].get("votes").is_none());
    }

    #[tokio::test]
    async fn test_election_lifecycle() {
        let app = create_test_app();

        let (_, body) = send(&app, "GET", "/api/v1/election", None).await;
        assert_eq!(body["active"], false);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/election",
            Some(r#"{"title": "Mayor", "startDate": "2024-06-01", "endDate": "2024-06-02"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);

        let (_, body) = send(&app, "GET", "/api/v1/election", None).await;
        assert_eq!(
            body,
            serde_json::json!({
                "active": true,
                "title": "Mayor",
                "startDate": "2024-06-01",
                "endDate": "2024-06-02",
            })
        );

        let (status, _) = send(&app, "DELETE", "/api/v1/election", None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, "GET", "/api/v1/election", None).await;
        assert_eq!(
            body,
            serde_json::json!({"active": false, "title": "", "startDate": "", "endDate": ""})
        );
    }

    #[tokio::test]
    async fn test_create_election_requires_fields() {
        let app = create_test_app();
        let (status, body) =
            send(&app, "POST", "/api/v1/election", Some(r#"{"title": "Mayor"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_registration() {
        let app = create_test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/registrations",
            Some(r#"{"name": "Ada", "email": "ada@example.com", "idNumber": "X1"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Ada");

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/registrations",
            Some(r#"{"name": "Ada"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
