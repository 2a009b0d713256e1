//! proctord library - proctoring and test-evaluation backend
//!
//! Records proctoring violation events, proxies prompts to a hosted
//! chat-completion API, and scores submitted test answers by delegating
//! evaluation to the same model.

use sqlx::SqlitePool;
use std::sync::Arc;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;

pub use config::Config;
pub use error::{Error, Result};

use services::CompletionClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, opened once at startup
    pub db: SqlitePool,
    /// Completion provider client, built once at startup
    pub completion: Arc<CompletionClient>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, completion: Arc<CompletionClient>) -> Self {
        Self { db, completion }
    }
}

/// Build application router
///
/// All endpoints are unauthenticated; CORS is fully permissive for
/// browser-based clients.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::routing::{get, post};
    use tower_http::cors::CorsLayer;

    axum::Router::new()
        .route("/log-violation", post(api::log_violation))
        .route("/violations", get(api::get_violations))
        .route("/generate-ai-response", post(api::generate_ai_response))
        .route("/submit-test", post(api::submit_test))
        .route("/build_info", get(api::get_build_info))
        .merge(api::health_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
}
