//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // FAQ endpoints
        .route("/ask", post(handlers::ask))
        // Corpus endpoints
        .route("/corpus", get(handlers::corpus_stats))
        .route("/corpus/reload", post(handlers::corpus_reload))
        .with_state(state)
}
