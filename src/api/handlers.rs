//! API handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;

use super::types::ApiResponse;
use super::types::AskRequest;
use super::types::AskResponse;
use super::types::CorpusResponse;
use super::types::HealthResponse;
use crate::faq::FaqService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FaqService>,
}

/// Health check
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Answer a question
pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<ApiResponse<AskResponse>>, StatusCode> {
    info!("POST /api/ask: {}", req.question);

    if req.question.trim().is_empty() {
        return Ok(Json(ApiResponse::error("question must not be empty")));
    }

    match state.service.answer(&req.question).await {
        Ok(reply) => Ok(Json(ApiResponse::success(AskResponse::from(reply)))),
        Err(e) => {
            error!("Error answering question: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Corpus statistics
pub async fn corpus_stats(State(state): State<AppState>) -> Json<ApiResponse<CorpusResponse>> {
    Json(ApiResponse::success(CorpusResponse {
        questions: state.service.corpus_len(),
    }))
}

/// Force a corpus reload from the store
pub async fn corpus_reload(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CorpusResponse>>, StatusCode> {
    match state.service.reload_corpus().await {
        Ok(questions) => {
            info!("Corpus reloaded via API: {} questions", questions);
            Ok(Json(ApiResponse::success(CorpusResponse { questions })))
        }
        Err(e) => {
            error!("Error reloading corpus: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
