//! HTTP server implementation

use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::BoxError;
use axum::Router;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::embeddings::EmbeddingService;
use crate::faq::FaqService;
use crate::llm::LlmService;
use crate::store::PgStore;
use crate::Result;

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("Starting faqrag API server...");

    // Initialize services
    let store = PgStore::from_config(config).await?;
    store.ensure_schema().await?;

    let embedding_service = Arc::new(EmbeddingService::new(config)?);
    let llm_service = Arc::new(LlmService::new(config)?);

    let service = Arc::new(FaqService::new(
        Arc::new(store),
        embedding_service,
        llm_service,
    ));
    service.init().await?;

    serve_with_service(service, host, port, enable_cors).await
}

/// Start the API server around an already-built engine
pub async fn serve_with_service(
    service: Arc<FaqService>,
    host: String,
    port: u16,
    enable_cors: bool,
) -> Result<()> {
    let state = AppState { service };

    let api_router = routes::api_routes(state);

    // One request is at most one encoder inference plus a store or generator
    // round trip; anything longer than the client timeouts is stuck.
    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|_: BoxError| async {
                    StatusCode::REQUEST_TIMEOUT
                }))
                .layer(TimeoutLayer::new(Duration::from_secs(150))),
        );

    if enable_cors {
        info!("CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{addr}");
    info!("Available endpoints:");
    info!("  GET  /api/health        - Health check");
    info!("  POST /api/ask           - Answer a question");
    info!("  GET  /api/corpus        - Corpus statistics");
    info!("  POST /api/corpus/reload - Reload corpus from store");

    axum::serve(listener, app).await?;

    Ok(())
}
