//! HTTP API for the research assistants.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - Health check
//! - `POST /api/route` - Pick the assistant for a query
//! - `POST /api/literature-review` - Papers for a topic
//! - `POST /api/conferences` - Upcoming conferences for a topic
//! - `POST /api/ideation` - Chat about a project idea

mod routes;
pub mod types;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::llm::OpenRouterClient;

pub use routes::{router, ApiError, AppState};

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let llm = Arc::new(OpenRouterClient::from_config(&config.llm)?);
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, llm);

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
