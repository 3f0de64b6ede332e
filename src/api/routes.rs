//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::types::{
    AnswerResponse, ErrorResponse, HealthResponse, IdeationRequest, IdeationResponse, QueryRequest,
};
use crate::agent::ResponderError;
use crate::assistants::{AssistantError, AssistantOutput, Assistants};
use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient};
use crate::records::{ConferenceList, LiteratureReview, StageDecision};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub assistants: Arc<Assistants>,
}

impl AppState {
    pub fn new(config: Config, llm: Arc<dyn LlmClient>) -> Self {
        let assistants = Assistants::from_config(llm, &config);
        Self {
            config: Arc::new(config),
            assistants: Arc::new(assistants),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/route", post(route_query))
        .route("/api/literature-review", post(literature_review))
        .route("/api/conferences", post(conferences))
        .route("/api/ideation", post(ideation))
        .with_state(state)
}

/// Handler failure rendered as a JSON error body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                error: message.to_string(),
                raw: None,
            },
        }
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        let error = err.to_string();
        let (status, raw) = match err {
            AssistantError::Responder(ResponderError::ParseFailure { raw, .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Some(raw))
            }
            AssistantError::Responder(ResponderError::Timeout(_)) => (StatusCode::GATEWAY_TIMEOUT, None),
            AssistantError::Responder(_) => (StatusCode::BAD_GATEWAY, None),
            AssistantError::Report(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", error);
        }
        Self {
            status,
            body: ErrorResponse { error, raw },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn require_query(query: &str) -> Result<&str, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ApiError::bad_request("query is required"));
    }
    Ok(query)
}

fn answer_response<T>(output: AssistantOutput<T>) -> Json<AnswerResponse<T>> {
    Json(AnswerResponse {
        answer: output.answer,
        report_path: output.report_path,
        log: output.log,
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.config.llm.model.clone(),
    })
}

async fn route_query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<StageDecision>, ApiError> {
    let query = require_query(&req.query)?;
    Ok(Json(state.assistants.router.route(query).await?))
}

async fn literature_review(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<AnswerResponse<LiteratureReview>>, ApiError> {
    let query = require_query(&req.query)?;
    let output = state.assistants.literature.review(query).await?;
    Ok(answer_response(output))
}

async fn conferences(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<AnswerResponse<ConferenceList>>, ApiError> {
    let query = require_query(&req.query)?;
    let output = state.assistants.conferences.find(query).await?;
    Ok(answer_response(output))
}

async fn ideation(
    State(state): State<AppState>,
    Json(req): Json<IdeationRequest>,
) -> Result<Json<IdeationResponse>, ApiError> {
    let query = require_query(&req.query)?;
    let history: Vec<ChatMessage> = req.history.iter().map(ChatMessage::from).collect();
    let reply = state.assistants.ideation.reply(query, &history).await?;
    Ok(Json(IdeationResponse { reply: reply.reply }))
}
