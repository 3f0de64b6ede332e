//! API request and response types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::agent::CycleLogEntry;
use crate::llm::ChatMessage;

/// A single query for the router, literature review or conference search.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Structured answer of a review or conference search.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse<T> {
    pub answer: T,

    /// Where the report was saved, when saving is enabled
    pub report_path: Option<PathBuf>,

    /// Tool calls and the final response of the cycle
    pub log: Vec<CycleLogEntry>,
}

/// A chat turn as sent by clients.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryTurn {
    pub role: HistoryRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
}

impl From<&HistoryTurn> for ChatMessage {
    fn from(turn: &HistoryTurn) -> Self {
        match turn.role {
            HistoryRole::User => ChatMessage::user(turn.content.clone()),
            HistoryRole::Assistant => ChatMessage::assistant(turn.content.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdeationRequest {
    pub query: String,

    /// Earlier turns of the conversation, oldest first
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdeationResponse {
    pub reply: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Model answering requests
    pub model: String,
}

/// Error body; `raw` holds the model text that failed to parse.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}
