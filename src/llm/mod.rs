//! LLM client module.
//!
//! The responder talks to the model through [`LlmClient`]; the concrete
//! [`OpenRouterClient`] speaks the OpenAI-compatible chat completions protocol
//! and classifies every reply into a [`ModelReply`] before returning it.

mod openrouter;
#[cfg(test)]
pub(crate) mod scripted;
mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use openrouter::OpenRouterClient;
pub use types::{
    ChatMessage, CompletionRequest, FunctionCall, FunctionSchema, JsonSchemaFormat, ModelReply,
    ResponseFormat, Role, ToolCall, ToolRequest, ToolSchema,
};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request to model endpoint failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model endpoint returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("Tool call '{name}' has malformed arguments {arguments:?}: {source}")]
    MalformedToolArguments {
        name: String,
        arguments: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A model endpoint able to run one chat completion.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat_completion(&self, request: CompletionRequest<'_>) -> Result<ModelReply, LlmError>;
}
