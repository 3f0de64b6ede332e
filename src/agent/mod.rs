//! Agent module - the tool-calling response loop.
//!
//! A response cycle follows the "tools in a loop" pattern:
//! 1. Build the conversation from system prompt, prior turns and user query
//! 2. Call the model with the available tools and the expected output schema
//! 3. If the model requests tools, run them in order and feed the results back
//! 4. Repeat until the model answers, then coerce the answer into the schema
//!
//! The number of tool round trips is bounded; see [`ResponderSettings`].

mod conversation;
mod log;
mod prompt;
mod responder;
mod schema;

use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::llm::LlmError;

pub use conversation::Conversation;
pub use log::{CycleLogEntry, LogEntryType};
pub use prompt::build_system_prompt;
pub use responder::{CycleOutput, ResponderSettings, ToolCallingResponder};
pub use schema::{coerce, response_format_for, FinalReply};

/// Ways a response cycle can end without an answer.
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("Model requested unknown tool '{name}' with args {}", args(.arguments))]
    UnknownTool {
        name: String,
        arguments: Map<String, Value>,
    },

    #[error("Tool '{name}' failed with args {}: {source}", args(.arguments))]
    ToolExecution {
        name: String,
        arguments: Map<String, Value>,
        #[source]
        source: anyhow::Error,
    },

    #[error("Model kept requesting tools after {max_rounds} round trips")]
    ToolLoopExceeded { max_rounds: usize },

    #[error("Model reply did not match the output schema: {reason}")]
    ParseFailure { raw: String, reason: String },

    #[error(transparent)]
    Model(#[from] LlmError),

    #[error("Response cycle timed out after {0:?}")]
    Timeout(Duration),
}

fn args(arguments: &Map<String, Value>) -> String {
    Value::Object(arguments.clone()).to_string()
}
