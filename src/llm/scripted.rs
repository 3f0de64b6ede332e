//! Scripted model client for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{ChatMessage, CompletionRequest, LlmClient, LlmError, ModelReply, ResponseFormat, ToolRequest};

/// What the scripted client saw on one call.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub tool_names: Vec<String>,
    pub response_format: Option<ResponseFormat>,
}

/// Replays a fixed queue of replies and records every request.
pub(crate) struct ScriptedLlmClient {
    replies: Mutex<VecDeque<ModelReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedLlmClient {
    pub fn new(replies: Vec<ModelReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn chat_completion(&self, request: CompletionRequest<'_>) -> Result<ModelReply, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: request.messages.to_vec(),
            tool_names: request.tools.iter().map(|t| t.function.name.clone()).collect(),
            response_format: request.response_format.cloned(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::InvalidResponse("script exhausted".to_string()))
    }
}

/// A reply requesting a single tool.
pub(crate) fn tool_reply(id: &str, name: &str, arguments: Value) -> ModelReply {
    ModelReply::ToolRequests {
        content: None,
        requests: vec![request(id, name, arguments)],
    }
}

pub(crate) fn request(id: &str, name: &str, arguments: Value) -> ToolRequest {
    let arguments = match arguments {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    ToolRequest {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}
