//! OpenAI-compatible chat completions client (OpenRouter by default).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::types::{CompletionRequest, ModelReply, ToolCall, ToolRequest};
use super::{LlmClient, LlmError};
use crate::config::{LlmConfig, DEFAULT_BASE_URL};
use crate::tools::{truncate_chars, TRUNCATED};

/// Chat completions client for OpenRouter or any endpoint speaking the same protocol.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(180))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn chat_completion(&self, request: CompletionRequest<'_>) -> Result<ModelReply, LlmError> {
        let mut body = json!({
            "model": request.model,
            "messages": request.messages,
        });
        if !request.tools.is_empty() {
            body["tools"] = json!(request.tools);
        }
        if let Some(format) = request.response_format {
            body["response_format"] = json!(format);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::InvalidResponse(format!("{}: {}", e, truncate_chars(&text, 500, TRUNCATED))))?;
        parse_reply(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

/// Classify the first choice of a completion into a [`ModelReply`].
///
/// List-shaped content (content blocks) is flattened to its first text block;
/// any further blocks are dropped.
fn parse_reply(response: CompletionResponse) -> Result<ModelReply, LlmError> {
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| LlmError::InvalidResponse("response has no choices".to_string()))?;

    let tool_calls = message.tool_calls.unwrap_or_default();
    if !tool_calls.is_empty() {
        let requests = tool_calls
            .into_iter()
            .enumerate()
            .map(|(index, call)| decode_tool_call(index, call))
            .collect::<Result<Vec<_>, _>>()?;
        let content = message.content.and_then(|c| flatten_text(&c)).filter(|s| !s.is_empty());
        return Ok(ModelReply::ToolRequests { content, requests });
    }

    Ok(match message.content {
        Some(Value::Object(map)) => ModelReply::FinalStructured(Value::Object(map)),
        Some(content) => ModelReply::FinalText(flatten_text(&content).unwrap_or_default()),
        None => ModelReply::FinalText(String::new()),
    })
}

fn flatten_text(content: &Value) -> Option<String> {
    match content {
        Value::String(s) => Some(s.clone()),
        Value::Array(blocks) => blocks.iter().find_map(|block| match block {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map.get("text").and_then(Value::as_str).map(str::to_string),
            _ => None,
        }),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn decode_tool_call(index: usize, call: ToolCall) -> Result<ToolRequest, LlmError> {
    let raw = call.function.arguments.trim();
    let arguments = if raw.is_empty() {
        Map::new()
    } else {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(Value::Null) => Map::new(),
            Ok(other) => {
                return Err(LlmError::InvalidResponse(format!(
                    "tool call '{}' arguments are not an object: {}",
                    call.function.name, other
                )))
            }
            Err(source) => {
                return Err(LlmError::MalformedToolArguments {
                    name: call.function.name,
                    arguments: call.function.arguments,
                    source,
                })
            }
        }
    };

    let id = if call.id.is_empty() {
        format!("call_{}", index)
    } else {
        call.id
    };

    Ok(ToolRequest {
        id,
        name: call.function.name,
        arguments,
    })
}
