//! Tool-calling response loop.

use std::sync::Arc;
use std::time::Duration;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::conversation::Conversation;
use super::log::{CycleLogEntry, LogEntryType};
use super::schema::{coerce, response_format_for, FinalReply};
use super::ResponderError;
use crate::config::Config;
use crate::llm::{ChatMessage, CompletionRequest, LlmClient, ModelReply, ResponseFormat, ToolRequest, ToolSchema};
use crate::tools::{render_tool_result, truncate_chars, Tool, ToolRegistry, TRUNCATED};

/// Model settings applied to every cycle.
#[derive(Debug, Clone)]
pub struct ResponderSettings {
    pub model: String,
    /// Tool round trips allowed before the cycle fails with `ToolLoopExceeded`.
    pub max_tool_rounds: usize,
    pub cycle_timeout: Option<Duration>,
    pub temperature: Option<f32>,
}

impl ResponderSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tool_rounds: crate::config::DEFAULT_MAX_TOOL_ROUNDS,
            cycle_timeout: None,
            temperature: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.llm.model.clone(),
            max_tool_rounds: config.max_tool_rounds,
            cycle_timeout: config.cycle_timeout,
            temperature: config.llm.temperature,
        }
    }
}

/// Result of a completed cycle.
#[derive(Debug, Clone)]
pub struct CycleOutput<T> {
    pub answer: T,
    pub log: Vec<CycleLogEntry>,
    pub model_calls: usize,
    pub tool_calls: usize,
}

/// Drives one model conversation through any number of tool round trips.
pub struct ToolCallingResponder {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    tool_schemas: Vec<ToolSchema>,
    settings: ResponderSettings,
}

struct CycleState {
    log: Vec<CycleLogEntry>,
    model_calls: usize,
    tool_calls: usize,
}

impl ToolCallingResponder {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry, settings: ResponderSettings) -> Self {
        let tool_schemas = tools.get_tool_schemas();
        Self {
            llm,
            tools,
            tool_schemas,
            settings,
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run a cycle whose final answer must deserialize into `T`.
    pub async fn respond<T>(&self, system_prompt: &str, user_query: &str) -> Result<CycleOutput<T>, ResponderError>
    where
        T: DeserializeOwned + JsonSchema,
    {
        self.respond_with_history(system_prompt, &[], user_query).await
    }

    /// Like [`respond`](Self::respond), with earlier chat turns placed between
    /// the system prompt and the query.
    pub async fn respond_with_history<T>(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_query: &str,
    ) -> Result<CycleOutput<T>, ResponderError>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let format = response_format_for::<T>();
        let conversation = Conversation::start(system_prompt, history, user_query);
        let (reply, state) = self.run_cycle(conversation, Some(&format)).await?;

        let answer = coerce::<T>(reply).inspect_err(|e| {
            if let ResponderError::ParseFailure { reason, .. } = e {
                tracing::warn!("Final reply did not match schema: {}", reason);
            }
        })?;

        Ok(CycleOutput {
            answer,
            log: state.log,
            model_calls: state.model_calls,
            tool_calls: state.tool_calls,
        })
    }

    /// Run a cycle whose final answer is free text.
    pub async fn respond_text(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_query: &str,
    ) -> Result<CycleOutput<String>, ResponderError> {
        let conversation = Conversation::start(system_prompt, history, user_query);
        let (reply, state) = self.run_cycle(conversation, None).await?;

        Ok(CycleOutput {
            answer: reply.into_text(),
            log: state.log,
            model_calls: state.model_calls,
            tool_calls: state.tool_calls,
        })
    }

    async fn run_cycle(
        &self,
        conversation: Conversation,
        format: Option<&ResponseFormat>,
    ) -> Result<(FinalReply, CycleState), ResponderError> {
        match self.settings.cycle_timeout {
            Some(limit) => tokio::time::timeout(limit, self.drive(conversation, format))
                .await
                .map_err(|_| ResponderError::Timeout(limit))?,
            None => self.drive(conversation, format).await,
        }
    }

    async fn drive(
        &self,
        mut conversation: Conversation,
        format: Option<&ResponseFormat>,
    ) -> Result<(FinalReply, CycleState), ResponderError> {
        let mut state = CycleState {
            log: Vec::new(),
            model_calls: 0,
            tool_calls: 0,
        };
        let mut rounds = 0;

        loop {
            tracing::debug!("Model call {} (tool rounds so far: {})", state.model_calls + 1, rounds);

            let reply = self
                .llm
                .chat_completion(CompletionRequest {
                    model: &self.settings.model,
                    messages: conversation.turns(),
                    tools: &self.tool_schemas,
                    response_format: format,
                    temperature: self.settings.temperature,
                })
                .await?;
            state.model_calls += 1;

            let (content, requests) = match reply {
                ModelReply::ToolRequests { content, requests } if !requests.is_empty() => (content, requests),
                ModelReply::ToolRequests { content, .. } => {
                    let text = content.unwrap_or_default();
                    let state = state.finish_response(&text);
                    return Ok((FinalReply::Text(text), state));
                }
                ModelReply::FinalText(text) => {
                    let state = state.finish_response(&text);
                    return Ok((FinalReply::Text(text), state));
                }
                ModelReply::FinalStructured(value) => {
                    let state = state.finish_response(&value.to_string());
                    return Ok((FinalReply::Structured(value), state));
                }
            };

            if rounds >= self.settings.max_tool_rounds {
                tracing::warn!(
                    "Model still requesting tools after {} rounds; aborting cycle",
                    self.settings.max_tool_rounds
                );
                return Err(ResponderError::ToolLoopExceeded {
                    max_rounds: self.settings.max_tool_rounds,
                });
            }
            rounds += 1;

            // Every name must resolve before any tool runs.
            let resolved = requests
                .iter()
                .map(|request| {
                    self.tools
                        .get(&request.name)
                        .cloned()
                        .map(|tool| (tool, request))
                        .ok_or_else(|| ResponderError::UnknownTool {
                            name: request.name.clone(),
                            arguments: request.arguments.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            conversation.push_tool_requests(content, &requests);

            for (tool, request) in resolved {
                let rendered = self.execute_tool(tool.as_ref(), request, &mut state).await?;
                conversation.push_tool_result(request, &rendered);
            }
        }
    }

    async fn execute_tool(
        &self,
        tool: &dyn Tool,
        request: &ToolRequest,
        state: &mut CycleState,
    ) -> Result<String, ResponderError> {
        let args_display = Value::Object(request.arguments.clone());
        tracing::info!("Model invoked tool: {} | Args: {}", request.name, args_display);
        state.push(
            LogEntryType::ToolCall,
            format!("Calling tool: {} with args: {}", request.name, args_display),
        );

        state.tool_calls += 1;
        let result = tool.execute(&request.arguments).await.map_err(|source| {
            tracing::warn!("Tool {} failed: {}", request.name, source);
            ResponderError::ToolExecution {
                name: request.name.clone(),
                arguments: request.arguments.clone(),
                source,
            }
        })?;

        let rendered = render_tool_result(&result);
        tracing::info!("Tool result snippet: {}", truncate_chars(&rendered, 300, TRUNCATED));
        state.push(LogEntryType::ToolResult, truncate_chars(&rendered, 1000, TRUNCATED));
        Ok(rendered)
    }
}

impl CycleState {
    fn push(&mut self, entry_type: LogEntryType, content: String) {
        self.log.push(CycleLogEntry::now(entry_type, content));
    }

    fn finish_response(mut self, content: &str) -> Self {
        self.push(LogEntryType::Response, truncate_chars(content, 2000, TRUNCATED));
        self
    }
}
