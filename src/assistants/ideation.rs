use std::sync::Arc;

use super::{prompts, AssistantError};
use crate::agent::{build_system_prompt, ResponderSettings, ToolCallingResponder};
use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient};
use crate::records::{IdeationKind, QueryLevel, Technique};
use crate::tools::{presets, ToolRegistry};

/// Chat partner for shaping research and product ideas.
///
/// Every reply takes two cycles: a tool-free one that classifies the query
/// into a [`QueryLevel`], then the answering cycle with the matching prompt.
pub struct IdeationMentor {
    classifier: ToolCallingResponder,
    responder: ToolCallingResponder,
}

/// Reply text plus the level it was answered at.
#[derive(Debug, Clone)]
pub struct IdeationReply {
    pub reply: String,
    pub level: QueryLevel,
}

impl IdeationMentor {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry, settings: ResponderSettings) -> Self {
        Self {
            classifier: ToolCallingResponder::new(llm.clone(), ToolRegistry::new(), settings.clone()),
            responder: ToolCallingResponder::new(llm, tools, settings),
        }
    }

    pub fn from_config(llm: Arc<dyn LlmClient>, config: &Config) -> Self {
        Self::new(llm, presets::ideation(config), ResponderSettings::from_config(config))
    }

    pub async fn classify(&self, query: &str) -> Result<QueryLevel, AssistantError> {
        let output = self
            .classifier
            .respond::<QueryLevel>(prompts::IDEATION_LEVEL.trim(), query)
            .await?;
        tracing::debug!("Ideation level: {:?}", output.answer);
        Ok(output.answer)
    }

    pub async fn reply(&self, query: &str, history: &[ChatMessage]) -> Result<IdeationReply, AssistantError> {
        let level = self.classify(query).await?;
        let system_prompt = build_system_prompt(&compose_prompt(level), self.responder.tools());

        let output = self.responder.respond_text(&system_prompt, history, query).await?;
        Ok(IdeationReply {
            reply: output.answer,
            level,
        })
    }
}

/// Technique prompt followed by the task-kind prompt.
pub(crate) fn compose_prompt(level: QueryLevel) -> String {
    let technique = match level.technique {
        Technique::Basic => prompts::IDEATION_BASIC,
        Technique::ChainOfThought => prompts::IDEATION_CHAIN_OF_THOUGHT,
    };
    let kind = match level.kind {
        IdeationKind::ProductBased => prompts::IDEATION_PRODUCT,
        IdeationKind::DepthResearch => prompts::IDEATION_DEPTH_RESEARCH,
    };
    format!("{}\n\n{}", technique.trim(), kind.trim())
}
