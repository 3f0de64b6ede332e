use std::sync::Arc;

use super::{prompts, AssistantError};
use crate::agent::{ResponderSettings, ToolCallingResponder};
use crate::config::Config;
use crate::llm::LlmClient;
use crate::records::StageDecision;
use crate::tools::ToolRegistry;

/// Picks the assistant for a query. Uses no tools.
pub struct StageRouter {
    responder: ToolCallingResponder,
}

impl StageRouter {
    pub fn new(llm: Arc<dyn LlmClient>, settings: ResponderSettings) -> Self {
        Self {
            responder: ToolCallingResponder::new(llm, ToolRegistry::new(), settings),
        }
    }

    pub fn from_config(llm: Arc<dyn LlmClient>, config: &Config) -> Self {
        Self::new(llm, ResponderSettings::from_config(config))
    }

    pub async fn route(&self, query: &str) -> Result<StageDecision, AssistantError> {
        let output = self
            .responder
            .respond::<StageDecision>(prompts::STAGE_ROUTER.trim(), query)
            .await?;
        tracing::info!("Routing '{}' to {:?}", query, output.answer.trigger_agent);
        Ok(output.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::scripted::ScriptedLlmClient;
    use crate::llm::ModelReply;
    use crate::records::Stage;
    use serde_json::json;

    #[tokio::test]
    async fn routes_with_schema_and_no_tools() {
        let llm = Arc::new(ScriptedLlmClient::new(vec![ModelReply::FinalStructured(
            json!({"trigger_agent": "conference_agent"}),
        )]));
        let router = StageRouter::new(llm.clone(), ResponderSettings::new("test/model"));

        let decision = router.route("Where can I submit my NLP paper?").await.unwrap();

        assert_eq!(decision.trigger_agent, Stage::ConferenceAgent);
        let call = &llm.calls()[0];
        assert!(call.tool_names.is_empty());
        assert!(call.response_format.is_some());
    }

    #[tokio::test]
    async fn unknown_stage_is_a_parse_failure() {
        let llm = Arc::new(ScriptedLlmClient::new(vec![ModelReply::FinalStructured(
            json!({"trigger_agent": "coffee_agent"}),
        )]));
        let router = StageRouter::new(llm, ResponderSettings::new("test/model"));

        let err = router.route("coffee?").await.unwrap_err();
        assert!(matches!(
            err,
            AssistantError::Responder(crate::agent::ResponderError::ParseFailure { .. })
        ));
    }
}
