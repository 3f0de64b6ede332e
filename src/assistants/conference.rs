use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use super::{maybe_save, prompts, reports_dir, AssistantError, AssistantOutput};
use crate::agent::{build_system_prompt, ResponderSettings, ToolCallingResponder};
use crate::config::Config;
use crate::llm::LlmClient;
use crate::records::ConferenceList;
use crate::tools::{presets, ToolRegistry};

/// Lists upcoming conferences for a research area.
pub struct ConferenceFinder {
    responder: ToolCallingResponder,
    reports_dir: Option<PathBuf>,
}

impl ConferenceFinder {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry, settings: ResponderSettings) -> Self {
        Self {
            responder: ToolCallingResponder::new(llm, tools, settings),
            reports_dir: None,
        }
    }

    pub fn from_config(llm: Arc<dyn LlmClient>, config: &Config) -> Self {
        let tools = presets::conference_search(config);
        if tools.get("tavily_search").is_none() {
            tracing::error!(
                "Conference search has no web search tool; WikiCFP listings are unreachable without TAVILY_API_KEY"
            );
        }
        let mut finder = Self::new(llm, tools, ResponderSettings::from_config(config));
        finder.reports_dir = reports_dir(config);
        finder
    }

    pub fn with_reports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reports_dir = Some(dir.into());
        self
    }

    pub async fn find(&self, query: &str) -> Result<AssistantOutput<ConferenceList>, AssistantError> {
        self.find_as_of(query, Local::now().date_naive()).await
    }

    /// Search for events after `today`.
    pub async fn find_as_of(
        &self,
        query: &str,
        today: NaiveDate,
    ) -> Result<AssistantOutput<ConferenceList>, AssistantError> {
        tracing::info!("Conference search for: {}", query);
        let role_prompt = prompts::conference_finder(&today.format("%Y-%m-%d").to_string());
        let system_prompt = build_system_prompt(&role_prompt, self.responder.tools());

        let output = self
            .responder
            .respond::<ConferenceList>(&system_prompt, &format!("Find conferences for: {query}"))
            .await?;

        let report_path = maybe_save(self.reports_dir.as_deref(), "conferences", query, &output.answer).await?;

        Ok(AssistantOutput {
            answer: output.answer,
            log: output.log,
            report_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::scripted::{tool_reply, ScriptedLlmClient};
    use crate::llm::ModelReply;
    use crate::tools::testing::{as_tool, RecordingTool};
    use serde_json::json;

    #[tokio::test]
    async fn prompt_carries_date_and_query() {
        let llm = Arc::new(ScriptedLlmClient::new(vec![
            tool_reply("c1", "tavily_search", json!({"query": "robotics conference 2027"})),
            ModelReply::FinalText(
                "```json\n{\"topic\": \"robotics\", \"conferences\": [{\"conference_name\": \"ICRA 2027\", \"date\": \"2027-05-31\"}]}\n```"
                    .to_string(),
            ),
        ]));
        let search = RecordingTool::returning("tavily_search", json!({"results": [{"title": "ICRA 2027"}]}));
        let dir = tempfile::tempdir().unwrap();
        let finder = ConferenceFinder::new(
            llm.clone(),
            ToolRegistry::from_tools([as_tool(&search)]),
            ResponderSettings::new("test/model"),
        )
        .with_reports_dir(dir.path());

        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let output = finder.find_as_of("robotics", today).await.unwrap();

        assert_eq!(output.answer.conferences[0].conference_name, "ICRA 2027");
        assert!(output.answer.conferences[0].location.is_none());

        let first = &llm.calls()[0];
        let system = first.messages[0].content.as_deref().unwrap();
        assert!(system.contains("after 2026-10-18"));
        assert!(system.contains("- **tavily_search**"));
        assert_eq!(first.messages[1].content.as_deref(), Some("Find conferences for: robotics"));

        let path = output.report_path.unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("conferences_robotics_"));
    }

    #[tokio::test]
    async fn without_web_search_prompt_names_only_registered_tools() {
        let llm = Arc::new(ScriptedLlmClient::new(vec![ModelReply::FinalStructured(
            json!({"topic": "robotics", "conferences": []}),
        )]));
        let config = Config::new("k".to_string(), "test/model".to_string(), PathBuf::from("unused"));
        let finder = ConferenceFinder::from_config(llm.clone(), &config);

        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let output = finder.find_as_of("robotics", today).await.unwrap();

        assert!(output.answer.conferences.is_empty());
        assert!(output.report_path.is_none());
        let call = &llm.calls()[0];
        assert_eq!(call.tool_names, vec!["arxiv"]);
        let system = call.messages[0].content.as_deref().unwrap();
        assert!(system.contains("- **arxiv**"));
        assert!(!system.contains("tavily_search"));
    }
}
