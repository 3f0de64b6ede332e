use std::path::PathBuf;
use std::sync::Arc;

use super::{maybe_save, prompts, reports_dir, AssistantError, AssistantOutput};
use crate::agent::{build_system_prompt, ResponderSettings, ToolCallingResponder};
use crate::config::Config;
use crate::llm::LlmClient;
use crate::records::LiteratureReview;
use crate::tools::{presets, ToolRegistry};

/// Finds papers on a topic and returns them as a [`LiteratureReview`].
pub struct LiteratureReviewer {
    responder: ToolCallingResponder,
    system_prompt: String,
    reports_dir: Option<PathBuf>,
}

impl LiteratureReviewer {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry, settings: ResponderSettings) -> Self {
        let system_prompt = build_system_prompt(prompts::LITERATURE_REVIEW, &tools);
        Self {
            responder: ToolCallingResponder::new(llm, tools, settings),
            system_prompt,
            reports_dir: None,
        }
    }

    pub fn from_config(llm: Arc<dyn LlmClient>, config: &Config) -> Self {
        let mut reviewer = Self::new(
            llm,
            presets::literature_review(config),
            ResponderSettings::from_config(config),
        );
        reviewer.reports_dir = reports_dir(config);
        reviewer
    }

    /// Save each completed review under `dir`.
    pub fn with_reports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reports_dir = Some(dir.into());
        self
    }

    /// A clarifying question for a broad topic comes back as a `ParseFailure`
    /// carrying the question as raw text.
    pub async fn review(&self, query: &str) -> Result<AssistantOutput<LiteratureReview>, AssistantError> {
        tracing::info!("Literature review for: {}", query);
        let output = self
            .responder
            .respond::<LiteratureReview>(&self.system_prompt, query)
            .await?;

        let report_path = maybe_save(
            self.reports_dir.as_deref(),
            "literature_review",
            query,
            &output.answer,
        )
        .await?;

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
    use crate::agent::ResponderError;
    use crate::llm::scripted::{tool_reply, ScriptedLlmClient};
    use crate::llm::{ModelReply, Role};
    use crate::tools::testing::{as_tool, RecordingTool};
    use serde_json::json;

    fn review_json() -> serde_json::Value {
        json!({
            "topic": "GNNs for drug discovery",
            "papers": [{
                "title": "Graph networks for molecules",
                "authors": ["A. Author"],
                "year": 2023,
                "link": "https://arxiv.org/abs/2301.00001",
                "abstract": "We study molecules.",
                "key_contribution": "A new message passing scheme",
                "relevance": "Direct application"
            }],
            "summary": null
        })
    }

    #[tokio::test]
    async fn searches_then_saves_review() {
        let llm = Arc::new(ScriptedLlmClient::new(vec![
            tool_reply("c1", "arxiv", json!({"query": "graph neural networks drug discovery"})),
            ModelReply::FinalStructured(review_json()),
        ]));
        let arxiv = RecordingTool::returning("arxiv", json!("Title: Graph networks for molecules"));
        let dir = tempfile::tempdir().unwrap();
        let reviewer = LiteratureReviewer::new(
            llm.clone(),
            ToolRegistry::from_tools([as_tool(&arxiv)]),
            ResponderSettings::new("test/model"),
        )
        .with_reports_dir(dir.path());

        let output = reviewer.review("GNNs for drug discovery").await.unwrap();

        assert_eq!(output.answer.papers.len(), 1);
        assert_eq!(output.answer.papers[0].year, Some(2023));
        assert_eq!(arxiv.invocation_count(), 1);

        let path = output.report_path.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("literature_review_GNNs_for_drug_discovery_"));
        let saved: LiteratureReview = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, output.answer);

        let first = &llm.calls()[0];
        assert_eq!(first.messages[0].role, Role::System);
        assert!(first.messages[0]
            .content
            .as_deref()
            .unwrap()
            .contains("- **arxiv**"));
        assert_eq!(first.messages[1].content.as_deref(), Some("GNNs for drug discovery"));
        assert!(first.response_format.is_some());
    }

    #[tokio::test]
    async fn clarifying_question_surfaces_as_raw_text() {
        let question = "Your query seems broad. Could you specify the application?";
        let llm = Arc::new(ScriptedLlmClient::new(vec![ModelReply::FinalText(question.to_string())]));
        let reviewer = LiteratureReviewer::new(llm, ToolRegistry::new(), ResponderSettings::new("test/model"));

        let err = reviewer.review("Robotics").await.unwrap_err();

        match err {
            AssistantError::Responder(ResponderError::ParseFailure { raw, .. }) => assert_eq!(raw, question),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_report_without_directory() {
        let llm = Arc::new(ScriptedLlmClient::new(vec![ModelReply::FinalStructured(review_json())]));
        let reviewer = LiteratureReviewer::new(llm, ToolRegistry::new(), ResponderSettings::new("test/model"));

        let output = reviewer.review("GNNs").await.unwrap();
        assert!(output.report_path.is_none());
        assert_eq!(output.log.len(), 1);
    }

    #[tokio::test]
    async fn without_web_search_prompt_names_only_registered_tools() {
        let llm = Arc::new(ScriptedLlmClient::new(vec![ModelReply::FinalStructured(review_json())]));
        let config = Config::new("k".to_string(), "test/model".to_string(), PathBuf::from("unused"));
        let reviewer = LiteratureReviewer::from_config(llm.clone(), &config);

        reviewer.review("GNNs").await.unwrap();

        let call = &llm.calls()[0];
        assert_eq!(call.tool_names, vec!["arxiv"]);
        let system = call.messages[0].content.as_deref().unwrap();
        assert!(!system.contains("tavily_search"));
    }
}
