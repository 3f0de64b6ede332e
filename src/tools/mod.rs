//! Tools the model can ask the responder to run.
//!
//! Every tool implements [`Tool`]; a [`ToolRegistry`] maps names to tools and
//! produces the declarations sent to the model. The responder never assumes
//! which concrete tools exist.

mod arxiv;
pub mod presets;
mod tavily;
mod wikipedia;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::llm::ToolSchema;

pub use arxiv::ArxivSearch;
pub use tavily::{SearchDepth, TavilySearch};
pub use wikipedia::WikipediaLookup;

/// A callable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the model uses to request this tool.
    fn name(&self) -> &str;

    /// Description shown to the model.
    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters_schema(&self) -> Value;

    /// Run the tool. The result is either plain text (`Value::String`) or structured JSON.
    async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<Value>;
}

/// Name and description of a registered tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Name-indexed, ordered set of tools.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tools(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool);
        }
        registry
    }

    /// Register a tool. The first registration of a name wins; later ones are
    /// ignored with a warning. Returns whether the tool was added.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> bool {
        let name = tool.name().to_string();
        if self.by_name.contains_key(&name) {
            tracing::warn!("Ignoring duplicate tool registration: {}", name);
            return false;
        }
        self.by_name.insert(name, self.tools.len());
        self.tools.push(tool);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.by_name.get(name).map(|&i| &self.tools[i])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Function declarations in registration order.
    pub fn get_tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .iter()
            .map(|t| ToolSchema::function(t.name(), t.description(), t.parameters_schema()))
            .collect()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|t| t.name()))
            .finish()
    }
}

/// Serialize a tool result for the conversation: strings verbatim, anything else as JSON.
pub fn render_tool_result(result: &Value) -> String {
    match result {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Marker appended to text cut for logs and error messages.
pub(crate) const TRUNCATED: &str = "... [truncated]";

/// Truncate to at most `max_chars` characters, appending `marker` when anything was cut.
pub(crate) fn truncate_chars(s: &str, max_chars: usize, marker: &str) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{}", &s[..byte_index], marker),
        None => s.to_string(),
    }
}

/// Read a required string argument.
pub(crate) fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> anyhow::Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing '{}' argument", key))
}

pub(crate) fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("research-assistant/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
}

/// Minimal decoding of the XML/HTML entities search APIs leave in text.
pub(crate) fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every invocation and answers with a fixed value or error.
    pub struct RecordingTool {
        name: String,
        outcome: Result<Value, String>,
        pub invocations: Mutex<Vec<Map<String, Value>>>,
    }

    impl RecordingTool {
        pub fn returning(name: &str, value: Value) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                outcome: Ok(value),
                invocations: Mutex::new(Vec::new()),
            })
        }

        pub fn failing(name: &str, message: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                outcome: Err(message.to_string()),
                invocations: Mutex::new(Vec::new()),
            })
        }

        pub fn invocation_count(&self) -> usize {
            self.invocations.lock().unwrap().len()
        }
    }

    pub fn as_tool(tool: &Arc<RecordingTool>) -> Arc<dyn Tool> {
        tool.clone()
    }

    #[async_trait]
    impl Tool for RecordingTool {
        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            "test tool"
        }

        fn parameters_schema(&self) -> Value {
            serde_json::json!({"type": "object", "properties": {}})
        }

        async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<Value> {
            self.invocations.lock().unwrap().push(args.clone());
            match &self.outcome {
                Ok(value) => Ok(value.clone()),
                Err(message) => Err(anyhow::anyhow!("{}", message)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingTool;
    use super::*;
    use serde_json::json;

    #[test]
    fn duplicate_names_keep_first_registration() {
        let first = RecordingTool::returning("search", json!("first"));
        let second = RecordingTool::returning("search", json!("second"));

        let mut registry = ToolRegistry::new();
        assert!(registry.register(first));
        assert!(!registry.register(second));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_tool_schemas().len(), 1);
    }

    #[tokio::test]
    async fn lookup_dispatches_to_the_first_registration() {
        let first = RecordingTool::returning("search", json!("first"));
        let second = RecordingTool::returning("search", json!("second"));
        let registry = ToolRegistry::from_tools([
            first.clone() as Arc<dyn Tool>,
            second.clone() as Arc<dyn Tool>,
        ]);

        let result = registry
            .get("search")
            .unwrap()
            .execute(&Map::new())
            .await
            .unwrap();

        assert_eq!(result, json!("first"));
        assert_eq!(first.invocation_count(), 1);
        assert_eq!(second.invocation_count(), 0);
    }

    #[test]
    fn schemas_follow_registration_order() {
        let registry = ToolRegistry::from_tools([
            RecordingTool::returning("b", json!(null)) as Arc<dyn Tool>,
            RecordingTool::returning("a", json!(null)) as Arc<dyn Tool>,
        ]);
        let names: Vec<_> = registry
            .get_tool_schemas()
            .into_iter()
            .map(|s| s.function.name)
            .collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(registry.get("c").is_none());
    }

    #[test]
    fn renders_strings_verbatim_and_json_compactly() {
        assert_eq!(render_tool_result(&json!("doc A")), "doc A");
        assert_eq!(render_tool_result(&json!({"results": [1, 2]})), r#"{"results":[1,2]}"#);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2, ""), "hé");
        assert_eq!(truncate_chars("abc", 10, ""), "abc");
        assert_eq!(truncate_chars("abcdef", 3, TRUNCATED), "abc... [truncated]");
        assert_eq!(truncate_chars("abc", 3, TRUNCATED), "abc");
    }

    #[test]
    fn required_str_rejects_blank_values() {
        let mut args = Map::new();
        args.insert("query".to_string(), json!("  "));
        assert!(required_str(&args, "query").is_err());
        args.insert("query".to_string(), json!("graphs"));
        assert_eq!(required_str(&args, "query").unwrap(), "graphs");
    }

    #[test]
    fn decodes_ampersand_last() {
        assert_eq!(decode_entities("a &amp;lt; b &lt; c"), "a &lt; b < c");
    }
}
