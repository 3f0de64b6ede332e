//! General web search through the Tavily API.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{http_client, required_str, Tool};

const TAVILY_API_URL: &str = "https://api.tavily.com";

/// How thoroughly Tavily searches.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

/// Web search, optionally restricted to a set of domains.
pub struct TavilySearch {
    api_key: String,
    base_url: String,
    max_results: u32,
    search_depth: SearchDepth,
    include_domains: Vec<String>,
    description: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: u32,
    search_depth: SearchDepth,
    #[serde(skip_serializing_if = "no_domains")]
    include_domains: &'a [String],
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: TAVILY_API_URL.to_string(),
            max_results: 3,
            search_depth: SearchDepth::Basic,
            include_domains: Vec::new(),
            description: default_description(&[]),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn search_depth(mut self, search_depth: SearchDepth) -> Self {
        self.search_depth = search_depth;
        self
    }

    /// Restrict results to these domains (e.g. `wikicfp.com`).
    pub fn include_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_domains = domains.into_iter().map(Into::into).collect();
        self.description = default_description(&self.include_domains);
        self
    }
}

fn no_domains(domains: &&[String]) -> bool {
    domains.is_empty()
}

fn default_description(domains: &[String]) -> String {
    let base = "A search engine optimized for comprehensive, accurate, and trusted results. Useful for current events and facts from the web. Input should be a search query.";
    if domains.is_empty() {
        base.to_string()
    } else {
        format!("{} Results are restricted to: {}.", base, domains.join(", "))
    }
}

#[async_trait]
impl Tool for TavilySearch {
    fn name(&self) -> &str {
        "tavily_search"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query to look up"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<Value> {
        let query = required_str(args, "query")?;

        let body = SearchRequest {
            query,
            max_results: self.max_results,
            search_depth: self.search_depth,
            include_domains: &self.include_domains,
        };

        let client = http_client()?;
        let response = client
            .post(format!("{}/search", self.base_url.trim_end_matches('/')))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Tavily API error {}: {}", status, text));
        }

        let results: Value = response.json().await?;
        Ok(results)
    }
}
