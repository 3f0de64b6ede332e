//! Encyclopedia lookup through the MediaWiki API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{http_client, required_str, truncate_chars, Tool};

const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Look up the intro of the best matching Wikipedia pages.
pub struct WikipediaLookup {
    base_url: String,
    top_k_results: usize,
    doc_content_chars_max: usize,
}

impl Default for WikipediaLookup {
    fn default() -> Self {
        Self {
            base_url: WIKIPEDIA_API_URL.to_string(),
            top_k_results: 3,
            doc_content_chars_max: 150,
        }
    }
}

impl WikipediaLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    index: u32,
    #[serde(default)]
    extract: Option<String>,
}

#[async_trait]
impl Tool for WikipediaLookup {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn description(&self) -> &str {
        "Searching relevant information on Wikipedia. Input is a search query; returns page titles with a short summary."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Topic to look up on Wikipedia"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<Value> {
        let query = required_str(args, "query")?;
        let limit = self.top_k_results.to_string();

        let client = http_client()?;
        let response = client
            .get(&self.base_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", limit.as_str()),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exlimit", "max"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Wikipedia API error: {}", status));
        }

        let parsed: QueryResponse = response.json().await?;
        Ok(Value::String(render_pages(parsed, self.doc_content_chars_max)))
    }
}

fn render_pages(response: QueryResponse, max_chars: usize) -> String {
    let mut pages = response.query.map(|q| q.pages).unwrap_or_default();
    pages.sort_by_key(|p| p.index);

    let summaries: Vec<String> = pages
        .into_iter()
        .filter_map(|p| {
            let extract = p.extract?.trim().to_string();
            (!extract.is_empty()).then(|| format!("Page: {}\nSummary: {}", p.title, extract))
        })
        .collect();

    if summaries.is_empty() {
        "No good Wikipedia Search Result was found".to_string()
    } else {
        truncate_chars(&summaries.join("\n\n"), max_chars, "")
    }
}
