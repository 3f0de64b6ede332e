//! Academic paper search against the arXiv Atom API.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Map, Value};

use super::{decode_entities, http_client, required_str, truncate_chars, Tool};

const ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";

/// Search arXiv and return the top papers as text.
pub struct ArxivSearch {
    base_url: String,
    top_k_results: usize,
    doc_content_chars_max: usize,
}

impl Default for ArxivSearch {
    fn default() -> Self {
        Self {
            base_url: ARXIV_API_URL.to_string(),
            top_k_results: 10,
            doc_content_chars_max: 2500,
        }
    }
}

impl ArxivSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Tool for ArxivSearch {
    fn name(&self) -> &str {
        "arxiv"
    }

    fn description(&self) -> &str {
        "Searching relevant research papers on arXiv. Input is a search query; returns publication date, title, authors and summary of the top matching papers."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query for arXiv papers"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<Value> {
        let query = required_str(args, "query")?;
        let max_results = self.top_k_results.to_string();

        let client = http_client()?;
        let response = client
            .get(&self.base_url)
            .query(&[
                ("search_query", format!("all:{}", query)),
                ("start", "0".to_string()),
                ("max_results", max_results),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("arXiv API error: {}", status));
        }

        let feed = response.text().await?;
        let papers = parse_feed(&feed);

        if papers.is_empty() {
            return Ok(Value::String("No good Arxiv Result was found".to_string()));
        }

        let text = papers
            .iter()
            .take(self.top_k_results)
            .map(Paper::render)
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(Value::String(truncate_chars(&text, self.doc_content_chars_max, "")))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Paper {
    published: String,
    title: String,
    authors: Vec<String>,
    summary: String,
}

impl Paper {
    fn render(&self) -> String {
        format!(
            "Published: {}\nTitle: {}\nAuthors: {}\nSummary: {}",
            self.published,
            self.title,
            self.authors.join(", "),
            self.summary
        )
    }
}

fn entry_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<entry>(.*?)</entry>").expect("valid regex"))
}

fn author_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<author>\s*<name>(.*?)</name>").expect("valid regex"))
}

fn tag_text(chunk: &str, tag: &str) -> Option<String> {
    let open = format!("<{}", tag);
    let start = chunk.find(&open)?;
    let body_start = start + chunk[start..].find('>')? + 1;
    let end = body_start + chunk[body_start..].find(&format!("</{}>", tag))?;
    Some(collapse_whitespace(&decode_entities(&chunk[body_start..end])))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract papers from an Atom feed.
fn parse_feed(feed: &str) -> Vec<Paper> {
    entry_re()
        .captures_iter(feed)
        .filter_map(|caps| {
            let entry = caps.get(1)?.as_str();
            let title = tag_text(entry, "title")?;
            let published = tag_text(entry, "published")
                .map(|p| p.chars().take(10).collect())
                .unwrap_or_default();
            let summary = tag_text(entry, "summary").unwrap_or_default();
            let authors = author_re()
                .captures_iter(entry)
                .filter_map(|a| a.get(1))
                .map(|m| collapse_whitespace(&decode_entities(m.as_str())))
                .collect();
            Some(Paper {
                published,
                title,
                authors,
                summary,
            })
        })
        .collect()
}
