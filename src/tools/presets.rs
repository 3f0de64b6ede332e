//! Tool sets bound by each assistant.

use std::sync::Arc;

use super::{ArxivSearch, SearchDepth, TavilySearch, Tool, ToolRegistry, WikipediaLookup};
use crate::config::Config;

/// Domain the conference finder restricts web search to.
pub const CONFERENCE_DOMAIN: &str = "wikicfp.com";

fn tavily(config: &Config) -> Option<TavilySearch> {
    match &config.tavily_api_key {
        Some(key) => Some(TavilySearch::new(key.clone())),
        None => {
            tracing::warn!("TAVILY_API_KEY not set; web search tool disabled");
            None
        }
    }
}

/// arXiv plus a deep web search.
pub fn literature_review(config: &Config) -> ToolRegistry {
    let mut tools: Vec<Arc<dyn Tool>> = vec![Arc::new(ArxivSearch::new())];
    if let Some(search) = tavily(config) {
        tools.push(Arc::new(search.max_results(10).search_depth(SearchDepth::Advanced)));
    }
    ToolRegistry::from_tools(tools)
}

/// arXiv plus web search restricted to call-for-papers listings.
pub fn conference_search(config: &Config) -> ToolRegistry {
    let mut tools: Vec<Arc<dyn Tool>> = vec![Arc::new(ArxivSearch::new())];
    if let Some(search) = tavily(config) {
        tools.push(Arc::new(
            search
                .max_results(20)
                .search_depth(SearchDepth::Advanced)
                .include_domains([CONFERENCE_DOMAIN]),
        ));
    }
    ToolRegistry::from_tools(tools)
}

/// Quick web search plus encyclopedia lookup.
pub fn ideation(config: &Config) -> ToolRegistry {
    let mut tools: Vec<Arc<dyn Tool>> = Vec::new();
    if let Some(search) = tavily(config) {
        tools.push(Arc::new(search));
    }
    tools.push(Arc::new(WikipediaLookup::new()));
    ToolRegistry::from_tools(tools)
}
