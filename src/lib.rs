//! # Research Assistant
//!
//! Research assistants backed by a tool-calling language model.
//!
//! This library provides:
//! - A tool-calling response loop that returns schema-checked JSON answers
//! - Search tools for arXiv, the web (Tavily) and Wikipedia
//! - Literature review, conference search, ideation and routing assistants
//! - An HTTP API exposing the assistants
//!
//! ## Architecture
//!
//! Every assistant runs the "tools in a loop" pattern:
//! 1. Build the conversation from the role prompt, prior turns and the query
//! 2. Call the model with the available tools and the expected output schema
//! 3. Run any requested tools and feed their output back
//! 4. Repeat until the model answers, then parse the answer into the schema
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use research_assistant::{assistants::LiteratureReviewer, llm::OpenRouterClient, Config};
//!
//! let config = Config::from_env()?;
//! let llm = Arc::new(OpenRouterClient::from_config(&config.llm)?);
//! let reviewer = LiteratureReviewer::from_config(llm, &config);
//! let review = reviewer.review("Graph neural networks for drug discovery").await?;
//! ```

pub mod agent;
pub mod api;
pub mod assistants;
pub mod config;
pub mod llm;
pub mod records;
pub mod report;
pub mod tools;

pub use config::Config;
