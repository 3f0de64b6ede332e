//! Structured answers the assistants ask the model for.
//!
//! Field names and optionality are part of the saved report format: absent
//! optional fields are written as `null` and may be missing on input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One paper in a literature review.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PaperInfo {
    /// Title of the paper.
    pub title: String,
    /// Authors of the paper, if available.
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    /// Publication year, if known.
    #[serde(default)]
    pub year: Option<i32>,
    /// Link to the paper (arXiv or other).
    #[serde(default)]
    pub link: Option<String>,
    /// Brief abstract or summary of the paper.
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    /// Main idea or contribution of the paper.
    #[serde(default)]
    pub key_contribution: Option<String>,
    /// Why this paper is relevant to the user's topic.
    pub relevance: String,
}

/// Papers found for a topic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LiteratureReview {
    /// The topic or query for the literature review.
    pub topic: String,
    /// List of relevant papers for this topic.
    pub papers: Vec<PaperInfo>,
    /// Overall summary or synthesis of findings across papers.
    #[serde(default)]
    pub summary: Option<String>,
}

/// One upcoming conference.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ConferenceInfo {
    /// Name of the conference.
    pub conference_name: String,
    /// Location of the conference.
    #[serde(default)]
    pub location: Option<String>,
    /// Conference dates (start-end).
    #[serde(default)]
    pub date: Option<String>,
    /// Main topics covered.
    #[serde(default)]
    pub topics: Option<String>,
    /// Paper submission deadline.
    #[serde(default)]
    pub submission_deadline: Option<String>,
    /// Conference website or CFP link.
    #[serde(default)]
    pub website: Option<String>,
}

/// Conferences found for a research area.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ConferenceList {
    /// User's research area.
    pub topic: String,
    /// List of upcoming or relevant conferences.
    pub conferences: Vec<ConferenceInfo>,
}

/// Which assistant should handle a query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    IdeationAgent,
    LiteratureReviewAgent,
    ConferenceAgent,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StageDecision {
    /// The agent to trigger based on the user's query.
    pub trigger_agent: Stage,
}

/// Prompting technique for an ideation reply.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum Technique {
    Basic,
    #[serde(rename = "Chain-of-thought")]
    ChainOfThought,
}

/// Kind of ideation task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum IdeationKind {
    #[serde(rename = "Product_Based")]
    ProductBased,
    #[serde(rename = "Depth_Research")]
    DepthResearch,
}

/// How an ideation query should be answered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QueryLevel {
    /// Prompting technique.
    pub technique: Technique,
    /// Type of ideation task.
    #[serde(rename = "type")]
    pub kind: IdeationKind,
}
