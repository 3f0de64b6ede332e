//! Research assistants built on the tool-calling responder.
//!
//! Each assistant owns a [`ToolCallingResponder`](crate::agent::ToolCallingResponder)
//! bound to its tool set and role prompt:
//! - [`LiteratureReviewer`] finds and summarizes papers
//! - [`ConferenceFinder`] lists upcoming venues from call-for-papers listings
//! - [`IdeationMentor`] chats about project ideas
//! - [`StageRouter`] picks which of the above should handle a query

mod conference;
mod ideation;
mod literature;
pub mod prompts;
mod router;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use thiserror::Error;

use crate::agent::{CycleLogEntry, ResponderError};
use crate::config::Config;
use crate::llm::LlmClient;
use crate::report::{save_report, ReportError};

pub use conference::ConferenceFinder;
pub use ideation::{IdeationMentor, IdeationReply};
pub use literature::LiteratureReviewer;
pub use router::StageRouter;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    Responder(#[from] ResponderError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// A structured answer plus the cycle log and, when saved, the report path.
#[derive(Debug, Clone)]
pub struct AssistantOutput<T> {
    pub answer: T,
    pub log: Vec<CycleLogEntry>,
    pub report_path: Option<PathBuf>,
}

/// All assistants sharing one model client.
pub struct Assistants {
    pub literature: LiteratureReviewer,
    pub conferences: ConferenceFinder,
    pub ideation: IdeationMentor,
    pub router: StageRouter,
}

impl Assistants {
    pub fn from_config(llm: Arc<dyn LlmClient>, config: &Config) -> Self {
        Self {
            literature: LiteratureReviewer::from_config(llm.clone(), config),
            conferences: ConferenceFinder::from_config(llm.clone(), config),
            ideation: IdeationMentor::from_config(llm.clone(), config),
            router: StageRouter::from_config(llm, config),
        }
    }
}

fn reports_dir(config: &Config) -> Option<PathBuf> {
    config.save_reports.then(|| config.reports_dir.clone())
}

async fn maybe_save<T: Serialize>(
    dir: Option<&Path>,
    prefix: &str,
    topic: &str,
    record: &T,
) -> Result<Option<PathBuf>, ReportError> {
    match dir {
        Some(dir) => save_report(dir, prefix, topic, record, Local::now()).await.map(Some),
        None => Ok(None),
    }
}
