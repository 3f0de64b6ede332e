//! Saving completed answers as JSON reports.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `<prefix>_<topic>_<YYYYmmdd_HHMMSS>.json`
pub fn report_file_name(prefix: &str, topic: &str, now: DateTime<Local>) -> String {
    format!(
        "{}_{}_{}.json",
        prefix,
        sanitize_topic(topic),
        now.format("%Y%m%d_%H%M%S")
    )
}

/// Whitespace becomes `_`; anything that could escape the directory is dropped.
fn sanitize_topic(topic: &str) -> String {
    let sanitized: String = topic
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    let sanitized = sanitized.trim_start_matches('.');
    if sanitized.is_empty() {
        "untitled".to_string()
    } else {
        sanitized.to_string()
    }
}

/// Write `record` as pretty JSON into `dir` and return the file path.
pub async fn save_report<T: Serialize>(
    dir: &Path,
    prefix: &str,
    topic: &str,
    record: &T,
    now: DateTime<Local>,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(report_file_name(prefix, topic, now));
    let json = serde_json::to_string_pretty(record)?;

    let io_err = |source: std::io::Error| ReportError::Io {
        path: path.clone(),
        source,
    };
    tokio::fs::create_dir_all(dir).await.map_err(io_err)?;
    tokio::fs::write(&path, json).await.map_err(io_err)?;

    tracing::info!("Saved report to {}", path.display());
    Ok(path)
}
