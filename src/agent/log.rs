//! Execution log kept for each response cycle.

use serde::Serialize;

/// A single entry in the cycle log.
#[derive(Debug, Clone, Serialize)]
pub struct CycleLogEntry {
    /// Timestamp (RFC 3339)
    pub timestamp: String,

    /// Entry type
    pub entry_type: LogEntryType,

    /// Content of the entry
    pub content: String,
}

impl CycleLogEntry {
    pub fn now(entry_type: LogEntryType, content: String) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            entry_type,
            content,
        }
    }
}

/// Types of log entries.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogEntryType {
    /// Tool is being called
    ToolCall,
    /// Tool returned a result
    ToolResult,
    /// Model produced its final reply
    Response,
}
