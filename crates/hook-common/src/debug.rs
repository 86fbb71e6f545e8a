//! Debug logging for hooks.
//!
//! Appends every per-file decision to a JSONL file when
//! `PRE_COMMIT_HOOKS_DEBUG` is set, for diagnosing hook runs after the fact.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

const DEBUG_ENV: &str = "PRE_COMMIT_HOOKS_DEBUG";
const DEBUG_LOG_ENV: &str = "PRE_COMMIT_HOOKS_DEBUG_LOG";

/// Debug log entry for one hook decision
#[derive(Debug, Serialize)]
pub struct HookDebugLog {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Hook name (e.g., "add-copyright")
    pub hook_name: String,
    /// File the decision is about (empty for run-level events)
    pub file: String,
    /// Decision made (modified/unchanged/violation/failed/warning/fatal)
    pub decision: String,
    /// Reason for the decision
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

impl HookDebugLog {
    pub fn new(hook_name: &str, file: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            hook_name: hook_name.to_string(),
            file: file.to_string(),
            decision: String::new(),
            reason: String::new(),
        }
    }

    pub fn with_decision(mut self, decision: &str, reason: &str) -> Self {
        self.decision = decision.to_string();
        // Truncate to 200 chars to avoid huge logs
        self.reason = match reason.char_indices().nth(200) {
            Some((cut, _)) => format!("{}...", &reason[..cut]),
            None => reason.to_string(),
        };
        self
    }

    /// Write log entry to file
    pub fn write(&self) -> std::io::Result<()> {
        if !is_debug_enabled() {
            return Ok(());
        }

        let log_path = debug_log_path();

        // Ensure parent directory exists
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let json = serde_json::to_string(self).map_err(std::io::Error::other)?;
        writeln!(file, "{}", json)?;

        Ok(())
    }

    /// Write, ignoring failures. Logging never changes a hook's result.
    pub fn write_quietly(&self) {
        let _ = self.write();
    }
}

/// Check if debug mode is enabled
pub fn is_debug_enabled() -> bool {
    std::env::var_os(DEBUG_ENV).is_some()
}

/// Get debug log file path
pub fn debug_log_path() -> PathBuf {
    if let Some(path) = std::env::var_os(DEBUG_LOG_ENV) {
        return PathBuf::from(path);
    }
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pre-commit-hooks")
        .join("debug.jsonl")
}
