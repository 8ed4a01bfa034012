//! Bounded, newest-first JSON ledger of past test runs.
//!
//! The ledger is a single pretty-printed JSON array on disk, newest entry
//! first, capped at [`MAX_HISTORY_ENTRIES`]. Reads never fail: a missing
//! file is an empty history, and a corrupt file is logged and treated as
//! empty so the next write starts a fresh ledger.

use crate::record::{TestResult, TestStatus};
use crate::result::InformeResult;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Maximum number of ledger entries kept on disk; older entries are
/// dropped silently on overflow.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// Pass/fail tally for a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// 1 if the run passed, else 0
    pub passed: u32,
    /// 1 if the run failed, else 0
    pub failed: u32,
    /// Always 1 for a single run
    pub total: u32,
}

/// Persisted projection of one finished test run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// ISO-8601 UTC timestamp of when the entry was recorded
    pub timestamp: String,
    /// Test title
    pub test_name: String,
    /// Final verdict
    pub status: TestStatus,
    /// Test duration in milliseconds
    pub duration: u64,
    /// Filename of the generated HTML report
    pub report_file: String,
    /// Automation engine name
    pub browser: String,
    /// Single-run pass/fail tally
    pub summary: RunSummary,
}

impl HistoryEntry {
    /// Project a finished test record into a ledger entry
    #[must_use]
    pub fn from_result(
        result: &TestResult,
        report_file: impl Into<String>,
        default_browser: &str,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            test_name: result.test_name.clone(),
            status: result.status,
            duration: result.duration,
            report_file: report_file.into(),
            browser: result
                .browser
                .clone()
                .unwrap_or_else(|| default_browser.to_string()),
            summary: RunSummary {
                passed: u32::from(result.status.is_passed()),
                failed: u32::from(result.status.is_failed()),
                total: 1,
            },
        }
    }
}

/// Append-bounded run history backed by a JSON file
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Create a store backed by the given file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing ledger file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ledger, newest first
    ///
    /// Returns an empty sequence if the file is absent or unparsable;
    /// corruption is logged, not propagated.
    #[must_use]
    pub fn read(&self) -> Vec<HistoryEntry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "test history unreadable, starting fresh");
                Vec::new()
            }
        }
    }

    /// Add an entry to the front of the ledger and persist it
    ///
    /// Truncates to [`MAX_HISTORY_ENTRIES`] and fully overwrites the file
    /// with pretty-printed JSON. The read-modify-write is not guarded by a
    /// lock; concurrent writers race and the last one wins.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn append(&self, entry: HistoryEntry) -> InformeResult<()> {
        let mut entries = self.read();
        entries.insert(0, entry);
        entries.truncate(MAX_HISTORY_ENTRIES);

        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
