//! Append-only JSONL event log
//!
//! Every hook event, including each guard verdict, is appended as one line
//! `{"timestamp","hook","data"}` to a date-based file:
//! `hooks_log_<YYYYMMDD>.jsonl`, or `hooks_log_<YYYYMMDD>_<session>.jsonl`
//! when the session is known. The guard never reads these files back.

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::input::HookInput;
use crate::output::Verdict;

/// Hook name under which guard verdicts are recorded
pub const GUARD_HOOK: &str = "pre_tool_use";

/// One line of the event log
#[derive(Debug, Serialize)]
pub struct EventEntry<'a> {
    pub timestamp: DateTime<Local>,
    pub hook: &'a str,
    pub data: Value,
}

/// Payload recorded for a guard decision
#[derive(Debug, Serialize)]
pub struct GuardEvent<'a> {
    pub tool_name: &'a str,
    pub input_summary: String,
    pub decision: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    /// False when the guard was switched off and the verdict was not enforced
    pub enforced: bool,
}

impl<'a> GuardEvent<'a> {
    pub fn new(input: &'a HookInput, verdict: &Verdict, enforced: bool) -> Self {
        Self {
            tool_name: &input.tool_name,
            input_summary: input.summary(),
            decision: if verdict.is_block() { "block" } else { "allow" },
            rule_id: verdict.rule_id(),
            reason: verdict.reason(),
            enforced,
        }
    }
}

/// Event log writer; a logger without a directory records nothing
#[derive(Debug, Default)]
pub struct EventLog {
    dir: Option<PathBuf>,
}

impl EventLog {
    /// Create a logger writing under `dir`
    pub fn new(dir: Option<&Path>) -> Self {
        Self {
            dir: dir.map(Path::to_path_buf),
        }
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    /// File an entry for `session_id` on `timestamp`'s date goes to
    pub fn log_path(&self, timestamp: &DateTime<Local>, session_id: Option<&str>) -> Option<PathBuf> {
        let dir = self.dir.as_ref()?;
        let date = timestamp.format("%Y%m%d");
        let name = match session_id.map(sanitize_session_id).filter(|s| !s.is_empty()) {
            Some(session) => format!("hooks_log_{}_{}.jsonl", date, session),
            None => format!("hooks_log_{}.jsonl", date),
        };
        Some(dir.join(name))
    }

    /// Append an event; returns the file written, or `None` when disabled
    pub fn record(&self, hook: &str, data: Value, session_id: Option<&str>) -> Result<Option<PathBuf>> {
        let timestamp = Local::now();
        let Some(path) = self.log_path(&timestamp, session_id) else {
            return Ok(None);
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let entry = EventEntry {
            timestamp,
            hook,
            data,
        };
        let line = serde_json::to_string(&entry)?;

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", line)?;

        tracing::debug!("recorded {} event to {}", hook, path.display());
        Ok(Some(path))
    }

    /// Record a guard verdict for `input`
    pub fn record_verdict(
        &self,
        input: &HookInput,
        verdict: &Verdict,
        enforced: bool,
    ) -> Result<Option<PathBuf>> {
        let data = serde_json::to_value(GuardEvent::new(input, verdict, enforced))?;
        self.record(GUARD_HOOK, data, input.session_id.as_deref())
    }
}

/// Report a failed write on stderr as a JSON line, leaving stdout untouched
pub fn report_failure(hook: &str, error: &dyn std::fmt::Display) {
    let fallback = serde_json::json!({
        "error": "logging_failed",
        "original_hook": hook,
        "exception": error.to_string(),
        "timestamp": Local::now(),
    });
    eprintln!("{}", fallback);
}

/// Keep only characters safe in a file name
fn sanitize_session_id(session_id: &str) -> String {
    session_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}
