//! Input parsing for the host's hook JSON format
//!
//! The host sends a loosely-typed record on stdin. It is read into
//! [`HookInput`] as-is and then narrowed into an [`Invocation`], the only
//! shape the guard evaluates. Anything that does not narrow cleanly is
//! treated as "nothing to check".

use serde::Deserialize;
use serde_json::Value;

/// Maximum characters of a payload kept in log summaries
const SUMMARY_LIMIT: usize = 100;

/// Raw record received from the host
#[derive(Debug, Clone, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Read", "Edit", "Write")
    #[serde(default)]
    pub tool_name: String,

    /// Tool-specific parameters, shape depends on `tool_name`
    #[serde(default)]
    pub tool_input: Value,

    /// Optional session identifier, resolved by [`HookInput::from_json`]
    /// from any of the locations [`session_id`] knows
    #[serde(default)]
    pub session_id: Option<String>,

    /// Hook event name (e.g., "PreToolUse")
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

/// A proposed tool action, validated at the boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Shell command execution
    ShellCommand { command: String },

    /// File read operation
    FileRead { path: String },

    /// File creation or overwrite
    FileWrite { path: String },

    /// In-place file edit (single or multi)
    FileEdit { path: String },
}

impl Invocation {
    /// Narrow a host record into an invocation.
    ///
    /// Returns `None` for unknown tools and for missing, non-string or empty
    /// payloads.
    pub fn from_hook(input: &HookInput) -> Option<Self> {
        match input.tool_name.as_str() {
            "Bash" => {
                string_field(&input.tool_input, "command").map(|command| Invocation::ShellCommand {
                    command,
                })
            }
            "Read" => string_field(&input.tool_input, "file_path")
                .map(|path| Invocation::FileRead { path }),
            "Write" => string_field(&input.tool_input, "file_path")
                .map(|path| Invocation::FileWrite { path }),
            "Edit" | "MultiEdit" => string_field(&input.tool_input, "file_path")
                .map(|path| Invocation::FileEdit { path }),
            _ => None,
        }
    }

    /// The command line or file path carried by this invocation
    pub fn payload(&self) -> &str {
        match self {
            Invocation::ShellCommand { command } => command,
            Invocation::FileRead { path }
            | Invocation::FileWrite { path }
            | Invocation::FileEdit { path } => path,
        }
    }

    /// Short label for the invocation kind
    pub fn kind(&self) -> &'static str {
        match self {
            Invocation::ShellCommand { .. } => "shell",
            Invocation::FileRead { .. } => "read",
            Invocation::FileWrite { .. } => "write",
            Invocation::FileEdit { .. } => "edit",
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let mut input = HookInput::deserialize(&value)?;
        input.session_id = session_id(&value);
        Ok(input)
    }

    /// Narrow this record into an [`Invocation`]
    pub fn invocation(&self) -> Option<Invocation> {
        Invocation::from_hook(self)
    }

    /// Get a summary of the input for logging
    pub fn summary(&self) -> String {
        match self.invocation() {
            Some(invocation) => {
                format!("{}: {}", self.tool_name, truncate(invocation.payload(), SUMMARY_LIMIT))
            }
            None if self.tool_name.is_empty() => "Unknown tool".to_string(),
            None => format!("{}: <no payload>", self.tool_name),
        }
    }
}

/// Session identifier from any of the locations the host has used
pub fn session_id(value: &Value) -> Option<String> {
    let candidates = [
        value.pointer("/session/session_id"),
        value.get("session_id"),
        value.pointer("/context/session_id"),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
