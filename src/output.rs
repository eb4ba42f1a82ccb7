//! Verdicts and their delivery to the host
//!
//! A verdict is delivered either as JSON on stdout (the host's permission
//! decision format) or as an exit code with the reason on stderr.

use serde::Serialize;

use crate::config::OutputFormat;

/// Exit code the host reads as "do not run this, show stderr instead"
pub const BLOCK_EXIT_CODE: u8 = 2;

/// Tag prefixed to messages shown by the host
const TAG: &str = "hook-guard";

/// Result of evaluating one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Let the operation proceed
    Allow,

    /// Prevent the operation and show `reason` instead
    Block {
        rule_id: &'static str,
        reason: &'static str,
    },
}

impl Verdict {
    /// Create a block verdict
    pub fn block(rule_id: &'static str, reason: &'static str) -> Self {
        Verdict::Block { rule_id, reason }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Verdict::Block { .. })
    }

    /// Get the rule ID if blocked
    pub fn rule_id(&self) -> Option<&'static str> {
        match self {
            Verdict::Allow => None,
            Verdict::Block { rule_id, .. } => Some(*rule_id),
        }
    }

    /// Get the block reason if blocked
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Verdict::Allow => None,
            Verdict::Block { reason, .. } => Some(*reason),
        }
    }
}

/// Main output structure for the JSON delivery format
#[derive(Debug, Serialize)]
pub struct HookOutput {
    /// Hook-specific output containing the permission decision
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,

    /// Optional system message to show the user
    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

/// Hook-specific output with permission decision
#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    /// The hook event name (always "PreToolUse" for the guard)
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    /// Permission decision, "deny" when present
    #[serde(rename = "permissionDecision")]
    pub permission_decision: String,

    /// Reason shown to the assistant
    #[serde(rename = "permissionDecisionReason")]
    pub permission_decision_reason: String,
}

impl HookOutput {
    /// Create an allow response (empty output = allow)
    pub fn allow() -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: None,
        }
    }

    /// Create a deny response with rule ID and reason
    pub fn deny(rule_id: &str, reason: &str) -> Self {
        HookOutput {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: "deny".to_string(),
                permission_decision_reason: reason.to_string(),
            }),
            system_message: Some(format!("[{}:{}] Blocked: {}", TAG, rule_id, reason)),
        }
    }

    /// Create a warn response (allows but shows warning)
    pub fn warn(message: &str) -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: Some(format!("[{}] Warning: {}", TAG, message)),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// What the process should print and how it should exit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub exit_code: u8,
}

impl Delivery {
    /// Render a verdict in the chosen format; `warn_only` turns blocks into warnings
    pub fn render(verdict: &Verdict, format: OutputFormat, warn_only: bool) -> Self {
        match (verdict, format) {
            (Verdict::Allow, OutputFormat::Json) => Self::stdout(HookOutput::allow().to_json()),
            (Verdict::Allow, OutputFormat::ExitCode) => Self::silent(),
            (Verdict::Block { reason, .. }, OutputFormat::Json) if warn_only => {
                Self::stdout(HookOutput::warn(reason).to_json())
            }
            (Verdict::Block { rule_id, reason }, OutputFormat::Json) => {
                Self::stdout(HookOutput::deny(rule_id, reason).to_json())
            }
            (Verdict::Block { reason, .. }, OutputFormat::ExitCode) if warn_only => Delivery {
                stdout: None,
                stderr: Some(format!("[{}] Warning: {}", TAG, reason)),
                exit_code: 0,
            },
            (Verdict::Block { reason, .. }, OutputFormat::ExitCode) => Delivery {
                stdout: None,
                stderr: Some(format!("BLOCKED: {}", reason)),
                exit_code: BLOCK_EXIT_CODE,
            },
        }
    }

    fn stdout(json: String) -> Self {
        Delivery {
            stdout: Some(json),
            stderr: None,
            exit_code: 0,
        }
    }

    fn silent() -> Self {
        Delivery {
            stdout: None,
            stderr: None,
            exit_code: 0,
        }
    }
}
