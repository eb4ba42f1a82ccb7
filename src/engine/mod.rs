//! The command guard
//!
//! Classifies one invocation as allowed or blocked. Evaluation is a pure
//! function of the invocation and the target set fixed at construction, so
//! a single [`Guard`] can be shared freely and evaluated repeatedly.

pub mod file;
pub mod shell;

use std::collections::HashSet;

use crate::config::GuardConfig;
use crate::input::{HookInput, Invocation};
use crate::output::Verdict;
use crate::rules::destructive::{normalize_target, DEFAULT_DANGEROUS_TARGETS};

/// The guard evaluating tool invocations before they run
#[derive(Debug, Clone)]
pub struct Guard {
    dangerous_targets: HashSet<String>,
}

impl Guard {
    /// Create a guard with the built-in targets plus any configured extras
    pub fn new(config: &GuardConfig) -> Self {
        let dangerous_targets = DEFAULT_DANGEROUS_TARGETS
            .iter()
            .map(|t| t.to_string())
            .chain(
                config
                    .extra_dangerous_targets
                    .iter()
                    .map(|t| normalize_target(t.trim()))
                    .filter(|t| !t.is_empty()),
            )
            .collect();

        Self { dangerous_targets }
    }

    /// Evaluate a validated invocation
    pub fn evaluate(&self, invocation: &Invocation) -> Verdict {
        match invocation {
            Invocation::ShellCommand { command } => {
                shell::check_command(command, &self.dangerous_targets)
            }
            Invocation::FileRead { path }
            | Invocation::FileWrite { path }
            | Invocation::FileEdit { path } => file::check_path(path),
        }
    }

    /// Evaluate a raw host record; records that do not narrow are allowed
    pub fn check(&self, input: &HookInput) -> Verdict {
        match input.invocation() {
            Some(invocation) => {
                let verdict = self.evaluate(&invocation);
                tracing::debug!(
                    event = input.hook_event_name.as_deref().unwrap_or("PreToolUse"),
                    kind = invocation.kind(),
                    blocked = verdict.is_block(),
                    "evaluated {}",
                    input.summary()
                );
                verdict
            }
            None => {
                tracing::debug!(tool = %input.tool_name, "nothing to check");
                Verdict::Allow
            }
        }
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self::new(&GuardConfig::default())
    }
}
