//! Destructive delete rules for shell commands
//!
//! A delete is only dangerous when it is both recursive and forced and one
//! of its operands is a catastrophic target. Deleting a named subdirectory
//! is ordinary cleanup and stays allowed.

use crate::rules::{Rule, DESTRUCTIVE_REASON};

/// Locates each `rm` invocation in one normalized command line and captures
/// its arguments up to the next shell separator. Matches bare, quoted and
/// path-qualified forms (`rm`, `sh -c "rm`, `/bin/rm`) but not `rmdir` or
/// `farm`. Quotes stay in the captured arguments and are stripped per operand.
pub const RM_INVOCATION: Rule = Rule::new(
    "rm-dangerous-target",
    r#"(?:^|[\s;&|(`"'])(?:[^\s;&|()`"']*/)?rm(?:$|\s+(?P<args>[^;&|()`]*))"#,
    DESTRUCTIVE_REASON,
);

/// Short option letter for recursive deletion (after lower-casing, covers `-R`)
pub const RECURSIVE_FLAG: char = 'r';

/// Short option letter for forced deletion
pub const FORCE_FLAG: char = 'f';

/// Long option spelling for recursive deletion
pub const RECURSIVE_LONG: &str = "--recursive";

/// Long option spelling for forced deletion
pub const FORCE_LONG: &str = "--force";

/// Built-in catastrophic targets, in normalized form.
///
/// Commands are lower-cased before matching, so `$HOME` appears as `$home`.
/// Trailing slashes are collapsed, so `~/` is covered by `~`.
pub const DEFAULT_DANGEROUS_TARGETS: &[&str] = &["/", "/*", "~", "$home", "..", ".", "*"];

/// Normalize a single `rm` operand for comparison against the target set
pub fn normalize_target(operand: &str) -> String {
    let unquoted: String = operand.chars().filter(|c| *c != '"' && *c != '\'').collect();
    let lowered = unquoted.to_lowercase();

    let expanded = match lowered.strip_prefix("${home}") {
        Some(rest) => format!("$home{}", rest),
        None => lowered,
    };

    if expanded.len() > 1 {
        let trimmed = expanded.trim_end_matches('/');
        if trimmed.is_empty() {
            return "/".to_string();
        }
        return trimmed.to_string();
    }

    expanded
}
