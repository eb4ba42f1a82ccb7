//! Shell command checking
//!
//! The destructive delete test runs on each command line separately, after
//! joining backslash continuations and normalizing (whitespace collapsed,
//! lower-cased). The environment file test runs on the command as written.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::output::Verdict;
use crate::rules::destructive::{
    self, FORCE_FLAG, FORCE_LONG, RECURSIVE_FLAG, RECURSIVE_LONG, RM_INVOCATION,
};
use crate::rules::secrets::{ENV_FILE_COMMAND, SAMPLE_EXTENSION};

static RM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(RM_INVOCATION.pattern).expect("rm invocation pattern is valid"));

static ENV_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(ENV_FILE_COMMAND.pattern).expect("env file pattern is valid"));

/// Check a shell command against the destructive delete and env file rules
pub fn check_command(command: &str, targets: &HashSet<String>) -> Verdict {
    if contains_dangerous_delete(command, targets) {
        return Verdict::block(RM_INVOCATION.id, RM_INVOCATION.reason);
    }

    if references_env_file(command) {
        return Verdict::block(ENV_FILE_COMMAND.id, ENV_FILE_COMMAND.reason);
    }

    Verdict::Allow
}

/// Collapse runs of whitespace to single spaces and lower-case
pub fn normalize_command(command: &str) -> String {
    command
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// True when any line of a raw command holds a dangerous delete.
///
/// A newline ends a shell command, so operands never carry over to the next line.
pub fn contains_dangerous_delete(command: &str, targets: &HashSet<String>) -> bool {
    let joined = command.replace("\\\r\n", " ").replace("\\\n", " ");
    joined
        .lines()
        .any(|line| is_dangerous_delete(&normalize_command(line), targets))
}

/// True when any `rm` in a normalized line is recursive, forced and aimed at a target
pub fn is_dangerous_delete(normalized: &str, targets: &HashSet<String>) -> bool {
    RM_RE.captures_iter(normalized).any(|caps| {
        caps.name("args")
            .is_some_and(|args| rm_args_are_dangerous(args.as_str(), targets))
    })
}

fn rm_args_are_dangerous(args: &str, targets: &HashSet<String>) -> bool {
    let mut recursive = false;
    let mut force = false;
    let mut end_of_options = false;
    let mut hits_target = false;

    for token in args.split_whitespace() {
        if !end_of_options && token == "--" {
            end_of_options = true;
        } else if !end_of_options && token.starts_with("--") {
            recursive |= token == RECURSIVE_LONG;
            force |= token == FORCE_LONG;
        } else if !end_of_options && token.len() > 1 && token.starts_with('-') {
            recursive |= token.contains(RECURSIVE_FLAG);
            force |= token.contains(FORCE_FLAG);
        } else if targets.contains(&destructive::normalize_target(token)) {
            hits_target = true;
        }
    }

    recursive && force && hits_target
}

/// True when the command mentions a `.env` file other than a `.env.sample`
pub fn references_env_file(command: &str) -> bool {
    ENV_RE.find_iter(command).any(|m| {
        let rest = &command[m.end()..];
        !is_sample_extension(rest)
    })
}

fn is_sample_extension(rest: &str) -> bool {
    match rest.strip_prefix(SAMPLE_EXTENSION) {
        Some(after) => !after
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}
