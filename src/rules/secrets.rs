//! Environment file rules
//!
//! `.env` files hold secrets; `.env.sample` templates stay editable.

use crate::rules::{Rule, ENV_FILE_REASON};

/// Suffix that exempts a path from the environment file rule
pub const SAMPLE_SUFFIX: &str = ".env.sample";

/// Suffix that exempts a `.env` reference inside a shell command
pub const SAMPLE_EXTENSION: &str = ".sample";

/// File operations: the path mentions `.env` anywhere
pub const ENV_FILE_PATH: Rule = Rule::new("env-file-path", r"\.env", ENV_FILE_REASON);

/// Shell commands: a `.env` reference ending at a word boundary
/// (`.env`, `.env.local`, `config.env`), but not `.envrc` or `.environment`
pub const ENV_FILE_COMMAND: Rule = Rule::new("env-file-command", r"\.env\b", ENV_FILE_REASON);
