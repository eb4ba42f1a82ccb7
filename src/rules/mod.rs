//! Static rule tables for hook-guard
//!
//! Rules are compiled once per process and never mutated.

pub mod destructive;
pub mod secrets;

/// Reason reported for a blocked destructive delete
pub const DESTRUCTIVE_REASON: &str = "dangerous destructive command";

/// Reason reported for blocked environment file access
pub const ENV_FILE_REASON: &str = "environment file access blocked";

/// A guard rule definition
#[derive(Debug, Clone)]
pub struct Rule {
    /// Unique identifier for this rule
    pub id: &'static str,

    /// Regex pattern to match
    pub pattern: &'static str,

    /// Human-readable reason for blocking
    pub reason: &'static str,
}

impl Rule {
    /// Create a new rule
    pub const fn new(id: &'static str, pattern: &'static str, reason: &'static str) -> Self {
        Self {
            id,
            pattern,
            reason,
        }
    }
}
