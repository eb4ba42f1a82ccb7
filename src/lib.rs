//! hook-guard - pre-execution guard and event logger for AI coding assistant hooks
//!
//! The host tool runs a hook before each tool call and passes the proposed
//! call as JSON on stdin. The guard decides whether it may run:
//!
//! - **Destructive deletes**: a recursive, forced `rm` aimed at `/`, `/*`,
//!   `~`, `$HOME`, `..`, `.` or `*` is blocked. Named directories are not.
//! - **Environment files**: reading, writing or editing `.env` files, or
//!   referencing them from a shell command, is blocked. `.env.sample`
//!   templates are exempt.
//!
//! Malformed or unrecognized input is always allowed, so a schema change in
//! the host can never turn the guard into a blocking failure point.
//!
//! Every decision, and any other lifecycle event passed to `hook-guard log`,
//! is appended to a date-based JSONL event log.
//!
//! # Example
//!
//! ```
//! use hook_guard::{Guard, HookInput};
//!
//! let guard = Guard::default();
//!
//! let input = r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}"#;
//! let hook_input = HookInput::from_json(input).unwrap();
//!
//! let verdict = guard.check(&hook_input);
//! assert_eq!(verdict.reason(), Some("dangerous destructive command"));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod input;
pub mod output;
pub mod rules;

// Re-exports for convenience
pub use config::{Config, OutputFormat};
pub use engine::Guard;
pub use error::{GuardError, Result};
pub use events::EventLog;
pub use input::{HookInput, Invocation};
pub use output::{Delivery, HookOutput, Verdict};
