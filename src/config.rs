//! Configuration loading for hook-guard
//!
//! TOML configuration with built-in defaults and environment overrides.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{GuardError, Result};

/// Files or directories that mark the root of a project
const PROJECT_MARKERS: &[&str] = &[
    ".git",
    "package.json",
    "Makefile",
    "go.mod",
    "Cargo.toml",
    "setup.py",
    "pyproject.toml",
    ".claude",
];

/// Project-local config, relative to the project root
const PROJECT_CONFIG: &str = ".claude/hook-guard.toml";

/// User config, relative to the home directory
const USER_CONFIG: &str = ".claude/hook-guard/config.toml";

/// How a verdict is delivered back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// JSON on stdout with a permission decision, exit code 0
    #[default]
    Json,

    /// Reason on stderr and exit code 2 when blocked
    ExitCode,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "exit-code" | "exit_code" | "exitcode" => Some(OutputFormat::ExitCode),
            _ => None,
        }
    }
}

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// When false every invocation is allowed (still logged)
    pub enabled: bool,

    /// Verbose diagnostics on stderr
    pub debug: bool,

    /// Verdict delivery format
    pub format: OutputFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
            format: OutputFormat::Json,
        }
    }
}

/// Event sink configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Append events to JSONL files
    pub enabled: bool,

    /// Log directory; relative paths resolve against the project root
    pub dir: String,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: ".claude/logs".to_string(),
        }
    }
}

/// Guard rule configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GuardConfig {
    /// Deletion targets blocked in addition to the built-in set
    pub extra_dangerous_targets: Vec<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub events: EventsConfig,
    pub guard: GuardConfig,
}

impl Config {
    /// Load configuration from the project, then the user location, else defaults
    pub fn load() -> Self {
        let project_root = find_project_root(&env::current_dir().unwrap_or_default());

        let candidates = [
            Some(project_root.join(PROJECT_CONFIG)),
            dirs::home_dir().map(|home| home.join(USER_CONFIG)),
        ];

        for path in candidates.into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(config) => return config.with_env_overrides(),
                Err(e) => tracing::warn!("{}", e),
            }
        }

        Config::default().with_env_overrides()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GuardError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| GuardError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply CLAUDE_HOOKS_ENABLED / CLAUDE_HOOKS_DEBUG from the environment
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(value) = env::var("CLAUDE_HOOKS_ENABLED") {
            if value.eq_ignore_ascii_case("false") || value == "0" {
                self.general.enabled = false;
            }
        }
        if env::var("CLAUDE_HOOKS_DEBUG").as_deref() == Ok("1") {
            self.general.debug = true;
        }
        self
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Resolve the event log directory against `project_root`
    pub fn events_dir(&self, project_root: &Path) -> PathBuf {
        let dir = Self::expand_path(&self.events.dir);
        if dir.is_absolute() {
            dir
        } else {
            project_root.join(dir)
        }
    }
}

/// Nearest ancestor of `start` carrying a project marker, or `start` itself
pub fn find_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if PROJECT_MARKERS.iter().any(|m| dir.join(m).exists()) {
            tracing::debug!("project root found: {}", dir.display());
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

/// Example configuration with every key at its default
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
enabled = true
debug = false
format = "json"

[events]
enabled = true
dir = ".claude/logs"

[guard]
extra_dangerous_targets = []
"#;
