//! hook-guard - pre-execution guard and event logger for AI coding assistant hooks
//!
//! # Usage
//!
//! ```bash
//! # As a PreToolUse hook (reads JSON from stdin, writes the decision to stdout)
//! echo '{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}' | hook-guard
//!
//! # Block with exit code 2 and the reason on stderr instead of JSON
//! hook-guard --format exit-code
//!
//! # Record any other lifecycle event
//! hook-guard log user_prompt_submit
//!
//! # Print a starter config with every key at its default
//! hook-guard default-config > .claude/hook-guard.toml
//! ```

use std::env;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use hook_guard::{
    config::{find_project_root, Config, OutputFormat, DEFAULT_CONFIG_TOML},
    events::{self, EventLog},
    input, Delivery, Guard, HookInput, Verdict,
};

#[derive(Parser)]
#[command(
    name = "hook-guard",
    about = "Blocks dangerous commands and .env access before an assistant tool call runs",
    version
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "HOOK_GUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Verdict format: json or exit-code
    #[arg(short, long, global = true, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Report what would be blocked but allow everything
    #[arg(short, long, global = true, env = "HOOK_GUARD_WARN_ONLY")]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate one PreToolUse record from stdin (default)
    Check,

    /// Append a lifecycle event from stdin to the event log
    Log {
        /// Hook name recorded with the event (e.g. user_prompt_submit, stop)
        hook: String,
    },

    /// Print an example config file with every key at its default
    DefaultConfig,
}

impl Cli {
    /// Arguments the host could not have meant to break anything with
    fn fallback() -> Self {
        Cli {
            config: None,
            format: None,
            dry_run: false,
            command: None,
        }
    }
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(s).ok_or_else(|| format!("unknown format '{}' (json, exit-code)", s))
}

fn stderr_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_env("HOOK_GUARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }))
}

fn load_config(cli: &Cli) -> Config {
    match cli.config {
        Some(ref path) => Config::load_from(path)
            .map(Config::with_env_overrides)
            .unwrap_or_else(|e| {
                tracing::warn!("{}; using defaults", e);
                Config::default().with_env_overrides()
            }),
        None => Config::load(),
    }
}

fn read_stdin() -> String {
    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        tracing::warn!("failed to read stdin: {}", e);
    }
    buf
}

fn event_log(config: &Config) -> EventLog {
    if !config.events.enabled {
        return EventLog::default();
    }
    let root = find_project_root(&env::current_dir().unwrap_or_default());
    let dir = config.events_dir(&root);
    EventLog::new(Some(dir.as_path()))
}

fn run_check(config: &Config, format: OutputFormat, dry_run: bool) -> Delivery {
    let raw = read_stdin();

    // No input = nothing to check, allow
    if raw.trim().is_empty() {
        return Delivery::render(&Verdict::Allow, format, dry_run);
    }

    let input = match HookInput::from_json(&raw) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!("failed to parse hook input, allowing: {}", e);
            return Delivery::render(&Verdict::Allow, format, dry_run);
        }
    };

    let guard = Guard::new(&config.guard);
    let verdict = guard.check(&input);
    let enforced = config.general.enabled;

    if let Err(e) = event_log(config).record_verdict(&input, &verdict, enforced) {
        events::report_failure(events::GUARD_HOOK, &e);
    }

    if let Some(reason) = verdict.reason() {
        tracing::info!("blocked {}: {}", input.summary(), reason);
    }

    let effective = if enforced { verdict } else { Verdict::Allow };
    Delivery::render(&effective, format, dry_run)
}

fn run_log(config: &Config, hook: &str) {
    let log = event_log(config);
    if !log.is_enabled() {
        tracing::debug!("event log disabled, dropping {} event", hook);
        return;
    }

    let raw = read_stdin();
    if raw.trim().is_empty() {
        return;
    }

    let data: Value = serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::debug!("event payload is not JSON ({}), recording raw text", e);
        json!({ "raw": raw })
    });
    let session_id = input::session_id(&data);

    if let Err(e) = log.record(hook, data, session_id.as_deref()) {
        events::report_failure(hook, &e);
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) if env::args().skip(1).any(|a| a == "log") => {
            // A lifecycle payload must never be checked as a tool call
            eprintln!("Warning: event not recorded: {}", e);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            // A bad flag must not block the host's tool call
            eprintln!("Warning: ignoring arguments: {}", e);
            Cli::fallback()
        }
    };

    let early_debug = env::var("CLAUDE_HOOKS_DEBUG").as_deref() == Ok("1");
    let early = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(stderr_filter(early_debug))
        .with_target(false)
        .finish();
    let config = tracing::subscriber::with_default(early, || load_config(&cli));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(stderr_filter(config.general.debug))
        .with_target(false)
        .init();

    match cli.command {
        Some(Command::DefaultConfig) => {
            print!("{}", DEFAULT_CONFIG_TOML.trim_start());
            ExitCode::SUCCESS
        }
        Some(Command::Log { ref hook }) => {
            run_log(&config, hook);
            ExitCode::SUCCESS
        }
        Some(Command::Check) | None => {
            let format = cli.format.unwrap_or(config.general.format);
            let delivery = run_check(&config, format, cli.dry_run);

            if let Some(stdout) = delivery.stdout {
                let mut handle = io::stdout().lock();
                let _ = writeln!(handle, "{}", stdout);
                let _ = handle.flush();
            }
            if let Some(stderr) = delivery.stderr {
                eprintln!("{}", stderr);
            }
            ExitCode::from(delivery.exit_code)
        }
    }
}
