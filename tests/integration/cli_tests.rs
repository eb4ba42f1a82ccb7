//! End-to-end tests for the hook-guard binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Isolated project directory with a config that logs into it
fn project(format: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".claude")).unwrap();
    std::fs::write(
        dir.path().join("hook-guard.toml"),
        format!(
            "[general]\nformat = \"{}\"\n\n[events]\ndir = \"{}\"\n",
            format,
            dir.path().join("logs").display()
        ),
    )
    .unwrap();
    dir
}

fn hook_guard(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hook-guard").unwrap();
    cmd.current_dir(dir)
        .arg("--config")
        .arg(dir.join("hook-guard.toml"))
        .env_remove("CLAUDE_HOOKS_ENABLED")
        .env_remove("CLAUDE_HOOKS_DEBUG")
        .env_remove("HOOK_GUARD_WARN_ONLY")
        .env_remove("HOOK_GUARD_CONFIG");
    cmd
}

fn log_contents(dir: &Path) -> String {
    let mut out = String::new();
    for entry in std::fs::read_dir(dir.join("logs")).unwrap() {
        out.push_str(&std::fs::read_to_string(entry.unwrap().path()).unwrap());
    }
    out
}

#[test]
fn test_json_deny() {
    let dir = project("json");
    hook_guard(dir.path())
        .write_stdin(r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""permissionDecision":"deny""#))
        .stdout(predicate::str::contains("dangerous destructive command"));
}

#[test]
fn test_json_allow() {
    let dir = project("json");
    hook_guard(dir.path())
        .write_stdin(r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf node_modules"}}"#)
        .assert()
        .success()
        .stdout("{}\n");
}

#[test]
fn test_exit_code_block() {
    let dir = project("exit-code");
    hook_guard(dir.path())
        .write_stdin(r#"{"tool_name":"Read","tool_input":{"file_path":"config/.env"}}"#)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("environment file access blocked"));
}

#[test]
fn test_exit_code_allow() {
    let dir = project("exit-code");
    hook_guard(dir.path())
        .write_stdin(r#"{"tool_name":"Read","tool_input":{"file_path":"config/.env.sample"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_format_flag_overrides_config() {
    let dir = project("json");
    hook_guard(dir.path())
        .args(["--format", "exit-code"])
        .write_stdin(r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf ~"}}"#)
        .assert()
        .code(2);
}

#[test]
fn test_malformed_input_fails_open() {
    let dir = project("exit-code");
    for stdin in ["not json at all", "", "[1,2,3]", r#"{"tool_name":"Bash","tool_input":"rm -rf /"}"#] {
        hook_guard(dir.path()).write_stdin(stdin).assert().success();
    }
}

#[test]
fn test_dry_run_allows() {
    let dir = project("exit-code");
    hook_guard(dir.path())
        .arg("--dry-run")
        .write_stdin(r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}"#)
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning"));
}

#[test]
fn test_disabled_allows_but_logs() {
    let dir = project("exit-code");
    hook_guard(dir.path())
        .env("CLAUDE_HOOKS_ENABLED", "false")
        .write_stdin(r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf /"},"session_id":"s-1"}"#)
        .assert()
        .success();

    let log = log_contents(dir.path());
    assert!(log.contains(r#""decision":"block""#));
    assert!(log.contains(r#""enforced":false"#));
}

#[test]
fn test_verdict_is_logged_per_session() {
    let dir = project("json");
    hook_guard(dir.path())
        .write_stdin(r#"{"tool_name":"Write","tool_input":{"file_path":"src/index.ts"},"session_id":"abc"}"#)
        .assert()
        .success();

    let names: Vec<String> = std::fs::read_dir(dir.path().join("logs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("hooks_log_"));
    assert!(names[0].ends_with("_abc.jsonl"));
    assert!(log_contents(dir.path()).contains(r#""hook":"pre_tool_use""#));
}

#[test]
fn test_log_subcommand_records_event() {
    let dir = project("json");
    hook_guard(dir.path())
        .args(["log", "user_prompt_submit"])
        .write_stdin(r#"{"prompt":"hello","session_id":"xyz"}"#)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let log = log_contents(dir.path());
    assert!(log.contains(r#""hook":"user_prompt_submit""#));
    assert!(log.contains(r#""prompt":"hello""#));
}

#[test]
fn test_log_subcommand_records_raw_text() {
    let dir = project("json");
    hook_guard(dir.path())
        .args(["log", "stop"])
        .write_stdin("plain text payload")
        .assert()
        .success();

    assert!(log_contents(dir.path()).contains(r#""raw":"plain text payload""#));
}

#[test]
fn test_bad_flag_fails_open() {
    let dir = project("exit-code");
    hook_guard(dir.path())
        .arg("--no-such-flag")
        .write_stdin(r#"{"tool_name":"Bash","tool_input":{"command":"ls"}}"#)
        .assert()
        .success();
}

#[test]
fn test_nested_session_id_names_log_file() {
    let dir = project("json");
    hook_guard(dir.path())
        .write_stdin(
            r#"{"tool_name":"Bash","tool_input":{"command":"ls"},"session":{"session_id":"nested-1"}}"#,
        )
        .assert()
        .success();

    let names: Vec<String> = std::fs::read_dir(dir.path().join("logs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with("_nested-1.jsonl"));
}

#[test]
fn test_bad_log_arguments_record_nothing() {
    let dir = project("exit-code");
    hook_guard(dir.path())
        .args(["log", "stop", "--no-such-flag"])
        .write_stdin(r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!dir.path().join("logs").exists());
}

#[test]
fn test_log_disabled_records_nothing() {
    let dir = project("json");
    std::fs::write(
        dir.path().join("hook-guard.toml"),
        format!(
            "[events]\nenabled = false\ndir = \"{}\"\n",
            dir.path().join("logs").display()
        ),
    )
    .unwrap();

    hook_guard(dir.path())
        .args(["log", "stop"])
        .assert()
        .success();

    assert!(!dir.path().join("logs").exists());
}

#[test]
fn test_default_config_parses() {
    let dir = project("json");
    let output = hook_guard(dir.path())
        .arg("default-config")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config: hook_guard::Config = toml::from_str(&String::from_utf8(output).unwrap()).unwrap();
    assert!(config.general.enabled);
    assert_eq!(config.events.dir, ".claude/logs");
}
