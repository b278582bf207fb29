//! Integration tests for the `noccmd` binary.
//!
//! These tests cover argument parsing, the offline listings, config file
//! handling, and error exit codes without a live Zenoss server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

const NO_HOME: &str = "/tmp/noccmd-cli-test-nonexistent";

/// Build a [`Command`] for the `noccmd` binary with env isolation.
///
/// Clears every `ZENOSS_*` variable the CLI reads and points config
/// directories at `home` so tests never touch the user's configuration.
fn noccmd_in(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("noccmd");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG");
    for var in [
        "ZENOSS_PROFILE",
        "ZENOSS_HOST",
        "ZENOSS_PORT",
        "ZENOSS_SCHEME",
        "ZENOSS_USERNAME",
        "ZENOSS_PASSWORD",
        "ZENOSS_LIMIT",
        "ZENOSS_TIMEOUT",
        "ZENOSS_OUTPUT",
        "ZENOSS_DEFAULT_PROFILE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn noccmd() -> assert_cmd::Command {
    noccmd_in(Path::new(NO_HOME))
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// A local port with nothing listening on it.
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = noccmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    noccmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Zenoss")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("routers"))
            .and(predicate::str::contains("production-states")),
    );
}

#[test]
fn test_version_flag() {
    noccmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("noccmd"));
}

#[test]
fn test_devices_help_lists_filters() {
    noccmd().args(["devices", "--help"]).assert().success().stdout(
        predicate::str::contains("--organizer")
            .and(predicate::str::contains("--production-state"))
            .and(predicate::str::contains("--filter")),
    );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    noccmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_invalid_shell() {
    noccmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .code(2);
}

// ── Offline listings ────────────────────────────────────────────────

#[test]
fn test_routers_plain_lists_action_names() {
    let output = noccmd().args(["routers", "-o", "plain"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(names.len(), 11, "unexpected output:\n{stdout}");
    assert_eq!(names.first(), Some(&"MessagingRouter"));
    assert!(names.contains(&"DeviceRouter"));
    assert!(names.contains(&"ZenPackRouter"));
}

#[test]
fn test_routers_table_shows_endpoints() {
    noccmd().arg("routers").assert().success().stdout(
        predicate::str::contains("/zport/dmd/device_router")
            .and(predicate::str::contains("/zport/dmd/evconsole_router")),
    );
}

#[test]
fn test_production_states_json() {
    let output = noccmd()
        .args(["production-states", "-o", "json-compact"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["name"], "production");
    assert_eq!(parsed[0]["code"], 1000);
    assert_eq!(parsed[4]["code"], -1);
}

// ── Error exit codes ────────────────────────────────────────────────

#[test]
fn test_devices_without_host_is_usage_error() {
    let output = noccmd().arg("devices").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("No Zenoss host configured"),
        "unexpected output:\n{text}"
    );
}

#[test]
fn test_unknown_profile_is_usage_error() {
    let output = noccmd()
        .args(["devices", "--profile", "nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("'nope' not found"));
}

#[test]
fn test_devices_without_username_is_auth_error() {
    let output = noccmd()
        .args(["devices", "--host", "127.0.0.1", "--password", "zenoss"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("No credentials"));
}

#[test]
fn test_bad_filter_is_usage_error() {
    noccmd()
        .args(["devices", "--host", "127.0.0.1", "--filter", "collector"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_unreachable_server_is_connection_error() {
    let port = closed_port().to_string();
    let output = noccmd()
        .args([
            "devices",
            "--host",
            "127.0.0.1",
            "--port",
            &port,
            "-u",
            "admin",
            "--password",
            "zenoss",
            "--no-progress",
        ])
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(7),
        "unexpected output:\n{}",
        combined_output(&output)
    );
}

// ── Config file ─────────────────────────────────────────────────────

#[test]
fn test_config_path_points_into_config_home() {
    let home = tempfile::tempdir().unwrap();
    noccmd_in(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_then_show_redacts_password() {
    let home = tempfile::tempdir().unwrap();

    noccmd_in(home.path())
        .args([
            "config",
            "init",
            "--profile",
            "noc",
            "--host",
            "zenoss.example.com",
            "--username",
            "admin",
            "--password",
            "hunter2",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration written"));

    noccmd_in(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("zenoss.example.com")
                .and(predicate::str::contains("default_profile = \"noc\""))
                .and(predicate::str::contains("hunter2").not()),
        );
}

#[test]
fn test_config_init_requires_host() {
    let home = tempfile::tempdir().unwrap();
    noccmd_in(home.path())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--host"));
}

#[test]
fn test_config_init_never_saves_password_from_env() {
    let home = tempfile::tempdir().unwrap();

    noccmd_in(home.path())
        .env("ZENOSS_PASSWORD", "topsecret")
        .args(["config", "init", "--host", "zen", "--username", "admin"])
        .assert()
        .success()
        .stderr(predicate::str::contains("plaintext").not());

    let output = noccmd_in(home.path())
        .args(["config", "path"])
        .output()
        .unwrap();
    let path = String::from_utf8(output.stdout).unwrap();
    let written = std::fs::read_to_string(path.trim()).unwrap();
    assert!(written.contains("host = \"zen\""), "unexpected config:\n{written}");
    assert!(!written.contains("topsecret"), "password leaked:\n{written}");
    assert!(!written.contains("password"), "unexpected config:\n{written}");
}
