//! Integration tests for command-line configuration handling.
//!
//! These run the built binary with `--check-config` and the `config`
//! subcommand; no server is started.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

/// Helper to get the binary path
fn binary_path() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_BIN_EXE_hostmon-exporter"))
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn combined_output(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn test_default_config_is_valid() {
    let output = run(&["--no-config", "--check-config"]);
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Configuration is valid"));
}

#[test]
fn test_zero_top_processes_rejected() {
    let output = run(&["--no-config", "--top-processes", "0", "--check-config"]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("top_processes must be between 1 and 64"));
}

#[test]
fn test_tls_enabled_without_paths() {
    let output = run(&["--no-config", "--enable-tls", "--check-config"]);
    assert!(!output.status.success());
    assert!(combined_output(&output)
        .contains("TLS is enabled but neither tls_cert_path nor tls_key_path are set"));
}

#[test]
fn test_tls_enabled_with_nonexistent_files() {
    let output = run(&[
        "--no-config",
        "--enable-tls",
        "--tls-cert",
        "/nonexistent/cert.pem",
        "--tls-key",
        "/nonexistent/key.pem",
        "--check-config",
    ]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("TLS certificate file not found"));
}

#[test]
fn test_config_file_values_are_validated() {
    let mut file = NamedTempFile::with_suffix(".yaml").expect("Failed to create temp file");
    writeln!(file, "primary_disk_path: \"\"").unwrap();

    let path = file.path().to_string_lossy().to_string();
    let output = run(&["--config", &path, "--check-config"]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("primary_disk_path must not be empty"));
}

#[test]
fn test_show_config_json() {
    let output = run(&[
        "--no-config",
        "--port",
        "8123",
        "--show-config",
        "--config-format",
        "json",
    ]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("show-config output is not JSON");
    assert_eq!(value["port"], 8123);
    assert_eq!(value["fallback_disk_path"], "/");
}

#[test]
fn test_config_subcommand_to_stdout() {
    let output = run(&["config", "--output", "-", "--format", "yaml"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("top_processes: 8"));
    assert!(stdout.contains("port: 5000"));
}
