//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test file uses every fixture

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the softkey binary
pub fn softkey_bin() -> String {
    std::env::var("CARGO_BIN_EXE_softkey").unwrap_or_else(|_| "target/debug/softkey".to_string())
}

/// Creates a fresh, empty config directory.
pub fn temp_config_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Creates a Command with an isolated config directory.
pub fn softkey_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(softkey_bin());
    cmd.env("SOFTKEY_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Runs softkey with an isolated config directory.
pub fn run_softkey(args: &[&str], config_dir: &Path) -> Output {
    softkey_command(args, config_dir)
        .output()
        .expect("Failed to execute command")
}

/// Runs softkey, asserts success and parses stdout as JSON.
pub fn run_json(args: &[&str], config_dir: &Path) -> serde_json::Value {
    let output = run_softkey(args, config_dir);
    assert_eq!(
        output.status.code(),
        Some(0),
        "Command {args:?} should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Should parse JSON output")
}

/// Writes a config.toml into `config_dir`.
pub fn write_config(config_dir: &Path, content: &str) {
    std::fs::write(config_dir.join("config.toml"), content).expect("Failed to write config");
}
