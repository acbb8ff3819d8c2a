//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// A small external catalog with one map and a three-item checklist.
pub const TEST_CATALOG: &str = r#"
[[maps]]
id = "test-map"
name = "Test Map"
tools = ["bomb", "valve"]
stations = ["North", "South", "East"]

[[maps.keywords]]
word = "north"
station = "North"

[[maps.keywords]]
word = "up"
station = "North"

[[maps.keywords]]
word = "south"
station = "South"

[[maps.keywords]]
word = "down"
station = "South"

[[maps.keywords]]
word = "east"
station = "East"

[[maps.valves]]
start = "North"
end = "South"
values = { "East" = 2 }

[[maps.checklist]]
id = "parent"
label = "Parent"

[[maps.checklist.children]]
id = "child-a"
label = "Child A"

[[maps.checklist.children]]
id = "child-b"
label = "Child B"
"#;

/// Path to the egghelper binary.
pub fn egghelper_bin() -> &'static str {
    env!("CARGO_BIN_EXE_egghelper")
}

/// Creates an empty config directory.
pub fn temp_config_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Builds a command that reads its config from `config_dir`.
pub fn isolated_command(config_dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(egghelper_bin());
    cmd.env("EGGHELPER_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Runs a command against a fresh config directory.
pub fn run_isolated(args: &[&str]) -> Output {
    let config_dir = temp_config_dir();
    isolated_command(config_dir.path(), args)
        .output()
        .expect("Failed to execute command")
}

/// Writes [`TEST_CATALOG`] into `dir` and returns its path.
pub fn write_test_catalog(dir: &Path) -> PathBuf {
    let path = dir.join("catalog.toml");
    fs::write(&path, TEST_CATALOG).expect("Failed to write catalog");
    path
}

/// Writes a config file selecting `catalog` and `default_map`.
pub fn write_config_with_catalog(config_dir: &Path, catalog: &Path, default_map: &str) {
    let content = format!(
        "[paths]\ncatalog = {:?}\n\n[ui]\ndefault_map = {:?}\n",
        catalog.to_string_lossy(),
        default_map
    );
    fs::write(config_dir.join("config.toml"), content).expect("Failed to write config");
}

/// Parses stdout as JSON, failing with stderr on error.
pub fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "Invalid JSON ({e}). stdout: {stdout}\nstderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

/// Station names of a JSON array of strings.
pub fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("Expected an array")
        .iter()
        .map(|v| v.as_str().expect("Expected a string").to_string())
        .collect()
}
