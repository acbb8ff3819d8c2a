//! End-to-end tests for `egghelper config` commands.

use std::fs;
use std::sync::Mutex;

mod fixtures;
use fixtures::*;

// Config tests write files; keep them from interleaving.
static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let output = run_isolated(&["config", "show"]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Catalog: (built-in)"));
    assert!(stdout.contains("not configured, manual selection only"));
    assert!(stdout.contains("Default Map:    gorod-krovi"));
}

#[test]
fn test_config_show_json_schema() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let config_dir = temp_config_dir();
    let output = isolated_command(config_dir.path(), &["config", "show", "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);

    assert!(json["config_file"]
        .as_str()
        .unwrap()
        .ends_with("config.toml"));
    assert!(json["paths"].is_object());
    assert!(json["paths"].get("catalog").is_none());
    assert_eq!(json["speech"]["language"], "en-GB");
    assert_eq!(json["speech"]["configured"], false);
    assert_eq!(json["ui"]["theme"], "auto");
    assert_eq!(json["ui"]["show_checklist"], true);
    assert_eq!(json["ui"]["default_map"], "gorod-krovi");
    assert_eq!(json["ui"]["wide_layout_min_width"], 120);
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_requires_an_option() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let output = run_isolated(&["config", "set"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("At least one configuration option"));
}

#[test]
fn test_config_set_persists_values() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let config_dir = temp_config_dir();

    let output = isolated_command(
        config_dir.path(),
        &[
            "config",
            "set",
            "--theme",
            "dark",
            "--speech-command",
            "whisper-listen --lang {lang}",
            "--language",
            "en-US",
            "--show-checklist",
            "false",
            "--wide-width",
            "100",
        ],
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(config_dir.path().join("config.toml").exists());

    let output = isolated_command(config_dir.path(), &["config", "show", "--json"])
        .output()
        .expect("Failed to execute command");
    let json = stdout_json(&output);

    assert_eq!(
        string_list(&json["speech"]["command"]),
        vec!["whisper-listen", "--lang", "{lang}"]
    );
    assert_eq!(json["speech"]["language"], "en-US");
    assert_eq!(json["speech"]["configured"], true);
    assert_eq!(json["ui"]["theme"], "dark");
    assert_eq!(json["ui"]["show_checklist"], false);
    assert_eq!(json["ui"]["wide_layout_min_width"], 100);
}

#[test]
fn test_config_set_invalid_theme() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let config_dir = temp_config_dir();

    let output = isolated_command(config_dir.path(), &["config", "set", "--theme", "sepia"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid theme mode"));
    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_unknown_default_map() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let config_dir = temp_config_dir();

    let output = isolated_command(
        config_dir.path(),
        &["config", "set", "--default-map", "shadows-of-evil"],
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown map 'shadows-of-evil'"));
}

#[test]
fn test_config_set_catalog_and_back() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let config_dir = temp_config_dir();
    let catalog = write_test_catalog(config_dir.path());
    let catalog_arg = catalog.to_string_lossy().to_string();

    let output = isolated_command(
        config_dir.path(),
        &[
            "config",
            "set",
            "--catalog",
            &catalog_arg,
            "--default-map",
            "test-map",
        ],
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = isolated_command(config_dir.path(), &["maps", "--json"])
        .output()
        .expect("Failed to execute command");
    let json = stdout_json(&output);
    assert_eq!(json[0]["id"], "test-map");

    let output = isolated_command(
        config_dir.path(),
        &["config", "set", "--catalog", "", "--default-map", "gorod-krovi"],
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let saved = fs::read_to_string(config_dir.path().join("config.toml")).unwrap();
    assert!(!saved.contains("catalog.toml"));
}

#[test]
fn test_config_set_invalid_catalog() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let config_dir = temp_config_dir();
    let catalog = config_dir.path().join("broken.toml");
    fs::write(&catalog, "maps = 3").unwrap();
    let catalog_arg = catalog.to_string_lossy().to_string();

    let output = isolated_command(config_dir.path(), &["config", "set", "--catalog", &catalog_arg])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid catalog"));
}
