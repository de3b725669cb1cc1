//! Configuration system tests
//!
//! Tests for config paths and editor config loading/saving.

use caret::config::EditorConfig;
use caret::config_paths;
use caret::editable::{CharacterCasing, EditSettings, TextEditor};
use caret::HorizontalScrollPolicy;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("caret"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(file) = config_paths::config_file() {
        assert_eq!(file.file_name().and_then(|n| n.to_str()), Some("config.yaml"));
    }
}

#[test]
fn test_logs_dir_under_config_dir() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(config));
    }
}

// ========================================================================
// EditorConfig Tests
// ========================================================================

#[test]
fn test_default_config() {
    let config = EditorConfig::default();
    assert_eq!(config.settings, EditSettings::single_line());
    assert_eq!(config.caret_blink_ms, 530);
    assert_eq!(config.horizontal_scroll, HorizontalScrollPolicy::Minimal);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = EditorConfig {
        settings: EditSettings {
            max_length: Some(12),
            casing: CharacterCasing::Lower,
            ..EditSettings::multi_line()
        },
        caret_blink_ms: 0,
        horizontal_scroll: HorizontalScrollPolicy::ShowMaximumLineWidth,
        char_width: 7.5,
        line_height: 18.0,
    };
    config.save_to(&path).unwrap();

    let loaded = EditorConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_partial_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "settings:\n  accepts_return: true\n  wrapping: wrap\nhorizontal_scroll: show-maximum-line-width\n",
    )
    .unwrap();

    let config = EditorConfig::load_from(&path).unwrap();
    assert!(config.settings.accepts_return);
    assert!(!config.settings.accepts_tab);
    assert_eq!(
        config.horizontal_scroll,
        HorizontalScrollPolicy::ShowMaximumLineWidth
    );
    assert_eq!(config.char_width, 8.0);
}

#[test]
fn test_load_invalid_yaml_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "caret_blink_ms: [not, a, number]\n").unwrap();

    let err = EditorConfig::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

#[test]
fn test_load_missing_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(EditorConfig::load_from(&dir.path().join("missing.yaml")).is_err());
}

#[test]
fn test_editor_from_config() {
    let config = EditorConfig {
        settings: EditSettings {
            casing: CharacterCasing::Upper,
            ..EditSettings::single_line()
        },
        caret_blink_ms: 0,
        ..EditorConfig::default()
    };
    let mut editor = TextEditor::from_config(&config);
    editor.type_text("shout");
    assert_eq!(editor.text(), "SHOUT");

    // Blinking disabled: always visible
    editor.tick(std::time::Duration::from_secs(3));
    assert!(editor.caret_visible());
}
