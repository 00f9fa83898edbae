//! Configuration tests
//!
//! Round-trips guard the hand-written TOML template: every field written by
//! `to_toml()` must parse back into the same effective config.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

fn parse_file(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap_or_else(|e| panic!("TOML:\n{}\nError: {}", toml_str, e))
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let resolved = Config::resolve(parse_file(&config.to_toml()), no_env);

    assert_eq!(resolved.catalog_path, None);
    assert_eq!(resolved.scale, config.scale);
    assert_eq!(resolved.buffer, config.buffer);
    assert_eq!(resolved.viewport_height, config.viewport_height);
    assert_eq!(resolved.row_height, config.row_height);
    assert_eq!(resolved.icons, config.icons);
    assert_eq!(resolved.theme, config.theme);
    assert_eq!(resolved.show_fps, config.show_fps);
    assert_eq!(resolved.fps, config.fps);
    assert_eq!(resolved.logging.level, config.logging.level);
    assert_eq!(resolved.logging.file_rotation, config.logging.file_rotation);
}

#[test]
fn test_config_roundtrip_customized() {
    let config = Config {
        catalog_path: Some(PathBuf::from("/srv/items.json")),
        scale: 3,
        buffer: 12.5,
        row_height: 2,
        icons: vec!["A".into(), "B \"quoted\"".into()],
        theme: "Nord".into(),
        show_fps: false,
        fps: FpsConfig {
            refresh_interval_secs: 0.25,
        },
        logging: LoggingConfig {
            level: "debug".into(),
            file_enabled: true,
            file_rotation: LogRotation::Hourly,
            ..LoggingConfig::default()
        },
        ..Config::default()
    };

    let resolved = Config::resolve(parse_file(&config.to_toml()), no_env);

    assert_eq!(resolved.catalog_path, config.catalog_path);
    assert_eq!(resolved.scale, 3);
    assert_eq!(resolved.buffer, 12.5);
    assert_eq!(resolved.row_height, 2);
    assert_eq!(resolved.icons, config.icons);
    assert_eq!(resolved.theme, "Nord");
    assert!(!resolved.show_fps);
    assert_eq!(resolved.fps.refresh_interval_secs, 0.25);
    assert_eq!(resolved.logging.level, "debug");
    assert!(resolved.logging.file_enabled);
    assert_eq!(resolved.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_empty_file_uses_defaults() {
    let resolved = Config::resolve(parse_file(""), no_env);
    let defaults = Config::default();

    assert_eq!(resolved.scale, 10);
    assert_eq!(resolved.buffer, defaults.buffer);
    assert_eq!(resolved.icons, defaults.icons);
    assert!(resolved.enable_tui);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file = parse_file(
        r#"
scale = 4
buffer = 2.0
theme = "Light"
catalog_path = "/from/file.json"
"#,
    );
    let env = env_from(&[
        ("STOCKPILE_SCALE", "7"),
        ("STOCKPILE_BUFFER", "3"),
        ("STOCKPILE_THEME", "Dracula"),
        ("STOCKPILE_CATALOG", "/from/env.json"),
        ("STOCKPILE_NO_TUI", "1"),
    ]);

    let config = Config::resolve(file, env);
    assert_eq!(config.scale, 7);
    assert_eq!(config.buffer, 3.0);
    assert_eq!(config.theme, "Dracula");
    assert_eq!(config.catalog_path, Some(PathBuf::from("/from/env.json")));
    assert!(!config.enable_tui);
}

#[test]
fn test_unparseable_env_falls_back_to_file() {
    let file = parse_file("scale = 4");
    let config = Config::resolve(file, env_from(&[("STOCKPILE_SCALE", "lots")]));
    assert_eq!(config.scale, 4);
}

#[test]
fn test_no_tui_accepts_true_and_ignores_other_values() {
    let config = Config::resolve(FileConfig::default(), env_from(&[("STOCKPILE_NO_TUI", "TRUE")]));
    assert!(!config.enable_tui);

    let config = Config::resolve(FileConfig::default(), env_from(&[("STOCKPILE_NO_TUI", "0")]));
    assert!(config.enable_tui);
}

// ─────────────────────────────────────────────────────────────────────────────
// Clamping
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_out_of_range_values_are_clamped() {
    let file = parse_file(
        r#"
scale = 0
buffer = 9000.0
row_height = 7
viewport_height = -3.0
icons = []

[fps]
refresh_interval_secs = 0.01
"#,
    );
    let config = Config::resolve(file, no_env);

    assert_eq!(config.scale, 1);
    assert_eq!(config.buffer, MAX_BUFFER);
    assert_eq!(config.row_height, 3);
    assert_eq!(config.viewport_height, 24.0);
    assert_eq!(config.icons, crate::catalog::icons::default_glyphs());
    assert_eq!(config.fps.refresh_interval_secs, FpsConfig::MIN_INTERVAL);
}

#[test]
fn test_scale_is_capped() {
    let config = Config::resolve(FileConfig::default(), env_from(&[("STOCKPILE_SCALE", "4000000000")]));
    assert_eq!(config.scale, MAX_SCALE);

    let file = parse_file("scale = 20000");
    assert_eq!(Config::resolve(file, no_env).scale, MAX_SCALE);
}

#[test]
fn test_negative_buffer_clamps_to_zero() {
    let config = Config::resolve(FileConfig::default(), env_from(&[("STOCKPILE_BUFFER", "-5")]));
    assert_eq!(config.buffer, 0.0);
}

#[test]
fn test_log_rotation_parsing() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}

#[test]
fn test_malformed_file_is_rejected_by_parser() {
    let parsed: Result<FileConfig, _> = toml::from_str("scale = \"ten\"");
    assert!(parsed.is_err());
}
