//! Configuration tests
//!
//! The template written on first start must parse back into the same
//! values, otherwise users discover a broken config the first time they
//! edit it.

use super::*;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let restored = Config::from_file_config(parsed.unwrap());
    assert_eq!(restored.typewriter, config.typewriter);
    assert_eq!(restored.upload, config.upload);
    assert_eq!(restored.logging.level, config.logging.level);
    assert_eq!(restored.logging.file_rotation, config.logging.file_rotation);
    assert_eq!(restored.logging.file_prefix, config.logging.file_prefix);
}

#[test]
fn test_texts_with_quotes_roundtrip() {
    let mut config = Config::default();
    config.typewriter.texts = vec![
        "Say \"lux\" twice".to_string(),
        "Back\\slash and ünïcödé".to_string(),
    ];

    let parsed: FileConfig = toml::from_str(&config.to_toml()).expect("template should parse");
    let restored = Config::from_file_config(parsed);
    assert_eq!(restored.typewriter.texts, config.typewriter.texts);
}

#[test]
fn test_custom_timings_roundtrip() {
    let mut config = Config::default();
    config.typewriter.type_speed = Duration::from_millis(80);
    config.upload.processing_delay = Duration::from_millis(1200);
    config.logging.file_rotation = LogRotation::Hourly;

    let parsed: FileConfig = toml::from_str(&config.to_toml()).expect("template should parse");
    let restored = Config::from_file_config(parsed);
    assert_eq!(restored.typewriter.type_speed, Duration::from_millis(80));
    assert_eq!(restored.upload.processing_delay, Duration::from_millis(1200));
    assert_eq!(restored.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults and partial files
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let parsed: FileConfig = toml::from_str("").unwrap();
    let config = Config::from_file_config(parsed);

    assert_eq!(config.typewriter.texts.len(), 4);
    assert_eq!(config.typewriter.type_speed, Duration::from_millis(100));
    assert_eq!(config.typewriter.delete_speed, Duration::from_millis(50));
    assert_eq!(config.typewriter.pause, Duration::from_millis(2000));
    assert_eq!(config.typewriter.start_delay, Duration::from_millis(500));
    assert_eq!(config.upload.settle_delay, Duration::from_millis(500));
    assert_eq!(config.upload.processing_delay, Duration::from_millis(3000));
    assert!(config.use_theme_background);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let parsed: FileConfig = toml::from_str(
        r#"
[typewriter]
texts = ["Only one"]
pause_ms = 750
"#,
    )
    .unwrap();
    let config = Config::from_file_config(parsed);

    assert_eq!(config.typewriter.texts, vec!["Only one".to_string()]);
    assert_eq!(config.typewriter.pause, Duration::from_millis(750));
    assert_eq!(config.typewriter.type_speed, Duration::from_millis(100));
}

#[test]
fn test_empty_texts_survive_parsing() {
    // Rejected later by the typewriter itself, not by the config layer
    let parsed: FileConfig = toml::from_str("[typewriter]\ntexts = []\n").unwrap();
    let config = Config::from_file_config(parsed);
    assert!(config.typewriter.texts.is_empty());
}

#[test]
fn test_zero_step_intervals_are_clamped() {
    let parsed: FileConfig = toml::from_str(
        r#"
[typewriter]
type_speed_ms = 0
delete_speed_ms = 0
pause_ms = 0
start_delay_ms = 0
"#,
    )
    .unwrap();
    let config = Config::from_file_config(parsed);

    assert_eq!(config.typewriter.type_speed, Duration::from_millis(1));
    assert_eq!(config.typewriter.delete_speed, Duration::from_millis(1));
    assert_eq!(config.typewriter.pause, Duration::from_millis(1));
    // A zero start delay is a single timer and stays as configured
    assert_eq!(config.typewriter.start_delay, Duration::ZERO);
}

#[test]
fn test_log_rotation_parse() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}

#[test]
fn test_wrong_type_is_rejected() {
    let parsed: Result<FileConfig, _> = toml::from_str("[upload]\nprocessing_delay_ms = \"3s\"\n");
    assert!(parsed.is_err());
}
