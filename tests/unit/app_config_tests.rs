/*!
 * Tests for application configuration
 */

use anyhow::Result;
use subalign::alignment::AlignmentStrategy;
use subalign::app_config::{Config, LogLevel};

/// Test that the default configuration is valid
#[test]
fn test_default_config_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.alignment.strategy, AlignmentStrategy::BestMatch);
    assert_eq!(config.alignment.boundary_window, 20);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test default video settings
#[test]
fn test_default_config_shouldHaveSaneVideoDefaults() {
    let config = Config::default();
    assert_eq!(config.video.resolution, "1280x720");
    assert_eq!(config.video.background, "black");
    assert_eq!(config.video.video_codec, "libx264");
    assert_eq!(config.video.audio_codec, "aac");
    assert_eq!(config.video.pixel_format, "yuv420p");
    assert_eq!(config.video.fallback_duration_secs, 300.0);
}

/// Test validation of a zero boundary window
#[test]
fn test_validate_withZeroBoundaryWindow_shouldFail() {
    let mut config = Config::default();
    config.alignment.boundary_window = 0;
    assert!(config.validate().is_err());
}

/// Test validation of an oversized boundary window
#[test]
fn test_validate_withHugeBoundaryWindow_shouldFail() {
    let mut config = Config::default();
    config.alignment.boundary_window = 5000;
    assert!(config.validate().is_err());
}

/// Test validation of a malformed resolution
#[test]
fn test_validate_withBadResolution_shouldFail() {
    let mut config = Config::default();
    config.video.resolution = "widescreen".to_string();
    assert!(config.validate().is_err());

    config.video.resolution = "1280x".to_string();
    assert!(config.validate().is_err());
}

/// Test JSON round trip of the configuration
#[test]
fn test_config_serde_withRoundTrip_shouldPreserveValues() -> Result<()> {
    let mut config = Config::default();
    config.alignment.strategy = AlignmentStrategy::Proportional;
    config.alignment.boundary_window = 30;

    let json = serde_json::to_string_pretty(&config)?;
    assert!(json.contains("\"proportional\""));

    let parsed: Config = serde_json::from_str(&json)?;
    assert_eq!(parsed.alignment.strategy, AlignmentStrategy::Proportional);
    assert_eq!(parsed.alignment.boundary_window, 30);

    Ok(())
}

/// Test that missing fields fall back to defaults
#[test]
fn test_config_serde_withPartialJson_shouldUseDefaults() -> Result<()> {
    let parsed: Config = serde_json::from_str(r#"{ "alignment": { "strategy": "proportional" } }"#)?;
    assert_eq!(parsed.alignment.strategy, AlignmentStrategy::Proportional);
    assert_eq!(parsed.alignment.boundary_window, 20);
    assert_eq!(parsed.video.resolution, "1280x720");

    Ok(())
}

/// Test strategy parsing from strings
#[test]
fn test_strategy_from_str_withKnownNames_shouldParse() {
    assert_eq!("proportional".parse::<AlignmentStrategy>().unwrap(), AlignmentStrategy::Proportional);
    assert_eq!("bestmatch".parse::<AlignmentStrategy>().unwrap(), AlignmentStrategy::BestMatch);
    assert_eq!("best-match".parse::<AlignmentStrategy>().unwrap(), AlignmentStrategy::BestMatch);
    assert!("nonsense".parse::<AlignmentStrategy>().is_err());
}
