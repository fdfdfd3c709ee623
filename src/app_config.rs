use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::alignment::AlignmentStrategy;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Alignment engine settings
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Video encoder settings
    #[serde(default)]
    pub video: VideoConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alignment: AlignmentConfig::default(),
            video: VideoConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.alignment.boundary_window == 0 {
            return Err(anyhow!("alignment.boundary_window must be greater than zero"));
        }
        if self.alignment.boundary_window > 200 {
            return Err(anyhow!(
                "alignment.boundary_window of {} is unreasonably large (max 200)",
                self.alignment.boundary_window
            ));
        }

        if !RESOLUTION_REGEX.is_match(&self.video.resolution) {
            return Err(anyhow!(
                "video.resolution must look like WIDTHxHEIGHT, got: {}",
                self.video.resolution
            ));
        }
        if self.video.fallback_duration_secs <= 0.0 {
            return Err(anyhow!("video.fallback_duration_secs must be positive"));
        }
        if self.video.encode_timeout_secs == 0 {
            return Err(anyhow!("video.encode_timeout_secs must be greater than zero"));
        }

        Ok(())
    }
}

// @const: WIDTHxHEIGHT resolution format
static RESOLUTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2,5}x\d{2,5}$").unwrap()
});

/// Alignment engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AlignmentConfig {
    /// Strategy used to redistribute reference text across cues
    #[serde(default)]
    pub strategy: AlignmentStrategy,

    /// Search distance (in characters) for sentence and word boundaries
    /// when the proportional strategy places a cut
    #[serde(default = "default_boundary_window")]
    pub boundary_window: usize,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            strategy: AlignmentStrategy::default(),
            boundary_window: default_boundary_window(),
        }
    }
}

/// Video encoder configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VideoConfig {
    /// Output frame size as WIDTHxHEIGHT
    #[serde(default = "default_resolution")]
    pub resolution: String,

    /// Background color for the generated frames
    #[serde(default = "default_background")]
    pub background: String,

    /// Video codec passed to the encoder
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Audio codec passed to the encoder
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Pixel format for player compatibility
    #[serde(default = "default_pixel_format")]
    pub pixel_format: String,

    /// Duration in seconds used when the audio stream cannot be probed
    #[serde(default = "default_fallback_duration_secs")]
    pub fallback_duration_secs: f64,

    /// Maximum seconds to wait for the encoder before giving up
    #[serde(default = "default_encode_timeout_secs")]
    pub encode_timeout_secs: u64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            background: default_background(),
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            pixel_format: default_pixel_format(),
            fallback_duration_secs: default_fallback_duration_secs(),
            encode_timeout_secs: default_encode_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_boundary_window() -> usize {
    20
}

fn default_resolution() -> String {
    "1280x720".to_string()
}

fn default_background() -> String {
    "black".to_string()
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_pixel_format() -> String {
    "yuv420p".to_string()
}

fn default_fallback_duration_secs() -> f64 {
    300.0
}

fn default_encode_timeout_secs() -> u64 {
    600
}
