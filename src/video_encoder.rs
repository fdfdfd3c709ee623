use anyhow::{anyhow, Context, Result};
use log::{error, warn};
use std::path::Path;
use tokio::process::Command;

use crate::app_config::VideoConfig;
use crate::errors::EncodeError;

// @module: External media-encoding collaborator (ffmpeg/ffprobe)

/// Wrapper around the external encoder that burns a subtitle file onto a
/// black-background video with the given audio track.
pub struct VideoEncoder {
    config: VideoConfig,
}

impl VideoEncoder {
    /// Create an encoder with the given settings
    pub fn new(config: VideoConfig) -> Self {
        VideoEncoder { config }
    }

    /// Probe the duration of an audio stream in seconds via ffprobe
    pub async fn probe_audio_duration<P: AsRef<Path>>(audio_path: P) -> Result<f64> {
        let audio_path = audio_path.as_ref();

        if !audio_path.exists() {
            return Err(anyhow!("Audio file does not exist: {:?}", audio_path));
        }

        let ffprobe_future = Command::new("ffprobe")
            .args([
                "-v", "error",
                "-show_entries", "format=duration",
                "-of", "default=noprint_wrappers=1:nokey=1",
                audio_path.to_str().unwrap_or_default(),
            ])
            .output();

        let timeout_duration = std::time::Duration::from_secs(60);
        let output = tokio::select! {
            result = ffprobe_future => {
                result.map_err(|e| anyhow!("Failed to execute ffprobe command: {}", e))?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(EncodeError::Timeout { tool: "ffprobe".to_string(), seconds: 60 }.into());
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EncodeError::ToolFailed {
                tool: "ffprobe".to_string(),
                message: stderr.trim().to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .trim()
            .parse::<f64>()
            .context("Failed to parse ffprobe duration output")
    }

    /// Create a fixed-frame video with black background, the audio
    /// stream, and burned-in subtitles.
    ///
    /// When `duration` is None the audio stream duration is probed; if
    /// probing fails the configured fallback duration is used.
    pub async fn encode<P: AsRef<Path>>(
        &self,
        audio_path: P,
        subtitle_path: P,
        output_path: P,
        duration: Option<f64>,
    ) -> Result<()> {
        let audio_path = audio_path.as_ref();
        let subtitle_path = subtitle_path.as_ref();
        let output_path = output_path.as_ref();

        if !audio_path.exists() {
            return Err(anyhow!("Audio file does not exist: {:?}", audio_path));
        }
        if !subtitle_path.exists() {
            return Err(anyhow!("Subtitle file does not exist: {:?}", subtitle_path));
        }

        let duration = match duration {
            Some(explicit) => explicit,
            None => match Self::probe_audio_duration(audio_path).await {
                Ok(probed) => probed,
                Err(e) => {
                    warn!(
                        "Could not detect audio duration ({}), using fallback of {}s",
                        e, self.config.fallback_duration_secs
                    );
                    self.config.fallback_duration_secs
                }
            },
        };

        let color_input = format!(
            "color=c={}:s={}:d={}",
            self.config.background, self.config.resolution, duration
        );
        let subtitle_filter = format!("subtitles={}", subtitle_path.to_str().unwrap_or_default());

        let ffmpeg_future = Command::new("ffmpeg")
            .args([
                "-y",
                "-f", "lavfi",
                "-i", &color_input,
                "-i", audio_path.to_str().unwrap_or_default(),
                "-vf", &subtitle_filter,
                "-c:v", &self.config.video_codec,
                "-c:a", &self.config.audio_codec,
                "-pix_fmt", &self.config.pixel_format,
                "-shortest",
                output_path.to_str().unwrap_or_default(),
            ])
            .output();

        let timeout_secs = self.config.encode_timeout_secs;
        let timeout_duration = std::time::Duration::from_secs(timeout_secs);
        let result = tokio::select! {
            result = ffmpeg_future => {
                result.map_err(|e| anyhow!("Failed to execute ffmpeg command: {}", e))?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(EncodeError::Timeout { tool: "ffmpeg".to_string(), seconds: timeout_secs }.into());
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let filtered = Self::filter_ffmpeg_stderr(&stderr);
            error!("Video encoding failed: {}", filtered);
            return Err(EncodeError::ToolFailed {
                tool: "ffmpeg".to_string(),
                message: filtered,
            }
            .into());
        }

        Ok(())
    }

    /// Filter ffmpeg stderr to only show meaningful error lines, stripping the
    /// version banner, build configuration, and stream metadata noise.
    fn filter_ffmpeg_stderr(stderr: &str) -> String {
        let dominated_prefixes = [
            "ffmpeg version",
            "  built with",
            "  configuration:",
            "  lib",
            "Input #",
            "  Metadata:",
            "  Duration:",
            "  Stream #",
            "      Metadata:",
            "Output #",
            "Stream mapping:",
            "Press [q]",
        ];

        let meaningful: Vec<&str> = stderr
            .lines()
            .filter(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    return false;
                }
                !dominated_prefixes.iter().any(|p| line.starts_with(p) || trimmed.starts_with(p))
            })
            .collect();

        if meaningful.is_empty() {
            "unknown ffmpeg error (stderr was empty after filtering)".to_string()
        } else {
            meaningful.join("\n")
        }
    }
}
