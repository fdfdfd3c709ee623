use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::Path;

use crate::alignment::{Aligner, AlignmentReport};
use crate::app_config::Config;
use crate::diff_view;
use crate::errors::AlignError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleCollection;
use crate::text_utils;
use crate::video_encoder::VideoEncoder;

// @module: Application controller for subtitle realignment

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    fn aligner(&self) -> Aligner {
        Aligner::new(
            self.config.alignment.strategy,
            self.config.alignment.boundary_window,
        )
    }

    /// Align one subtitle file against a reference transcript and write
    /// the corrected SRT.
    ///
    /// Fails without writing output when the subtitle file has no
    /// recognizable cues, or when alignment yields zero usable cues.
    pub fn align_file(
        &self,
        subtitle_file: &Path,
        reference_file: &Path,
        output_file: &Path,
        force_overwrite: bool,
    ) -> Result<AlignmentReport> {
        if !FileManager::file_exists(subtitle_file) {
            return Err(anyhow::anyhow!("Subtitle file does not exist: {:?}", subtitle_file));
        }
        if !FileManager::file_exists(reference_file) {
            return Err(anyhow::anyhow!("Reference file does not exist: {:?}", reference_file));
        }
        if output_file.exists() && !force_overwrite {
            return Err(anyhow::anyhow!(
                "Output file already exists: {:?} (use -f to force overwrite)",
                output_file
            ));
        }

        let mut subtitles = SubtitleCollection::from_srt_file(subtitle_file)?;
        debug!("Parsed {} cues from {:?}", subtitles.entries.len(), subtitle_file);

        let reference = FileManager::read_to_string(reference_file)?;

        let aligner = self.aligner();
        info!(
            "Aligning {} cues with the {} strategy",
            subtitles.entries.len(),
            aligner.strategy()
        );

        let (texts, report) = aligner.align(&subtitles.entries, &reference);

        if report.usable == 0 {
            return Err(AlignError::EmptyResult)
                .with_context(|| format!("No cue received any reference text from {:?}", reference_file));
        }

        for (entry, text) in subtitles.entries.iter_mut().zip(texts) {
            entry.text = text;
        }

        if report.degraded() {
            warn!(
                "{} of {} cues fell back to interpolated offsets, {} were re-estimated proportionally",
                report.interpolated, report.cue_count, report.rescued
            );
        }

        let dropped = report.cue_count - report.usable;
        if dropped > 0 {
            info!("{} cues came out empty and will be omitted from the output", dropped);
        }

        subtitles.write_to_srt(output_file)?;
        info!("Corrected subtitles saved to {:?}", output_file);

        Ok(report)
    }

    /// Align every subtitle file under a directory against its sibling
    /// reference transcript (`<stem>.txt`).
    ///
    /// Pairs without a reference are skipped; per-file failures are
    /// reported and do not abort the batch.
    pub fn align_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<()> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let subtitle_files = FileManager::find_files(input_dir, "srt")?;
        if subtitle_files.is_empty() {
            warn!("No subtitle files found in {:?}", input_dir);
            return Ok(());
        }

        let progress_bar = ProgressBar::new(subtitle_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let mut aligned_count = 0;
        let mut failed_count = 0;

        for subtitle_file in &subtitle_files {
            progress_bar.set_message(
                subtitle_file
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            let reference_file = subtitle_file.with_extension("txt");
            if !FileManager::file_exists(&reference_file) {
                debug!(
                    "Skipping {:?}: no sibling reference transcript {:?}",
                    subtitle_file, reference_file
                );
                progress_bar.inc(1);
                continue;
            }

            let output_file = FileManager::generate_output_path(subtitle_file, "corrected", "srt");
            match self.align_file(subtitle_file, &reference_file, &output_file, force_overwrite) {
                Ok(_) => aligned_count += 1,
                Err(e) => {
                    failed_count += 1;
                    error!("Failed to align {:?}: {}", subtitle_file, e);
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        info!("Aligned {} file(s), {} failed", aligned_count, failed_count);

        if aligned_count == 0 && failed_count > 0 {
            return Err(anyhow::anyhow!("All {} subtitle file(s) failed to align", failed_count));
        }

        Ok(())
    }

    /// Drive the external encoder to produce a subtitled video.
    /// Encoder failure is caught and reported here rather than crashing
    /// the caller.
    pub async fn create_video(
        &self,
        audio_file: &Path,
        subtitle_file: &Path,
        output_file: &Path,
        duration: Option<f64>,
    ) -> Result<()> {
        let encoder = VideoEncoder::new(self.config.video.clone());

        info!("Creating video {:?}", output_file);
        match encoder.encode(audio_file, subtitle_file, output_file, duration).await {
            Ok(()) => {
                info!("Video created successfully: {:?}", output_file);
                Ok(())
            }
            Err(e) => {
                error!("Video creation failed: {}", e);
                Err(e)
            }
        }
    }

    /// Strip numbering and timestamps from a subtitle file, producing
    /// plain text with one line per cue.
    pub fn strip_file(&self, input_file: &Path, output_file: &Path) -> Result<()> {
        let subtitles = SubtitleCollection::from_srt_file(input_file)?;
        let plain = subtitles.to_plain_text();
        FileManager::write_to_file(output_file, &format!("{}\n", plain))?;
        info!("Subtitle text saved to {:?}", output_file);
        Ok(())
    }

    /// Collapse a paragraph-structured text file into one flat line
    pub fn flatten_file(&self, input_file: &Path, output_file: &Path) -> Result<()> {
        let content = FileManager::read_to_string(input_file)?;
        let flattened = text_utils::flatten_whitespace(&content);
        FileManager::write_to_file(output_file, &flattened)?;
        info!("Flattened text saved to {:?}", output_file);
        Ok(())
    }

    /// Unified diff between two text files
    pub fn diff_files(&self, file_a: &Path, file_b: &Path) -> Result<String> {
        let content_a = FileManager::read_to_string(file_a)?;
        let content_b = FileManager::read_to_string(file_b)?;

        Ok(diff_view::unified_diff(
            &content_a,
            &content_b,
            &file_a.to_string_lossy(),
            &file_b.to_string_lossy(),
            3,
        ))
    }

    /// Transfer the line structure of one text file onto another
    pub fn transfer_linebreaks_file(
        &self,
        broken_file: &Path,
        flat_file: &Path,
        output_file: &Path,
    ) -> Result<()> {
        let broken = FileManager::read_to_string(broken_file)?;
        let flat = FileManager::read_to_string(flat_file)?;

        let restructured = crate::alignment::linebreaks::transfer_line_breaks(&broken, &flat);
        FileManager::write_to_file(output_file, &format!("{}\n", restructured))?;
        info!("Restructured text saved to {:?}", output_file);
        Ok(())
    }
}
