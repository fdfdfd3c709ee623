/*!
 * The alignment engine: redistributes trusted reference text across the
 * time boundaries of existing subtitle cues.
 *
 * Two strategies sit behind one interface:
 * - `Proportional` cuts the reference into per-cue spans by character
 *   share, snapping cuts to sentence and word boundaries.
 * - `BestMatch` matches the original cue text against the reference with
 *   a longest-common-subsequence style matcher and translates each cue's
 *   span through the matched blocks, interpolating where no direct
 *   mapping exists.
 *
 * Both guarantee: one output span per input cue, order preserved,
 * timestamps untouched.
 */

pub mod matcher;
pub mod proportional;
pub mod best_match;
pub mod linebreaks;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::subtitle_processor::SubtitleEntry;

/// Alignment strategy selection
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStrategy {
    // @strategy: Character-share split with boundary snapping
    Proportional,
    // @strategy: Matching-block position mapping with fallbacks
    #[default]
    BestMatch,
}

impl AlignmentStrategy {
    // @returns: Lowercase strategy identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Proportional => "proportional".to_string(),
            Self::BestMatch => "bestmatch".to_string(),
        }
    }
}

impl std::fmt::Display for AlignmentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for AlignmentStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "proportional" => Ok(Self::Proportional),
            "bestmatch" | "best-match" => Ok(Self::BestMatch),
            _ => Err(anyhow!("Invalid alignment strategy: {}", s)),
        }
    }
}

/// Summary of one alignment run
#[derive(Debug, Default, Clone, Copy)]
pub struct AlignmentReport {
    /// Number of input cues
    pub cue_count: usize,
    /// Cues whose text came out non-empty
    pub usable: usize,
    /// Cues that fell back to interpolated offsets
    pub interpolated: usize,
    /// Cues re-estimated from the cumulative character share
    pub rescued: usize,
}

impl AlignmentReport {
    /// Whether any cue needed a fallback
    pub fn degraded(&self) -> bool {
        self.interpolated > 0 || self.rescued > 0
    }
}

/// The alignment engine with a pluggable strategy
pub struct Aligner {
    strategy: AlignmentStrategy,
    boundary_window: usize,
}

impl Aligner {
    /// Create an engine for the given strategy.
    /// `boundary_window` is the sentence/word search distance used by the
    /// proportional strategy.
    pub fn new(strategy: AlignmentStrategy, boundary_window: usize) -> Self {
        Aligner { strategy, boundary_window }
    }

    /// The configured strategy
    pub fn strategy(&self) -> AlignmentStrategy {
        self.strategy
    }

    /// Produce one reference-text span per cue.
    ///
    /// The output length always equals the cue count and follows cue
    /// order; individual spans may be empty (dropped at serialization).
    pub fn align(&self, entries: &[SubtitleEntry], reference: &str) -> (Vec<String>, AlignmentReport) {
        let mut report = AlignmentReport {
            cue_count: entries.len(),
            ..AlignmentReport::default()
        };

        let texts = match self.strategy {
            AlignmentStrategy::Proportional => {
                proportional::align(entries, reference, self.boundary_window)
            }
            AlignmentStrategy::BestMatch => {
                let (texts, stats) = best_match::align(entries, reference);
                report.interpolated = stats.interpolated;
                report.rescued = stats.rescued;
                texts
            }
        };

        debug_assert_eq!(texts.len(), entries.len());
        report.usable = texts.iter().filter(|t| !t.is_empty()).count();

        (texts, report)
    }
}
