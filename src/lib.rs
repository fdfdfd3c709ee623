/*!
 * # subalign - subtitle text realignment
 *
 * A Rust library for aligning machine-generated subtitle timing with
 * independently-corrected transcript text.
 *
 * ## Features
 *
 * - Parse and serialize SubRip (SRT) subtitle files
 * - Redistribute a corrected transcript across existing cue timestamps:
 *   - `BestMatch`: longest-common-subsequence position mapping with
 *     interpolation fallback
 *   - `Proportional`: character-share splitting with sentence and word
 *     boundary snapping
 * - Strip subtitle files to plain text, flatten paragraph structure
 * - Unified diff rendering for auditing corrections
 * - Transfer line structure between text variants
 * - Drive an external encoder to burn subtitles onto audio-backed video
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Subtitle file parsing and serialization
 * - `alignment`: The alignment engine:
 *   - `alignment::matcher`: Ratcliff/Obershelp sequence matching
 *   - `alignment::best_match`: Matching-block position mapping
 *   - `alignment::proportional`: Character-share splitting
 *   - `alignment::linebreaks`: Line-structure transfer
 * - `text_utils`: Paragraph splitting and whitespace flattening
 * - `diff_view`: Unified diff rendering
 * - `video_encoder`: External media-encoding collaborator
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod diff_view;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod text_utils;
pub mod video_encoder;

// Re-export main types for easier usage
pub use alignment::{Aligner, AlignmentReport, AlignmentStrategy};
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AlignError, AppError, EncodeError, ParseError};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
