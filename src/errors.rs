/*!
 * Error types for the subalign application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading subtitle input
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input contained no recognizable cue blocks
    #[error("no subtitle cues found in {}", file.display())]
    NoCues {
        /// File the content came from
        file: PathBuf,
    },

    /// A timestamp line could not be interpreted
    #[error("invalid timestamp at line {line}: {text}")]
    BadTimestamp {
        /// 1-based line number in the input
        line: usize,
        /// The offending line
        text: String,
    },
}

/// Errors that can occur during alignment
#[derive(Error, Debug)]
pub enum AlignError {
    /// Alignment produced zero usable cues
    #[error("alignment produced no usable cues")]
    EmptyResult,
}

/// Errors from the external media-encoding tools
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The tool exited with a non-zero status
    #[error("{tool} failed: {message}")]
    ToolFailed {
        /// Tool name (ffmpeg, ffprobe)
        tool: String,
        /// Filtered stderr from the tool
        message: String,
    },

    /// The tool did not finish within the allowed time
    #[error("{tool} timed out after {seconds}s")]
    Timeout {
        /// Tool name
        tool: String,
        /// Timeout that was exceeded
        seconds: u64,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error from alignment
    #[error("Alignment error: {0}")]
    Align(#[from] AlignError),

    /// Error from the media encoder
    #[error("Encoder error: {0}")]
    Encode(#[from] EncodeError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
