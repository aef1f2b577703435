/*!
 * Error types for the autosrt application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while grouping words into cues
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentError {
    /// The segmenter was called without any words
    #[error("Cannot segment an empty word list")]
    EmptyInput,

    /// Pause threshold must be a finite number of seconds greater than zero
    #[error("Invalid pause threshold: {0} (must be a finite value > 0)")]
    InvalidPauseThreshold(f64),

    /// Maximum cue text length must be greater than zero
    #[error("Invalid maximum text length: {0} (must be > 0)")]
    InvalidMaxTextLength(usize),
}

/// Errors that can occur while rendering subtitles
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// Timestamp is negative, NaN or infinite
    #[error("Invalid timestamp: {seconds} seconds")]
    InvalidTimestamp {
        /// Offending value in seconds
        seconds: f64,
    },
}

/// Errors that can occur when loading recognizer output
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// The transcript document could not be parsed
    #[error("Failed to parse transcript: {0}")]
    Parse(String),

    /// A word carries an out-of-contract timestamp
    #[error("Invalid word {word} in segment {segment}: {reason}")]
    InvalidWord {
        /// Zero-based segment position
        segment: usize,
        /// Zero-based word position within the segment
        word: usize,
        /// What is wrong with it
        reason: String,
    },

    /// A segment carries an out-of-contract timestamp
    #[error("Invalid segment {segment}: {reason}")]
    InvalidSegment {
        /// Zero-based segment position
        segment: usize,
        /// What is wrong with it
        reason: String,
    },

    /// The transcript file could not be read
    #[error("Failed to read transcript: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when running the external recognizer
#[derive(Error, Debug)]
pub enum RecognizerError {
    /// The recognizer command could not be started
    #[error("Recognizer not available: {0}")]
    NotAvailable(String),

    /// The recognizer exited with a failure status
    #[error("Recognizer failed: {0}")]
    CommandFailed(String),

    /// The recognizer did not finish in time
    #[error("Recognizer timed out after {0} seconds")]
    Timeout(u64),

    /// The media file handed to the recognizer does not exist
    #[error("Recognizer input not found: {0}")]
    MissingInput(String),

    /// The recognizer finished but its transcript was not found
    #[error("Recognizer output not found: {0}")]
    MissingOutput(String),

    /// The recognizer output could not be loaded
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the recognizer
    #[error("Recognizer error: {0}")]
    Recognizer(#[from] RecognizerError),

    /// Error from transcript loading
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Error from segmentation
    #[error("Segmentation error: {0}")]
    Segment(#[from] SegmentError),

    /// Error from subtitle rendering
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

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
