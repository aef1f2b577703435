/*!
 * # autosrt - subtitles from speech recognition
 *
 * A Rust library that turns word-level speech recognition output into SubRip (SRT)
 * subtitles.
 *
 * ## Features
 *
 * - Read `whisper` JSON transcripts with word timestamps
 * - Run the `whisper` command on video or audio files
 * - Group words into cues on pauses and caption length
 * - Render `HH:MM:SS,mmm` SRT timings with document-wide numbering
 * - Process single files or whole directories
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `transcript`: Recognizer output model (segments and timed words)
 * - `segmenter`: Grouping words into cues and building whole documents
 * - `subtitle_processor`: Cues, timestamp formatting and SRT output
 * - `recognizer`: Backends that produce transcripts:
 *   - `recognizer::whisper`: `whisper` command-line program
 *   - `recognizer::mock`: Canned transcripts for tests
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod recognizer;
pub mod segmenter;
pub mod subtitle_processor;
pub mod transcript;

// Re-export main types for easier usage
pub use app_config::{Config, CueGranularity};
pub use errors::{AppError, RecognizerError, SegmentError, SubtitleError, TranscriptError};
pub use segmenter::{build_document, segment, SegmenterOptions};
pub use subtitle_processor::{format_timestamp, Cue, SubtitleDocument, SubtitleEntry};
pub use transcript::{Transcript, TranscriptSegment, WordRecord};
