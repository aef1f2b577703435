/*!
 * Recognizer transcript model.
 *
 * A transcript is the output of the external speech recognizer: an ordered list of
 * segments (roughly one utterance each), every segment optionally carrying its
 * recognized words with start and end times in seconds. The JSON shape is the one
 * written by `whisper --output_format json --word_timestamps True`; fields this crate
 * does not use (`id`, `seek`, `tokens`, `probability`, ...) are ignored.
 */

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::TranscriptError;

/// One recognized word with its time span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Word text, trimmed after loading
    #[serde(alias = "word")]
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,
}

impl WordRecord {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// One recognizer segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    #[serde(default)]
    pub start: f64,

    #[serde(default)]
    pub end: f64,

    /// Full segment text as produced by the recognizer
    #[serde(default)]
    pub text: String,

    /// Word-level timings, absent when the recognizer ran without them
    #[serde(default)]
    pub words: Vec<WordRecord>,
}

impl TranscriptSegment {
    pub fn from_words(words: Vec<WordRecord>) -> Self {
        let start = words.first().map_or(0.0, |w| w.start);
        let end = words.last().map_or(0.0, |w| w.end);
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            start,
            end,
            text,
            words,
        }
    }
}

/// Complete recognizer output for one media file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transcript {
    /// Detected or requested language code
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self {
            language: None,
            text: String::new(),
            segments,
        }
    }

    /// Parse a transcript from its JSON text and normalize it
    pub fn from_json_str(content: &str) -> Result<Self, TranscriptError> {
        let transcript: Transcript =
            serde_json::from_str(content).map_err(|e| TranscriptError::Parse(e.to_string()))?;
        transcript.normalized()
    }

    /// Read and parse a transcript file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TranscriptError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Total number of words across all segments
    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|s| s.words.len()).sum()
    }

    /// Trim word text and reject segment or word timestamps the formatter cannot render
    fn normalized(mut self) -> Result<Self, TranscriptError> {
        for (segment_idx, segment) in self.segments.iter_mut().enumerate() {
            let invalid_segment = |reason: String| TranscriptError::InvalidSegment {
                segment: segment_idx,
                reason,
            };
            if !segment.start.is_finite() || segment.start < 0.0 {
                return Err(invalid_segment(format!("start time {} is out of range", segment.start)));
            }
            if !segment.end.is_finite() || segment.end < 0.0 {
                return Err(invalid_segment(format!("end time {} is out of range", segment.end)));
            }

            for (word_idx, word) in segment.words.iter_mut().enumerate() {
                let invalid = |reason: String| TranscriptError::InvalidWord {
                    segment: segment_idx,
                    word: word_idx,
                    reason,
                };

                if !word.start.is_finite() || word.start < 0.0 {
                    return Err(invalid(format!("start time {} is out of range", word.start)));
                }
                if !word.end.is_finite() || word.end < 0.0 {
                    return Err(invalid(format!("end time {} is out of range", word.end)));
                }
                if word.end < word.start {
                    warn!(
                        "Word '{}' in segment {} ends before it starts ({} < {})",
                        word.text.trim(), segment_idx, word.end, word.start
                    );
                }

                let trimmed = word.text.trim();
                if trimmed.len() != word.text.len() {
                    word.text = trimmed.to_string();
                }
            }
        }

        Ok(self)
    }
}
