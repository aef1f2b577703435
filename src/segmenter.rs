/*!
 * Word segmentation into subtitle cues.
 *
 * The segmenter walks the words of one transcript segment once, growing a group of
 * consecutive words and flushing it as a cue when either:
 * - the silence between the previous word's end and the next word's start is longer
 *   than the pause threshold, or
 * - the group's text (words joined by single spaces) is already longer than the
 *   maximum text length.
 *
 * The length check runs before the next word is appended, so the word that crosses
 * the limit still lands in the current cue. A cue may therefore exceed the limit by
 * one separating space plus that word.
 */

use log::debug;

use crate::app_config::CueGranularity;
use crate::errors::SegmentError;
use crate::subtitle_processor::{Cue, SubtitleDocument};
use crate::transcript::{Transcript, WordRecord};

/// Default pause threshold in seconds
pub const DEFAULT_PAUSE_THRESHOLD_SECS: f64 = 0.4;

/// Default maximum cue text length in characters
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 40;

/// Validated segmentation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmenterOptions {
    pause_threshold: f64,
    max_text_length: usize,
}

impl SegmenterOptions {
    pub fn new(pause_threshold: f64, max_text_length: usize) -> Result<Self, SegmentError> {
        if !pause_threshold.is_finite() || pause_threshold <= 0.0 {
            return Err(SegmentError::InvalidPauseThreshold(pause_threshold));
        }
        if max_text_length == 0 {
            return Err(SegmentError::InvalidMaxTextLength(max_text_length));
        }

        Ok(Self {
            pause_threshold,
            max_text_length,
        })
    }

    pub fn pause_threshold(&self) -> f64 {
        self.pause_threshold
    }

    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        Self {
            pause_threshold: DEFAULT_PAUSE_THRESHOLD_SECS,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

/// Words collected for the next cue
struct Group<'a> {
    start: f64,
    words: Vec<&'a WordRecord>,
    // Character length of the words joined by single spaces
    text_len: usize,
}

impl<'a> Group<'a> {
    fn new() -> Self {
        Self {
            start: 0.0,
            words: Vec::new(),
            text_len: 0,
        }
    }

    fn push(&mut self, word: &'a WordRecord) {
        if self.words.is_empty() {
            self.start = word.start;
        } else {
            self.text_len += 1;
        }
        self.text_len += word.text.chars().count();
        self.words.push(word);
    }

    fn gap_before(&self, word: &WordRecord) -> f64 {
        self.words.last().map_or(0.0, |last| word.start - last.end)
    }

    /// Turn the collected words into a cue and leave the group empty
    fn flush(&mut self) -> Option<Cue> {
        let last = self.words.last()?;
        let text = self
            .words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let cue = Cue::new(self.start, last.end, text.trim());

        self.words.clear();
        self.text_len = 0;
        Some(cue)
    }
}

/// Group the words of one transcript segment into cues
pub fn segment(words: &[WordRecord], options: &SegmenterOptions) -> Result<Vec<Cue>, SegmentError> {
    if words.is_empty() {
        return Err(SegmentError::EmptyInput);
    }

    let mut cues = Vec::new();
    let mut group = Group::new();

    for word in words {
        let gap = group.gap_before(word);
        if gap > options.pause_threshold || group.text_len > options.max_text_length {
            cues.extend(group.flush());
        }
        group.push(word);
    }
    cues.extend(group.flush());

    Ok(cues)
}

/// Build the subtitle document for a whole transcript
///
/// Cues are appended in segment order. With word granularity, segments without
/// words are skipped and consume no sequence number.
pub fn build_document(
    transcript: &Transcript,
    granularity: CueGranularity,
    options: &SegmenterOptions,
) -> Result<SubtitleDocument, SegmentError> {
    transcript
        .segments
        .iter()
        .enumerate()
        .try_fold(SubtitleDocument::new(), |mut document, (idx, source)| -> Result<SubtitleDocument, SegmentError> {
            match granularity {
                CueGranularity::Words => {
                    if source.words.is_empty() {
                        debug!("Skipping segment {} without words", idx);
                        return Ok(document);
                    }
                    document.extend(segment(&source.words, options)?);
                }
                CueGranularity::Segments => {
                    let text = source.text.trim();
                    if text.is_empty() {
                        debug!("Skipping segment {} without text", idx);
                        return Ok(document);
                    }
                    document.push(Cue::new(source.start, source.end, text));
                }
            }
            Ok(document)
        })
}
