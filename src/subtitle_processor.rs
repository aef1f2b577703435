use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::errors::SubtitleError;

// @module: Subtitle cues and SRT rendering

// @struct: One timed subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Caption text
    pub text: String,
}

impl Cue {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Cue {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Format a time in seconds as an SRT timestamp (HH:MM:SS,mmm)
///
/// Both the whole seconds and the milliseconds are truncated, never rounded:
/// `1.0009` renders as `00:00:01,000`. The hour field is not clamped, so inputs
/// of 100 hours or more render with three or more hour digits.
pub fn format_timestamp(seconds: f64) -> Result<String, SubtitleError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(SubtitleError::InvalidTimestamp { seconds });
    }

    // Truncate once on the whole value; 1.2 - 1.0 is 0.19999...
    let total_ms = (seconds * 1000.0) as u64;
    let total_secs = total_ms / 1_000;
    let millis = total_ms % 1_000;

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    Ok(format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis))
}

// @struct: Numbered cue as it appears in the output
#[derive(Debug, Clone, Copy)]
pub struct SubtitleEntry<'a> {
    // @field: 1-based sequence number
    pub seq_num: usize,

    // @field: Cue being emitted
    pub cue: &'a Cue,
}

impl SubtitleEntry<'_> {
    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> Result<String, SubtitleError> {
        format_timestamp(self.cue.start)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> Result<String, SubtitleError> {
        format_timestamp(self.cue.end)
    }

    /// Render the SRT block, failing on timestamps that cannot be formatted
    pub fn to_block(&self) -> Result<String, SubtitleError> {
        Ok(format!(
            "{}\n{} --> {}\n{}\n\n",
            self.seq_num,
            self.format_start_time()?,
            self.format_end_time()?,
            self.cue.text.trim()
        ))
    }
}

impl fmt::Display for SubtitleEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let block = self.to_block().map_err(|_| fmt::Error)?;
        f.write_str(&block)
    }
}

/// Ordered cues of one output file
///
/// Sequence numbers are not stored: they are assigned while emitting, counting
/// from 1 across the whole document regardless of which transcript segment a cue
/// came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleDocument {
    cues: Vec<Cue>,
}

impl SubtitleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cues(cues: Vec<Cue>) -> Self {
        SubtitleDocument { cues }
    }

    /// Append one cue after the existing ones
    pub fn push(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    /// Append cues in order
    pub fn extend<I: IntoIterator<Item = Cue>>(&mut self, cues: I) {
        self.cues.extend(cues);
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Iterate the cues paired with their 1-based sequence numbers
    pub fn entries(&self) -> impl Iterator<Item = SubtitleEntry<'_>> {
        self.cues.iter().enumerate().map(|(i, cue)| SubtitleEntry {
            seq_num: i + 1,
            cue,
        })
    }

    /// Render the whole document as SRT text
    pub fn to_srt_string(&self) -> Result<String, SubtitleError> {
        self.entries()
            .map(|entry| entry.to_block())
            .collect::<Result<Vec<_>, _>>()
            .map(|blocks| blocks.concat())
    }

    /// Write subtitles to an SRT file
    ///
    /// The whole document is rendered before the file is created, so a cue that
    /// cannot be formatted leaves no partial file behind.
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self
            .to_srt_string()
            .with_context(|| format!("Failed to render subtitle file: {}", path.display()))?;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        let written = writer.write_all(content.as_bytes()).and_then(|_| writer.flush());
        if let Err(e) = written {
            drop(writer);
            let _ = std::fs::remove_file(path);
            return Err(e).with_context(|| format!("Failed to write subtitle file: {}", path.display()));
        }

        Ok(())
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Document")?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        if let (Some(first), Some(last)) = (self.cues.first(), self.cues.last()) {
            writeln!(f, "Span: {:.3}s - {:.3}s", first.start, last.end)?;
        }
        Ok(())
    }
}
