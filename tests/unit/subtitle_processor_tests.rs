/*!
 * Tests for timestamp formatting and SRT rendering
 */

use anyhow::Result;
use std::fmt::Write;
use autosrt::errors::SubtitleError;
use autosrt::segmenter::{segment, SegmenterOptions};
use autosrt::subtitle_processor::{format_timestamp, Cue, SubtitleDocument};
use crate::common;

/// Test clock boundaries
#[test]
fn test_formatTimestamp_withRoundValues_shouldFormatClock() {
    assert_eq!(format_timestamp(0.0).unwrap(), "00:00:00,000");
    assert_eq!(format_timestamp(3661.5).unwrap(), "01:01:01,500");
    assert_eq!(format_timestamp(59.0).unwrap(), "00:00:59,000");
    assert_eq!(format_timestamp(60.0).unwrap(), "00:01:00,000");
    assert_eq!(format_timestamp(3599.5).unwrap(), "00:59:59,500");
}

/// Milliseconds are truncated, never rounded up
#[test]
fn test_formatTimestamp_withFractionalMillis_shouldTruncate() {
    assert_eq!(format_timestamp(59.999).unwrap(), "00:00:59,999");
    assert_eq!(format_timestamp(1.0009).unwrap(), "00:00:01,000");
    assert_eq!(format_timestamp(0.0015).unwrap(), "00:00:00,001");
}

/// The same input always yields the same string
#[test]
fn test_formatTimestamp_withRepeatedCalls_shouldBeStable() {
    let first = format_timestamp(12.345).unwrap();
    for _ in 0..10 {
        assert_eq!(format_timestamp(12.345).unwrap(), first);
    }
}

/// Hours are not clamped to two digits
#[test]
fn test_formatTimestamp_withHundredHours_shouldWidenHourField() {
    assert_eq!(format_timestamp(360_000.0).unwrap(), "100:00:00,000");
}

/// Out-of-contract inputs fail instead of rendering garbage
#[test]
fn test_formatTimestamp_withInvalidInput_shouldFail() {
    assert!(matches!(format_timestamp(-0.5), Err(SubtitleError::InvalidTimestamp { .. })));
    assert!(matches!(format_timestamp(f64::NAN), Err(SubtitleError::InvalidTimestamp { .. })));
    assert!(matches!(format_timestamp(f64::INFINITY), Err(SubtitleError::InvalidTimestamp { .. })));
}

/// Test the "I am fine" example end to end
#[test]
fn test_toSrtString_withIAmFineCues_shouldMatchExpectedDocument() -> Result<()> {
    let cues = segment(&common::i_am_fine_words(), &SegmenterOptions::default())?;
    let document = SubtitleDocument::from_cues(cues);

    assert_eq!(document.to_srt_string()?, common::I_AM_FINE_SRT);
    Ok(())
}

/// Numbering is assigned at emission and runs across appended batches
#[test]
fn test_entries_withAppendedBatches_shouldNumberContinuously() {
    let mut document = SubtitleDocument::new();
    document.extend(vec![Cue::new(0.0, 1.0, "one"), Cue::new(1.0, 2.0, "two")]);
    document.push(Cue::new(3.0, 4.0, "three"));

    let seq: Vec<usize> = document.entries().map(|e| e.seq_num).collect();

    assert_eq!(seq, vec![1, 2, 3]);
    assert_eq!(document.len(), 3);
}

/// Entry display renders one block with a trailing blank line
#[test]
fn test_subtitleEntry_display_withValidCue_shouldFormatBlock() {
    let document = SubtitleDocument::from_cues(vec![Cue::new(61.234, 65.432, " Hello world ")]);
    let entry = document.entries().next().unwrap();

    let mut output = String::new();
    write!(output, "{}", entry).unwrap();

    assert_eq!(output, "1\n00:01:01,234 --> 00:01:05,432\nHello world\n\n");
}

/// A bad timestamp anywhere fails the whole render
#[test]
fn test_toSrtString_withNegativeTimestamp_shouldFail() {
    let document = SubtitleDocument::from_cues(vec![
        Cue::new(0.0, 1.0, "fine"),
        Cue::new(-1.0, 2.0, "broken"),
    ]);

    assert!(matches!(
        document.to_srt_string(),
        Err(SubtitleError::InvalidTimestamp { seconds }) if seconds == -1.0
    ));
}

/// An empty document renders as empty text
#[test]
fn test_toSrtString_withNoCues_shouldBeEmpty() -> Result<()> {
    assert_eq!(SubtitleDocument::new().to_srt_string()?, "");
    Ok(())
}

/// Writing to a nested path creates the directories
#[test]
fn test_writeToSrt_withMissingParentDir_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("output").join("subtitles.srt");
    let document = SubtitleDocument::from_cues(vec![Cue::new(0.0, 0.5, "I am"), Cue::new(1.2, 1.5, "fine")]);

    document.write_to_srt(&path)?;

    assert_eq!(std::fs::read_to_string(&path)?, common::I_AM_FINE_SRT);
    Ok(())
}

/// A cue that cannot be rendered leaves no file behind
#[test]
fn test_writeToSrt_withInvalidCue_shouldNotCreateFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("broken.srt");
    let document = SubtitleDocument::from_cues(vec![
        Cue::new(0.0, 1.0, "ok"),
        Cue::new(-1.0, 2.0, "bad"),
    ]);

    assert!(document.write_to_srt(&path).is_err());
    assert!(!path.exists());
    Ok(())
}
