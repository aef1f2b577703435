/*!
 * End-to-end tests from transcript file to SRT file
 */

use anyhow::Result;
use autosrt::app_config::CueGranularity;
use autosrt::app_controller::Controller;
use std::fs;
use crate::common;

const WHISPER_SRT: &str = "1\n00:00:00,000 --> 00:00:00,500\nI am\n\n\
2\n00:00:01,200 --> 00:00:01,500\nfine.\n\n\
3\n00:00:02,000 --> 00:00:02,600\nThanks.\n\n";

/// Test the full transcript to subtitle workflow
#[tokio::test]
async fn test_run_withTranscriptFile_shouldWriteNumberedSrt() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "talk.json")?;
    let output_dir = temp_dir.path().join("output");

    let controller = Controller::with_config(common::config_without_output_dir())?;
    let written = controller.run(input, output_dir.clone(), false).await?;

    let output_path = output_dir.join("talk.srt");
    assert_eq!(written, Some(output_path.clone()));
    assert_eq!(fs::read_to_string(output_path)?, WHISPER_SRT);
    Ok(())
}

/// Existing subtitles are kept unless overwriting is forced
#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "talk.json")?;
    let existing = common::create_test_file(temp_dir.path(), "talk.srt", "keep me")?;

    let controller = Controller::with_config(common::config_without_output_dir())?;

    let written = controller.run(input.clone(), temp_dir.path().to_path_buf(), false).await?;
    assert_eq!(written, None);
    assert_eq!(fs::read_to_string(&existing)?, "keep me");

    let written = controller.run(input, temp_dir.path().to_path_buf(), true).await?;
    assert_eq!(written, Some(existing.clone()));
    assert_eq!(fs::read_to_string(&existing)?, WHISPER_SRT);
    Ok(())
}

/// Segment granularity keeps each recognizer segment as one cue
#[tokio::test]
async fn test_run_withSegmentGranularity_shouldEmitOneCuePerSegment() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "talk.json")?;

    let mut config = common::config_without_output_dir();
    config.segmentation.granularity = CueGranularity::Segments;
    let controller = Controller::with_config(config)?;

    let written = controller.run(input, temp_dir.path().to_path_buf(), false).await?;

    let content = fs::read_to_string(written.unwrap())?;
    assert_eq!(
        content,
        "1\n00:00:00,000 --> 00:00:01,500\nI am fine.\n\n\
2\n00:00:02,000 --> 00:00:02,600\nThanks.\n\n"
    );
    Ok(())
}

/// A shorter length limit produces more cues
#[tokio::test]
async fn test_run_withSmallMaxTextLength_shouldSplitMore() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "talk.json")?;

    let mut config = common::config_without_output_dir();
    config.segmentation.max_text_length = 1;
    let controller = Controller::with_config(config)?;

    let written = controller.run(input, temp_dir.path().to_path_buf(), false).await?;

    let content = fs::read_to_string(written.unwrap())?;
    let texts: Vec<&str> = content
        .split("\n\n")
        .filter(|block| !block.is_empty())
        .filter_map(|block| block.lines().nth(2))
        .collect();
    assert_eq!(texts, vec!["I am", "fine.", "Thanks."]);
    Ok(())
}

/// Broken transcripts fail without writing anything
#[tokio::test]
async fn test_run_withCorruptTranscript_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "broken.json", "{\"segments\": [")?;
    let output_dir = temp_dir.path().join("out");

    let controller = Controller::with_config(common::config_without_output_dir())?;
    let result = controller.run(input, output_dir.clone(), false).await;

    assert!(result.is_err());
    assert!(!output_dir.join("broken.srt").exists());
    Ok(())
}

/// Missing inputs are reported with a helpful message
#[tokio::test]
async fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let controller = Controller::with_config(common::config_without_output_dir())?;
    let err = controller
        .run(temp_dir.path().join("missing.json"), temp_dir.path().to_path_buf(), false)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Input file not found"));
    Ok(())
}

/// A transcript with an invalid segment time fails every run and leaves no file to skip
#[tokio::test]
async fn test_run_withNegativeSegmentTime_shouldFailWithoutPartialOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "bad.json",
        r#"{"segments":[{"start":0.0,"end":1.0,"text":"ok"},{"start":-1.0,"end":2.0,"text":"bad"}]}"#,
    )?;
    let output_path = temp_dir.path().join("bad.srt");

    let mut config = common::config_without_output_dir();
    config.segmentation.granularity = CueGranularity::Segments;
    let controller = Controller::with_config(config)?;

    for _ in 0..2 {
        let result = controller.run(input.clone(), temp_dir.path().to_path_buf(), false).await;
        assert!(result.is_err());
        assert!(!output_path.exists());
    }
    Ok(())
}
