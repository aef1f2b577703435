/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use autosrt::file_utils::{FileManager, FileType};
use std::path::PathBuf;
use crate::common;

/// Test output path generation
#[test]
fn test_generate_output_path_withInputFile_shouldUseStemAndExtension() {
    let output = FileManager::generate_output_path("/videos/video.mp4", "/tmp/output", "srt");
    assert_eq!(output, PathBuf::from("/tmp/output/video.srt"));

    let output = FileManager::generate_output_path("talk.final.json", "out", ".srt");
    assert_eq!(output, PathBuf::from("out/talk.final.srt"));
}

/// Test input validation
#[test]
fn test_validate_input_file_withVariousPaths_shouldValidateCorrectly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "clip.wav", "RIFF")?;

    assert!(FileManager::validate_input_file(&file).is_ok());

    let err = FileManager::validate_input_file(temp_dir.path().join("missing.wav")).unwrap_err();
    assert!(err.to_string().contains("Make sure the file exists"));

    let err = FileManager::validate_input_file(temp_dir.path()).unwrap_err();
    assert!(err.to_string().contains("not a file"));
    Ok(())
}

/// Test file type detection by extension and content
#[test]
fn test_detect_file_type_withVariousFiles_shouldDetectCorrectly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();

    let transcript = common::create_test_transcript(dir, "talk.json")?;
    let media = common::create_test_file(dir, "talk.MP4", "not really a video")?;
    let sniffed = common::create_test_transcript(dir, "talk.out")?;
    let unknown = common::create_test_file(dir, "notes.txt", "hello")?;

    assert_eq!(FileManager::detect_file_type(&transcript)?, FileType::Transcript);
    assert_eq!(FileManager::detect_file_type(&media)?, FileType::Media);
    assert_eq!(FileManager::detect_file_type(&sniffed)?, FileType::Transcript);
    assert_eq!(FileManager::detect_file_type(&unknown)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(dir.join("nope.json")).is_err());
    Ok(())
}

/// Test recursive input discovery
#[test]
fn test_find_inputs_withMixedFolder_shouldReturnSortedInputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    std::fs::create_dir(dir.join("nested"))?;

    common::create_test_transcript(dir, "b.json")?;
    common::create_test_file(dir, "a.wav", "RIFF")?;
    common::create_test_file(&dir.join("nested"), "c.mkv", "")?;
    common::create_test_file(dir, "readme.txt", "ignored")?;

    let inputs = FileManager::find_inputs(dir)?;

    let names: Vec<PathBuf> = inputs
        .iter()
        .map(|p| p.strip_prefix(dir).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        names,
        vec![PathBuf::from("a.wav"), PathBuf::from("b.json"), PathBuf::from("nested/c.mkv")]
    );
    Ok(())
}

/// Extensions match case-insensitively and only regular files are returned
#[test]
fn test_find_files_withUppercaseExtensionsAndDirs_shouldMatchFilesOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    std::fs::create_dir(dir.join("season.json"))?;
    common::create_test_file(dir, "EPISODE.WAV", "RIFF")?;
    common::create_test_file(dir, "episode.json", "{}")?;

    let found = FileManager::find_files(dir, &["wav", ".json"])?;

    assert_eq!(found, vec![dir.join("EPISODE.WAV"), dir.join("episode.json")]);
    assert!(FileManager::find_inputs(dir.join("missing")).is_err());
    Ok(())
}

/// Test nested directory creation
#[test]
fn test_ensure_dir_withMissingParents_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&path)?;
    FileManager::ensure_dir(&path)?;

    assert!(FileManager::dir_exists(&path));
    assert!(!FileManager::file_exists(&path));
    Ok(())
}
