use anyhow::{anyhow, Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Extensions handed to the recognizer
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg", "ts",
    "wav", "mp3", "m4a", "flac", "ogg", "opus", "aac",
];

/// Extension of recognizer transcripts
pub const TRANSCRIPT_EXTENSION: &str = "json";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Fail unless the path names an existing regular file
    pub fn validate_input_file<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(anyhow!(
                "Input file not found: {:?}. Make sure the file exists",
                path
            ));
        }
        if !Self::file_exists(path) {
            return Err(anyhow!("Input path is not a file: {:?}", path));
        }
        Ok(())
    }

    // @generates: Output path for a subtitle file
    // @params: input_file, output_dir, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(extension.trim_start_matches('.'));

        output_dir.as_ref().join(output_filename)
    }

    /// Find files whose extension is one of `extensions` (case-insensitive), in one walk
    ///
    /// Entries that cannot be read are logged and skipped.
    pub fn find_files<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !Self::dir_exists(dir) {
            return Err(anyhow!("Directory does not exist: {:?}", dir));
        }

        let mut result = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let matches = entry.path().extension().is_some_and(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                extensions.iter().any(|wanted| wanted.trim_start_matches('.') == ext)
            });
            if matches {
                result.push(entry.into_path());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Find every transcript and media file below a directory
    pub fn find_inputs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut extensions = vec![TRANSCRIPT_EXTENSION];
        extensions.extend_from_slice(MEDIA_EXTENSIONS);
        Self::find_files(dir, &extensions)
    }

    /// Detect if a file is a recognizer transcript or a media file for the recognizer
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow!("File does not exist: {:?}", path));
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy().to_lowercase();

            if ext_str == TRANSCRIPT_EXTENSION {
                return Ok(FileType::Transcript);
            }
            if MEDIA_EXTENSIONS.contains(&ext_str.as_str()) {
                return Ok(FileType::Media);
            }
        }

        // Fall back to examining file contents
        if let Ok(content) = fs::read_to_string(path) {
            let trimmed = content.trim_start();
            if trimmed.starts_with('{') && content.contains("\"segments\"") {
                return Ok(FileType::Transcript);
            }
        }

        Ok(FileType::Unknown)
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileType {
    /// Recognizer output in JSON
    Transcript,
    /// Video or audio file for the recognizer
    Media,
    /// Unknown file type
    Unknown,
}
