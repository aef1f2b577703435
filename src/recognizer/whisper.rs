/*!
 * Recognizer backed by the `whisper` command-line program.
 *
 * The program is run with word timestamps enabled and JSON output written into a
 * scratch directory, which is then loaded as a [`Transcript`].
 */

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::process::Command;

use crate::app_config::RecognizerConfig;
use crate::errors::RecognizerError;
use crate::language_utils;
use crate::recognizer::Recognizer;
use crate::transcript::Transcript;

/// Noise the recognizer prints to stderr on every run
const STDERR_NOISE_PREFIXES: &[&str] = &[
    "warnings.warn(",
    "UserWarning: FP16 is not supported on CPU",
    "Detecting language using up to",
    "Detected language:",
    "100%|",
];

/// `whisper` CLI recognizer
#[derive(Debug, Clone)]
pub struct WhisperCli {
    command: String,
    model: String,
    language: Option<String>,
    timeout: Duration,
}

impl WhisperCli {
    pub fn new(command: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            model: model.into(),
            language: None,
            timeout: Duration::from_secs(3600),
        }
    }

    /// Build from configuration, normalizing the language to the code the CLI expects
    pub fn from_config(config: &RecognizerConfig) -> Self {
        let language = config.language.as_deref().map(|code| {
            language_utils::normalize_to_part1_or_part2t(code).unwrap_or_else(|e| {
                warn!("Language code issue: {}", e);
                code.to_string()
            })
        });

        Self {
            command: config.command.clone(),
            model: config.model.clone(),
            language,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Command-line arguments for one media file
    pub fn build_args(&self, media_path: &Path, output_dir: &Path) -> Vec<String> {
        let mut args = vec![
            media_path.to_string_lossy().to_string(),
            "--model".to_string(),
            self.model.clone(),
        ];

        if let Some(language) = &self.language {
            args.push("--language".to_string());
            args.push(language.clone());
        }

        args.extend(
            [
                "--word_timestamps",
                "True",
                "--output_format",
                "json",
                "--output_dir",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        args.push(output_dir.to_string_lossy().to_string());
        args.push("--verbose".to_string());
        args.push("False".to_string());

        args
    }

    /// Path of the JSON transcript the CLI writes for a media file
    pub fn output_path(media_path: &Path, output_dir: &Path) -> PathBuf {
        let stem = media_path.file_stem().unwrap_or_default();
        output_dir.join(format!("{}.json", stem.to_string_lossy()))
    }

    async fn run(&self, args: &[String]) -> Result<Output, RecognizerError> {
        let mut command = Command::new(&self.command);
        command.args(args).kill_on_drop(true);
        let child = command.output();

        tokio::select! {
            result = child => {
                result.map_err(|e| RecognizerError::NotAvailable(format!("{}: {}", self.command, e)))
            },
            _ = tokio::time::sleep(self.timeout) => {
                Err(RecognizerError::Timeout(self.timeout.as_secs()))
            }
        }
    }

    /// Keep only stderr lines that explain a failure
    pub fn filter_stderr(stderr: &str) -> String {
        let meaningful: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !STDERR_NOISE_PREFIXES.iter().any(|p| line.starts_with(p)))
            .collect();

        if meaningful.is_empty() {
            "unknown recognizer error (stderr was empty after filtering)".to_string()
        } else {
            meaningful.join("\n")
        }
    }
}

#[async_trait]
impl Recognizer for WhisperCli {
    async fn transcribe(&self, media_path: &Path) -> Result<Transcript, RecognizerError> {
        if !media_path.is_file() {
            return Err(RecognizerError::MissingInput(media_path.display().to_string()));
        }

        let scratch = tempfile::tempdir()
            .map_err(|e| RecognizerError::CommandFailed(format!("cannot create scratch directory: {}", e)))?;
        let args = self.build_args(media_path, scratch.path());
        debug!("Running {} {}", self.command, args.join(" "));

        let output = self.run(&args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognizerError::CommandFailed(Self::filter_stderr(&stderr)));
        }

        let transcript_path = Self::output_path(media_path, scratch.path());
        if !transcript_path.is_file() {
            return Err(RecognizerError::MissingOutput(transcript_path.display().to_string()));
        }

        let transcript = Transcript::from_file(&transcript_path)?;
        debug!(
            "Recognizer produced {} segments, {} words",
            transcript.segments.len(),
            transcript.word_count()
        );

        Ok(transcript)
    }

    async fn check_available(&self) -> Result<(), RecognizerError> {
        let output = self.run(&["--help".to_string()]).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(RecognizerError::NotAvailable(format!(
                "{} --help exited with {}",
                self.command, output.status
            )))
        }
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
