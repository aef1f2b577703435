use anyhow::{anyhow, Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType};
use crate::language_utils;
use crate::recognizer::{Recognizer, WhisperCli};
use crate::segmenter::{self, SegmenterOptions};
use crate::subtitle_processor::SubtitleDocument;
use crate::transcript::Transcript;

// @module: Application controller for subtitle generation

/// Outcome of processing a folder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for subtitle generation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Validated segmentation parameters
    options: SegmenterOptions,

    // @field: Backend used for media inputs
    recognizer: Arc<dyn Recognizer>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let recognizer = Arc::new(WhisperCli::from_config(&config.recognizer));
        Self::with_recognizer(config, recognizer)
    }

    /// Create a controller with an explicit recognizer backend
    pub fn with_recognizer(config: Config, recognizer: Arc<dyn Recognizer>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let options = config.segmentation.segmenter_options()?;

        Ok(Self {
            config,
            options,
            recognizer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Output directory for an input, honoring the configured directory
    pub fn output_dir_for(&self, input_file: &Path) -> PathBuf {
        match &self.config.output.directory {
            Some(dir) => PathBuf::from(dir),
            None => input_file.parent().unwrap_or(Path::new(".")).to_path_buf(),
        }
    }

    /// Run the workflow for one input file
    ///
    /// Returns the written subtitle path, or `None` when an existing output was kept.
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<Option<PathBuf>> {
        let start_time = Instant::now();

        FileManager::validate_input_file(&input_file)?;

        let output_path = FileManager::generate_output_path(&input_file, &output_dir, "srt");
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, subtitles already exist (use -f to force overwrite)", output_path);
            return Ok(None);
        }

        let transcript = self.load_transcript(&input_file).await?;
        self.check_language(&transcript);

        let document = self.build_document(&transcript)?;
        if document.is_empty() {
            warn!("No cues produced for {:?}, writing an empty subtitle file", input_file);
        }

        FileManager::ensure_dir(&output_dir)?;
        document.write_to_srt(&output_path)?;

        info!(
            "Subtitles generated: {:?} ({} cues, {})",
            output_path,
            document.len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(output_path))
    }

    /// Run the workflow for every transcript and media file below a directory
    ///
    /// A failure on one file is logged and counted; the remaining files are still processed.
    pub async fn run_folder(&self, input_dir: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let inputs = FileManager::find_inputs(&input_dir)?;
        if inputs.is_empty() {
            return Err(anyhow!("No transcript or media files found in directory: {:?}", input_dir));
        }

        let has_media = inputs
            .iter()
            .any(|input| matches!(FileManager::detect_file_type(input), Ok(FileType::Media)));
        if has_media {
            self.recognizer
                .check_available()
                .await
                .with_context(|| format!("Recognizer '{}' cannot run", self.recognizer.name()))?;
        }

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(inputs.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();
        let mut claimed_outputs = HashSet::new();

        for input in &inputs {
            let file_name = input
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let target_dir = Self::folder_target_dir(&input_dir, output_dir.as_deref(), input);

            // Inputs sharing a stem (talk.json next to talk.mp4) map to the same file
            let output_path = FileManager::generate_output_path(input, &target_dir, "srt");
            if !claimed_outputs.insert(output_path.clone()) {
                error!(
                    "Error processing file {}: output {:?} is already produced by another input",
                    file_name, output_path
                );
                summary.failed += 1;
                folder_pb.inc(1);
                continue;
            }

            match self.run(input.clone(), target_dir, force_overwrite).await {
                Ok(Some(_)) => summary.succeeded += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        info!(
            "Processed {} files in {}: {} generated, {} skipped, {} failed",
            inputs.len(),
            Self::format_duration(start_time.elapsed()),
            summary.succeeded,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    /// Output directory for one input of a folder run
    ///
    /// With an explicit output directory the input's location relative to
    /// `input_dir` is kept below it; otherwise subtitles go next to the input.
    fn folder_target_dir(input_dir: &Path, output_dir: Option<&Path>, input: &Path) -> PathBuf {
        let parent = input.parent().unwrap_or(input_dir);
        match output_dir {
            Some(out) => match parent.strip_prefix(input_dir) {
                Ok(relative) if relative.as_os_str().is_empty() => out.to_path_buf(),
                Ok(relative) => out.join(relative),
                Err(_) => out.to_path_buf(),
            },
            None => parent.to_path_buf(),
        }
    }

    /// Build the subtitle document for a transcript with the configured settings
    pub fn build_document(&self, transcript: &Transcript) -> Result<SubtitleDocument> {
        let document = segmenter::build_document(transcript, self.config.segmentation.granularity, &self.options)
            .context("Failed to segment transcript")?;

        debug!(
            "Segmented {} words from {} segments into {} cues ({} granularity)",
            transcript.word_count(),
            transcript.segments.len(),
            document.len(),
            self.config.segmentation.granularity
        );

        Ok(document)
    }

    /// Load a transcript file or run the recognizer on a media file
    async fn load_transcript(&self, input_file: &Path) -> Result<Transcript> {
        match FileManager::detect_file_type(input_file)? {
            FileType::Transcript => {
                debug!("Reading transcript {:?}", input_file);
                Transcript::from_file(input_file)
                    .with_context(|| format!("Failed to load transcript: {:?}", input_file))
            }
            FileType::Media => self.recognize_with_progress(input_file).await,
            FileType::Unknown => Err(anyhow!("Unsupported input file type: {:?}", input_file)),
        }
    }

    async fn recognize_with_progress(&self, media_file: &Path) -> Result<Transcript> {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(format!("Transcribing with {} (model {})", self.recognizer.name(), self.config.recognizer.model));
        spinner.enable_steady_tick(Duration::from_millis(120));

        let result = self.recognizer.transcribe(media_file).await;
        spinner.finish_and_clear();

        result.with_context(|| format!("Failed to transcribe {:?}", media_file))
    }

    /// Warn when the recognized language differs from the requested one
    fn check_language(&self, transcript: &Transcript) {
        let (Some(requested), Some(detected)) = (&self.config.recognizer.language, &transcript.language) else {
            return;
        };

        if !language_utils::language_codes_match(requested, detected) {
            warn!(
                "Transcript language '{}' does not match configured language '{}'",
                detected, requested
            );
        }
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
