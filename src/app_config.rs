use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::segmenter::{SegmenterOptions, DEFAULT_MAX_TEXT_LENGTH, DEFAULT_PAUSE_THRESHOLD_SECS};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// How words are grouped into cues
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// External speech recognizer settings
    #[serde(default)]
    pub recognizer: RecognizerConfig,

    /// Where subtitle files are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Source of cue boundaries
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CueGranularity {
    // @granularity: Split word timings on pauses and length
    #[default]
    Words,
    // @granularity: One cue per recognizer segment
    Segments,
}

impl std::fmt::Display for CueGranularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Words => write!(f, "words"),
            Self::Segments => write!(f, "segments"),
        }
    }
}

/// Segmentation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Silence in seconds between two words that starts a new cue
    #[serde(default = "default_pause_threshold_secs")]
    pub pause_threshold_secs: f64,

    /// Caption length in characters after which the next word starts a new cue
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Build cues from words or from whole recognizer segments
    #[serde(default)]
    pub granularity: CueGranularity,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            pause_threshold_secs: default_pause_threshold_secs(),
            max_text_length: default_max_text_length(),
            granularity: CueGranularity::default(),
        }
    }
}

impl SegmentationConfig {
    /// Validated segmenter parameters
    pub fn segmenter_options(&self) -> Result<SegmenterOptions> {
        SegmenterOptions::new(self.pause_threshold_secs, self.max_text_length)
            .context("Invalid segmentation settings")
    }
}

/// External recognizer settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecognizerConfig {
    // @field: Executable to run
    #[serde(default = "default_recognizer_command")]
    pub command: String,

    // @field: Model name passed to --model
    #[serde(default = "default_recognizer_model")]
    pub model: String,

    // @field: Spoken language (ISO 639-1/639-2), auto-detected when unset
    #[serde(default)]
    pub language: Option<String>,

    // @field: Timeout seconds
    #[serde(default = "default_recognizer_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            command: default_recognizer_command(),
            model: default_recognizer_model(),
            language: None,
            timeout_secs: default_recognizer_timeout_secs(),
        }
    }
}

/// Output settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Output directory; subtitles go next to their input when unset
    #[serde(default = "default_output_directory")]
    pub directory: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_pause_threshold_secs() -> f64 {
    DEFAULT_PAUSE_THRESHOLD_SECS
}

fn default_max_text_length() -> usize {
    DEFAULT_MAX_TEXT_LENGTH
}

fn default_recognizer_command() -> String {
    "whisper".to_string()
}

fn default_recognizer_model() -> String {
    "medium".to_string()
}

fn default_recognizer_timeout_secs() -> u64 {
    3600 // long recordings on CPU take a while
}

fn default_output_directory() -> Option<String> {
    Some("output".to_string())
}

impl Config {
    /// Load a configuration file, or create one with defaults when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok((config, false));
        }

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok((config, true))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.segmentation.segmenter_options()?;

        if self.recognizer.command.trim().is_empty() {
            return Err(anyhow!("Recognizer command must not be empty"));
        }
        if self.recognizer.model.trim().is_empty() {
            return Err(anyhow!("Recognizer model must not be empty"));
        }
        if self.recognizer.timeout_secs == 0 {
            return Err(anyhow!("Recognizer timeout must be greater than zero"));
        }

        if let Some(language) = &self.recognizer.language {
            crate::language_utils::validate_language_code(language)?;
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            segmentation: SegmentationConfig::default(),
            recognizer: RecognizerConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
