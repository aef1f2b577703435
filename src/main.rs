// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use autosrt::app_config::{self, Config, CueGranularity};
use autosrt::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for CueGranularity to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliGranularity {
    Words,
    Segments,
}

impl From<CliGranularity> for CueGranularity {
    fn from(cli_granularity: CliGranularity) -> Self {
        match cli_granularity {
            CliGranularity::Words => CueGranularity::Words,
            CliGranularity::Segments => CueGranularity::Segments,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate SRT subtitles from a transcript or media file (default command)
    Generate(GenerateArgs),

    /// Generate shell completions for autosrt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct GenerateArgs {
    /// Transcript (.json), media file, or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Directory for generated subtitles
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Silence in seconds that starts a new cue
    #[arg(short, long)]
    pause_threshold: Option<f64>,

    /// Caption length in characters after which a new cue starts
    #[arg(short = 'x', long)]
    max_chars: Option<usize>,

    /// Build cues from words or from whole recognizer segments
    #[arg(short, long, value_enum)]
    granularity: Option<CliGranularity>,

    /// Recognizer model name (e.g., 'tiny', 'medium', 'large-v3')
    #[arg(short, long)]
    model: Option<String>,

    /// Spoken language code (e.g., 'en', 'pl'); auto-detected when omitted
    #[arg(short, long)]
    language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// autosrt - subtitles from speech recognition
///
/// Groups recognized words into readable cues and writes them as SubRip (SRT).
#[derive(Parser, Debug)]
#[command(name = "autosrt")]
#[command(version)]
#[command(about = "Generate SRT subtitles from speech recognition output")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "autosrt turns word-level speech recognition into SubRip subtitles.

EXAMPLES:
    autosrt talk.json                      # Segment an existing whisper JSON transcript
    autosrt input/video.MOV -l pl          # Transcribe with whisper, then segment
    autosrt -p 0.6 -x 32 talk.json         # Longer pauses, shorter captions
    autosrt -g segments talk.json          # One cue per recognizer segment
    autosrt -o subs/ --log-level debug recordings/
    autosrt completions bash > autosrt.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and prefix for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", ""),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, prefix) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, prefix, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "autosrt", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        None => run_generate(cli.generate).await,
    }
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let input_path = options
        .input_path
        .clone()
        .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

    let (mut config, created) = Config::load_or_create(&options.config_path)?;
    if created {
        warn!("Config file not found at '{}', created default config.", options.config_path);
    }
    apply_overrides(&mut config, &options);

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;

    if input_path.is_file() {
        let output_dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| controller.output_dir_for(&input_path));
        if controller.run(input_path, output_dir, options.force_overwrite).await?.is_none() {
            info!("Nothing to do");
        }
    } else if input_path.is_dir() {
        let output_dir = options.output_dir.clone().or_else(|| {
            controller.config().output.directory.as_ref().map(PathBuf::from)
        });
        let summary = controller.run_folder(input_path, output_dir, options.force_overwrite).await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed", summary.failed));
        }
    } else {
        return Err(anyhow!(
            "Input file not found: {:?}. Make sure the file exists",
            input_path
        ));
    }

    Ok(())
}

/// Override config values with CLI options when provided
fn apply_overrides(config: &mut Config, options: &GenerateArgs) {
    if let Some(pause) = options.pause_threshold {
        config.segmentation.pause_threshold_secs = pause;
    }
    if let Some(max_chars) = options.max_chars {
        config.segmentation.max_text_length = max_chars;
    }
    if let Some(granularity) = &options.granularity {
        config.segmentation.granularity = granularity.clone().into();
    }
    if let Some(model) = &options.model {
        config.recognizer.model = model.clone();
    }
    if let Some(language) = &options.language {
        config.recognizer.language = Some(language.clone());
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}
