// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, bail, Context};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::alignment::AlignmentStrategy;
use crate::app_config::Config;
use app_controller::Controller;

mod alignment;
mod app_config;
mod app_controller;
mod diff_view;
mod errors;
mod file_utils;
mod subtitle_processor;
mod text_utils;
mod video_encoder;

/// CLI Wrapper for AlignmentStrategy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliAlignmentStrategy {
    Proportional,
    BestMatch,
}

impl From<CliAlignmentStrategy> for AlignmentStrategy {
    fn from(cli_strategy: CliAlignmentStrategy) -> Self {
        match cli_strategy {
            CliAlignmentStrategy::Proportional => AlignmentStrategy::Proportional,
            CliAlignmentStrategy::BestMatch => AlignmentStrategy::BestMatch,
        }
    }
}

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align subtitle timing with a corrected transcript (default command)
    #[command(alias = "align")]
    Align(AlignArgs),

    /// Align every .srt under a directory with its sibling .txt transcript
    Batch {
        /// Directory to scan for subtitle/transcript pairs
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,

        /// Set logging level
        #[arg(short, long, value_enum)]
        log_level: Option<CliLogLevel>,
    },

    /// Strip numbering and timestamps from a subtitle file
    Strip {
        /// Subtitle file to strip
        #[arg(value_name = "SUBTITLE_FILE")]
        subtitle_file: PathBuf,

        /// Output text file (default: <input>.txt)
        #[arg(value_name = "OUTPUT_FILE")]
        output_file: Option<PathBuf>,
    },

    /// Collapse a paragraph-structured text file into one flat line
    Flatten {
        /// Text file to flatten
        #[arg(value_name = "TEXT_FILE")]
        text_file: PathBuf,

        /// Output text file (default: <input>.flat.txt)
        #[arg(value_name = "OUTPUT_FILE")]
        output_file: Option<PathBuf>,
    },

    /// Show a unified diff between two text files
    Diff {
        /// First file
        #[arg(value_name = "FILE_A")]
        file_a: PathBuf,

        /// Second file
        #[arg(value_name = "FILE_B")]
        file_b: PathBuf,
    },

    /// Transfer the line structure of one text onto an unbroken text
    Linebreaks {
        /// Text whose line structure should be reused
        #[arg(value_name = "BROKEN_FILE")]
        broken_file: PathBuf,

        /// Unbroken text to restructure
        #[arg(value_name = "FLAT_FILE")]
        flat_file: PathBuf,

        /// Output text file (default: <flat>.restructured.txt)
        #[arg(value_name = "OUTPUT_FILE")]
        output_file: Option<PathBuf>,
    },

    /// Create a subtitled video over a black background from an audio file
    Video {
        /// Audio file (mp3 or similar)
        #[arg(value_name = "AUDIO_FILE")]
        audio_file: PathBuf,

        /// Subtitle file to burn in
        #[arg(value_name = "SUBTITLE_FILE")]
        subtitle_file: PathBuf,

        /// Output video file
        #[arg(short, long, default_value = "output.mp4")]
        output: PathBuf,

        /// Video duration in seconds (default: audio length)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Generate shell completions for subalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AlignArgs {
    /// Machine-generated subtitle file with correct timing
    #[arg(value_name = "SUBTITLE_FILE")]
    subtitle_file: PathBuf,

    /// Corrected transcript with the right words but no timing
    #[arg(value_name = "REFERENCE_FILE")]
    reference_file: PathBuf,

    /// Output subtitle file
    #[arg(value_name = "OUTPUT_FILE", default_value = "corrected.srt")]
    output_file: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Alignment strategy to use
    #[arg(short, long, value_enum)]
    strategy: Option<CliAlignmentStrategy>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subalign - retime corrected transcripts onto generated subtitles
///
/// Matches a trusted reference transcript against machine-generated subtitle
/// cues and redistributes the corrected text across the original timestamps.
#[derive(Parser, Debug)]
#[command(name = "subalign")]
#[command(version = "1.0.0")]
#[command(about = "Subtitle text realignment tool")]
#[command(long_about = "subalign redistributes a corrected transcript across the timing of
machine-generated subtitles, keeping the original timestamps while replacing
the error-prone recognized text.

EXAMPLES:
    subalign generated.srt corrected.txt            # Align into corrected.srt
    subalign generated.srt corrected.txt out.srt    # Explicit output file
    subalign -s proportional gen.srt text.txt       # Character-share strategy
    subalign batch ./episodes/                      # Align every srt/txt pair
    subalign strip generated.srt                    # Drop numbering/timestamps
    subalign diff gen.txt ref.txt                   # Show text differences
    subalign video audio.mp3 corrected.srt -o v.mp4 # Burn subtitles on video
    subalign completions bash > subalign.bash       # Generate completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically.

STRATEGIES:
    bestmatch    - match original cue text against the reference and map
                   cue boundaries through the matched blocks (default)
    proportional - split the reference by character share, snapping cuts
                   to sentence and word boundaries")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Machine-generated subtitle file with correct timing
    #[arg(value_name = "SUBTITLE_FILE")]
    subtitle_file: Option<PathBuf>,

    /// Corrected transcript with the right words but no timing
    #[arg(value_name = "REFERENCE_FILE")]
    reference_file: Option<PathBuf>,

    /// Output subtitle file
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Alignment strategy to use
    #[arg(short, long, value_enum)]
    strategy: Option<CliAlignmentStrategy>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Symbol for log level
    fn get_symbol_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "✖ ",
            Level::Warn => "▲ ",
            Level::Info => " ",
            Level::Debug => "● ",
            Level::Trace => "· ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let symbol = Self::get_symbol_for_level(record.level());

            let color = match record.level() {
                Level::Error => "\x1B[1;31m",
                Level::Warn => "\x1B[1;33m",
                Level::Info => "\x1B[1;32m",
                Level::Debug => "\x1B[1;36m",
                Level::Trace => "\x1B[1;35m",
            };

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, symbol, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subalign", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Align(args)) => run_align(args),
        Some(Commands::Batch { input_dir, force_overwrite, config_path, log_level }) => {
            let config = load_config(&config_path, log_level.as_ref(), None)?;
            log::set_max_level(to_level_filter(&config.log_level));
            let controller = Controller::with_config(config)?;
            controller.align_folder(&input_dir, force_overwrite)
        }
        Some(Commands::Strip { subtitle_file, output_file }) => {
            let output_file = output_file.unwrap_or_else(|| subtitle_file.with_extension("txt"));
            let controller = Controller::with_config(Config::default())?;
            controller.strip_file(&subtitle_file, &output_file)
        }
        Some(Commands::Flatten { text_file, output_file }) => {
            let output_file = output_file
                .unwrap_or_else(|| text_file.with_extension("flat.txt"));
            let controller = Controller::with_config(Config::default())?;
            controller.flatten_file(&text_file, &output_file)
        }
        Some(Commands::Diff { file_a, file_b }) => {
            let controller = Controller::with_config(Config::default())?;
            let diff = controller.diff_files(&file_a, &file_b)?;
            if diff.is_empty() {
                info!("Files are identical");
            } else {
                print!("{}", diff);
            }
            Ok(())
        }
        Some(Commands::Linebreaks { broken_file, flat_file, output_file }) => {
            let output_file = output_file
                .unwrap_or_else(|| flat_file.with_extension("restructured.txt"));
            let controller = Controller::with_config(Config::default())?;
            controller.transfer_linebreaks_file(&broken_file, &flat_file, &output_file)
        }
        Some(Commands::Video { audio_file, subtitle_file, output, duration, config_path }) => {
            let config = load_config(&config_path, None, None)?;
            let controller = Controller::with_config(config)?;
            controller.create_video(&audio_file, &subtitle_file, &output, duration).await
        }
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let (Some(subtitle_file), Some(reference_file)) = (cli.subtitle_file, cli.reference_file) else {
                let mut cmd = CommandLineOptions::command();
                let usage = cmd.render_usage();
                eprintln!("{}", usage);
                bail!("SUBTITLE_FILE and REFERENCE_FILE are required when no subcommand is specified");
            };

            let align_args = AlignArgs {
                subtitle_file,
                reference_file,
                output_file: cli.output_file.unwrap_or_else(|| PathBuf::from("corrected.srt")),
                force_overwrite: cli.force_overwrite,
                strategy: cli.strategy,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_align(align_args)
        }
    }
}

fn run_align(options: AlignArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    let config = load_config(
        &options.config_path,
        options.log_level.as_ref(),
        options.strategy.as_ref(),
    )?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    let report = controller.align_file(
        &options.subtitle_file,
        &options.reference_file,
        &options.output_file,
        options.force_overwrite,
    )?;

    info!(
        "Alignment complete: {}/{} cues usable",
        report.usable, report.cue_count
    );

    Ok(())
}

/// Load the configuration file, creating a default one when missing, and
/// apply CLI overrides on top.
fn load_config(
    config_path: &str,
    log_level: Option<&CliLogLevel>,
    strategy: Option<&CliAlignmentStrategy>,
) -> Result<Config> {
    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        if let Some(strategy) = strategy {
            config.alignment.strategy = strategy.clone().into();
        }

        if let Some(log_level) = log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        log::warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(strategy) = strategy {
            config.alignment.strategy = strategy.clone().into();
        }

        if let Some(log_level) = log_level {
            config.log_level = log_level.clone().into();
        }

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
