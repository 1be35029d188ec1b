// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, FileEncoding};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod file_utils;
mod line_processor;
mod providers;
mod errors;

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

/// CLI Wrapper for FileEncoding to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliEncoding {
    Utf8,
    Utf16le,
}

impl From<CliEncoding> for FileEncoding {
    fn from(cli_encoding: CliEncoding) -> Self {
        match cli_encoding {
            CliEncoding::Utf8 => FileEncoding::Utf8,
            CliEncoding::Utf16le => FileEncoding::Utf16Le,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate dialogue files (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Generate shell completions for dialoc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input dialogue file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file or directory for translated files
    #[arg(value_name = "OUTPUT_PATH")]
    output_path: PathBuf,

    /// DeepL API key
    #[arg(short = 'k', long, env = "DEEPL_API_KEY")]
    api_key: Option<String>,

    /// Source language code (e.g., 'de'); omit for auto-detection
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Number of lines per translation batch
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Text encoding of input and output files
    #[arg(short, long, value_enum)]
    encoding: Option<CliEncoding>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// dialoc - Dialogue Localization Translator
///
/// Translates line-oriented `key|text` dialogue files through the DeepL API
/// while preserving blank lines, section markers and line order.
#[derive(Parser, Debug)]
#[command(name = "dialoc")]
#[command(version = "1.0.0")]
#[command(about = "DeepL-powered dialogue file translation tool")]
#[command(long_about = "dialoc translates line-oriented key|text dialogue files through DeepL.

EXAMPLES:
    dialoc dialogues/ out/                      # Translate every .txt file in a folder
    dialoc -t fr dialogues/ out/                # Translate to French
    dialoc -s de -t en OU.txt out/OU.txt        # Translate a single file
    dialoc -e utf8 dialogues/ out/              # Process UTF-8 files
    dialoc --log-level debug dialogues/ out/    # Verbose chunk progress
    dialoc completions bash > dialoc.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The API key can also be supplied via the
    DEEPL_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input dialogue file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file or directory for translated files
    #[arg(value_name = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    /// DeepL API key
    #[arg(short = 'k', long, env = "DEEPL_API_KEY")]
    api_key: Option<String>,

    /// Source language code (e.g., 'de'); omit for auto-detection
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Number of lines per translation batch
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Text encoding of input and output files
    #[arg(short, long, value_enum)]
    encoding: Option<CliEncoding>,

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

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
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

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "dialoc", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;
            let output_path = cli.output_path.ok_or_else(|| {
                anyhow!("OUTPUT_PATH is required when no subcommand is specified")
            })?;

            let translate_args = TranslateArgs {
                input_path,
                output_path,
                api_key: cli.api_key,
                source_language: cli.source_language,
                target_language: cli.target_language,
                chunk_size: cli.chunk_size,
                encoding: cli.encoding,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(to_level_filter(&cmd_log_level.clone().into()));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)
            .context(format!("Failed to load config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Override config with CLI options if provided
    if let Some(api_key) = &options.api_key {
        config.translation.api_key = api_key.clone();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = Some(source_lang.clone());
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(chunk_size) = options.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(encoding) = &options.encoding {
        config.encoding = encoding.clone().into();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    info!(
        "Translating {:?} -> {:?} ({} -> {})",
        options.input_path,
        options.output_path,
        config.source_language.as_deref().unwrap_or("auto"),
        config.target_language
    );

    let controller = Controller::with_config(config)?;
    controller.run(options.input_path, options.output_path).await?;

    info!("Translation completed");
    Ok(())
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
