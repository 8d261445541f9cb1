// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::compose::CropRect;
use crate::episode::EpisodeRef;

mod app_config;
mod app_controller;
mod artwork;
mod chapters;
mod compose;
mod episode;
mod episode_data;
mod errors;
mod file_handlers;
mod html;
mod library;
mod links;
mod markers;
mod post;
mod providers;
mod search;
mod topics;
mod transcribe;

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

impl From<&app_config::LogLevel> for LevelFilter {
    fn from(level: &app_config::LogLevel) -> Self {
        match level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Embed chapter tags into the episode audio from its marker table
    Tag {
        /// Episode token, e.g. `15`, `15-1` or `football-16-1`
        episode: String,
    },

    /// Summarize the marker memo into topics in the episode record
    Topics {
        /// Episode token
        episode: String,
    },

    /// Build the web fragment and SNS post for the episode
    Post {
        /// Episode token
        episode: String,
    },

    /// Print the related-episodes HTML list
    Related {
        /// Episode token
        episode: String,
    },

    /// Generate episode artwork from the record's topics
    Artwork {
        /// Episode token
        episode: String,
    },

    /// Compose the promo icon from the eyecatch photo and cast icons
    Compose {
        /// Episode token
        episode: String,

        /// Crop square as `x,y,size`; defaults to the centered square
        #[arg(long, value_parser = parse_crop)]
        crop: Option<CropRect>,
    },

    /// Transcribe the episode audio into the segment table
    Transcribe {
        /// Episode token
        episode: String,
    },

    /// Capture the title of the URL on the clipboard as a reference line
    Link,

    /// Run the full pipeline: tag, topics, post, promo icon
    Run {
        /// Episode token
        episode: String,

        /// Crop square as `x,y,size`; defaults to the centered square
        #[arg(long, value_parser = parse_crop)]
        crop: Option<CropRect>,
    },

    /// Generate shell completions for podpost
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// podpost - podcast post-production pipeline
///
/// Takes episode audio, editor marker exports and episode metadata and
/// produces chapter-tagged audio, SNS post text, episode web-page HTML
/// fragments and promotional images.
#[derive(Parser, Debug)]
#[command(name = "podpost")]
#[command(version = "1.0.0")]
#[command(about = "Podcast post-production pipeline")]
#[command(long_about = "podpost embeds ID3 chapters from editor markers, summarizes them into \
topics, and assembles the per-episode publishing artifacts.

EXAMPLES:
    podpost run 15                  # Full pipeline for flagship episode 15
    podpost tag 15-1                # Chapter-tag the after-talk of episode 15
    podpost topics football-16-1    # Generate topics for a franchise episode
    podpost compose 15 --crop 120,40,960
    podpost completions bash > podpost.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically. The API key can also come from the
    OPENAI_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

fn parse_crop(raw: &str) -> Result<CropRect, String> {
    let parts: Vec<&str> = raw.split(',').collect();
    let &[x, y, size] = parts.as_slice() else {
        return Err("expected x,y,size".to_string());
    };
    let parse = |s: &str| s.trim().parse::<u32>().map_err(|e| e.to_string());
    Ok(CropRect {
        x: parse(x)?,
        y: parse(y)?,
        size: parse(size)?,
    })
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

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.args()
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

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "podpost", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level((&config_log_level).into());
    }

    let config = load_config(&cli.config_path, cli.log_level.as_ref())?;
    config.validate().context("Configuration validation failed")?;
    if cli.log_level.is_none() {
        log::set_max_level((&config.log_level).into());
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Tag { episode } => {
            let episode = EpisodeRef::normalize(&episode)?;
            controller.tag_episode(&episode)?;
        }
        Commands::Topics { episode } => {
            let episode = EpisodeRef::normalize(&episode)?;
            controller.generate_topics(&episode).await?;
        }
        Commands::Post { episode } => {
            let episode = EpisodeRef::normalize(&episode)?;
            controller.build_post(&episode)?;
        }
        Commands::Related { episode } => {
            let episode = EpisodeRef::normalize(&episode)?;
            println!("{}", controller.related_episodes(&episode)?);
        }
        Commands::Artwork { episode } => {
            let episode = EpisodeRef::normalize(&episode)?;
            controller.generate_artwork(&episode).await?;
        }
        Commands::Compose { episode, crop } => {
            let episode = EpisodeRef::normalize(&episode)?;
            controller.compose_promo(&episode, crop)?;
        }
        Commands::Transcribe { episode } => {
            let episode = EpisodeRef::normalize(&episode)?;
            controller.transcribe_episode(&episode).await?;
        }
        Commands::Link => {
            links::capture_reference().await?;
        }
        Commands::Run { episode, crop } => {
            let episode = EpisodeRef::normalize(&episode)?;
            controller.run_pipeline(&episode, crop).await?;
        }
        Commands::Completions { .. } => unreachable!("handled before config load"),
    }

    Ok(())
}

/// Load the configuration, creating a default file when none exists.
fn load_config(config_path: &str, log_level: Option<&CliLogLevel>) -> Result<Config> {
    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        if let Some(log_level) = log_level {
            config.log_level = log_level.clone().into();
        }
        config
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let mut config = Config::default();
        if let Some(log_level) = log_level {
            config.log_level = log_level.clone().into();
        }

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };
    Ok(config)
}
