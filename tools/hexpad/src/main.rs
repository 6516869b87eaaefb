//! hexpad - text <-> hex code converter
//!
//! Encodes text into per-character hex codes and decodes hex codes back to
//! text, as one-shot commands, an interactive REPL, or a live two-way page
//! in the terminal.

mod clipboard;
mod commands;
mod controller;
mod repl;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::logging::{self, LogConfig, LogTarget};
use common::Settings;
use hexcode::CodeRange;
use tracing::{debug, info};

use crate::controller::Converter;

#[derive(Parser)]
#[command(name = "hexpad")]
#[command(about = "Convert text to hex codes and back")]
#[command(long_about = "Convert text to hex codes and back

Commands:
  ui          Live two-way converter page (default)
  encode      Text to hex codes
  decode      Hex codes to text
  repl        Interactive prompt
  config      Show effective settings

Examples:
  hexpad encode ABC                 # 41 42 43
  hexpad decode 41 0x42 zz 43       # ABC (invalid codes are skipped)
  echo -n 'hi' | hexpad encode      # 68 69
  hexpad decode --wide D55C         # codes above 7F need --wide

Use 'hexpad <command> --help' for more information on a specific command.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Settings file (default: ./hexpad.yaml if present)
    #[arg(short = 'c', long = "config", global = true, env = "HEXPAD_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Live two-way converter page
    Ui,

    /// Encode text to space-separated hex codes
    Encode {
        /// Text to encode (joined with spaces); reads stdin when omitted
        text: Vec<String>,

        /// Print the result record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode space-separated hex codes to text
    Decode {
        /// Hex codes (e.g. 41 42 0x43); reads stdin when omitted
        #[arg(allow_hyphen_values = true)]
        codes: Vec<String>,

        /// Accept codes up to FFFF (UTF-16) instead of 7F
        #[arg(short, long)]
        wide: bool,
    },

    /// Interactive prompt
    Repl,

    /// Show effective settings as YAML
    Config,
}

fn init_logging(
    cli: &Cli,
    command: &Commands,
    settings: &Settings,
) -> Result<logging::LogGuard> {
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        settings.log.level.clone()
    };

    // The full-screen page owns the terminal, so it logs to a file
    let target = match command {
        Commands::Ui => LogTarget::File {
            dir: settings.log.dir.clone(),
            file_prefix: "hexpad.log".to_string(),
        },
        _ => LogTarget::Console,
    };

    logging::init_with_config(&LogConfig {
        level,
        target,
        ansi: !cli.no_color,
    })
    .context("Failed to initialize logging")
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let command = cli.command.take().unwrap_or(Commands::Ui);
    let _log_guard = init_logging(&cli, &command, &settings)?;
    debug!("Settings: {:?}", settings);

    match command {
        Commands::Ui => {
            info!("Starting converter page");
            let clipboard = clipboard::from_settings(settings.clipboard);
            let mut converter = Converter::new(&settings, clipboard);
            tui::run_ui(&mut converter, Duration::from_millis(settings.tick_rate_ms))?;
        },
        Commands::Encode { text, json } => {
            commands::handle_encode(&text, json)?;
        },
        Commands::Decode { codes, wide } => {
            let range = if wide {
                CodeRange::Utf16
            } else {
                settings.decode_range
            };
            commands::handle_decode(&codes, range)?;
        },
        Commands::Repl => {
            repl::run_repl(settings.decode_range)?;
        },
        Commands::Config => {
            commands::handle_config(&settings)?;
        },
    }

    Ok(())
}
