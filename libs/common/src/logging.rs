//! Logging setup for hexpad
//!
//! Console output goes to stderr so stdout stays clean for conversion
//! results. The full-screen UI logs to a daily rolling file instead, since
//! anything written to the terminal would draw over the screen.

use std::path::PathBuf;

use errors::{HexpadError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Custom format for log level with brackets: `[INFO]`, `[WARN]`, etc.
fn format_level(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[TRACE]",
        Level::DEBUG => "[DEBUG]",
        Level::INFO => "[INFO]",
        Level::WARN => "[WARN]",
        Level::ERROR => "[ERROR]",
    }
}

/// Custom event formatter that outputs: `timestamp [LEVEL] message`
///
/// Example output: `2026-10-18T09:12:44.809113Z [INFO] hexpad started`
struct BracketedLevelFormat;

impl<S, N> FormatEvent<S, N> for BracketedLevelFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let now = chrono::Utc::now();
        write!(writer, "{} ", now.format("%Y-%m-%dT%H:%M:%S%.6fZ"))?;

        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            let color = match level {
                Level::TRACE => "\x1b[35m", // magenta
                Level::DEBUG => "\x1b[34m", // blue
                Level::INFO => "\x1b[32m",  // green
                Level::WARN => "\x1b[33m",  // yellow
                Level::ERROR => "\x1b[31m", // red
            };
            write!(writer, "{}{}\x1b[0m ", color, format_level(&level))?;
        } else {
            write!(writer, "{} ", format_level(&level))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Where log events end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// stderr
    Console,
    /// `{dir}/{file_prefix}.YYYY-MM-DD`, rotated daily
    File { dir: PathBuf, file_prefix: String },
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive (e.g. "info" or "info,hexpad=debug")
    pub level: String,
    pub target: LogTarget,
    /// Colored level tags (console only)
    pub ansi: bool,
}

/// Keeps the non-blocking file writer alive; drop it to flush
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Pick the effective filter directive
///
/// Priority: RUST_LOG > configured level
pub fn filter_directive(level: &str, rust_log: Option<&str>) -> String {
    match rust_log {
        Some(env) if !env.trim().is_empty() => env.to_string(),
        _ => level.to_string(),
    }
}

/// Build the EnvFilter for a directive, rejecting malformed ones
pub fn build_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| HexpadError::Logging(format!("Invalid log level '{}': {}", directive, e)))
}

/// Initialize the global subscriber
///
/// Returns a guard that must be held for as long as file logging is needed.
pub fn init_with_config(config: &LogConfig) -> Result<LogGuard> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(&config.level, rust_log.as_deref());
    let filter = build_filter(&directive)?;

    let (layer, guard) = match &config.target {
        LogTarget::Console => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .event_format(BracketedLevelFormat)
                .boxed();
            (layer, None)
        },
        LogTarget::File { dir, file_prefix } => {
            std::fs::create_dir_all(dir).map_err(|e| {
                HexpadError::Logging(format!("Cannot create log dir {:?}: {}", dir, e))
            })?;
            let appender = tracing_appender::rolling::daily(dir, file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .event_format(BracketedLevelFormat)
                .boxed();
            (layer, Some(guard))
        },
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| HexpadError::Logging(e.to_string()))?;

    tracing::debug!("Logging: {} -> {:?}", directive, config.target);

    Ok(LogGuard { _guard: guard })
}
