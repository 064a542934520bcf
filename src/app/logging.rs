//! Diagnostic logging through `tracing`.
//!
//! Logs go to stderr so stdout stays reserved for command output (`--json`
//! reports, archetype content). Levels:
//!
//! - `warn`: configuration warnings, skipped modules (default)
//! - `info`: pipeline stage progress and counts (`-v`)
//! - `debug`: one line per rendered or written artifact (`-vv`)
//! - `trace`: everything (`-vvv`)
//!
//! `RUST_LOG` overrides the computed filter.

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::domain::{GeneratorSettings, LogFormat};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: Level::WARN, format: LogFormat::default(), with_ansi: true }
    }
}

impl LogConfig {
    /// Base level from settings, raised by each `-v`.
    pub fn from_settings(settings: &GeneratorSettings, verbosity: u8) -> Self {
        let base = parse_level(&settings.logging.level);
        Self { level: raise(base, verbosity), format: settings.logging.format, ..Self::default() }
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

fn parse_level(level: &str) -> Level {
    level.parse().unwrap_or(Level::WARN)
}

fn raise(level: Level, steps: u8) -> Level {
    const ORDER: [Level; 5] = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE];
    let start = ORDER.iter().position(|l| *l == level).unwrap_or(1);
    ORDER[(start + usize::from(steps)).min(ORDER.len() - 1)]
}

/// Install the global subscriber. Call once, from the binary.
pub fn init_logging(config: &LogConfig) {
    init_logging_with_writer(config, io::stderr);
}

pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level);

    let _ = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(writer).with_target(false))
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(false)
                    .without_time(),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(false)
                    .without_time(),
            )
            .try_init(),
    };
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!("warn,payergen={level}"))
    })
}
