//! Structured Logger
//!
//! Wraps `tracing` with environment-based level control, a console layer and
//! an optional daily-rolling NDJSON file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix inside the log directory; the appender adds `.YYYY-MM-DD`.
pub const LOG_FILE_PREFIX: &str = "univaegis.log";

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Rolling file output directory. Console only when `None`.
    pub dir: Option<PathBuf>,
    /// JSON lines on the console instead of the human-readable format.
    pub json: bool,
    /// Console output goes to stderr, keeping stdout for command results.
    pub stderr: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            json: false,
            stderr: false,
        }
    }
}

/// Build the filter: `RUST_LOG` wins, then the configured level, then "info".
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global structured logger.
///
/// Installing twice is harmless; the second call leaves the first subscriber
/// in place.
pub fn init_logger(options: &LogOptions) -> Result<()> {
    let env_filter = build_filter(&options.level);

    let file_layer = match &options.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file_appender)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    let console_writer = || {
        if options.stderr {
            BoxMakeWriter::new(std::io::stderr)
        } else {
            BoxMakeWriter::new(std::io::stdout)
        }
    };
    let json_console = options.json.then(|| {
        fmt::layer()
            .json()
            .with_writer(console_writer())
            .with_ansi(false)
    });
    let text_console = (!options.json).then(|| {
        fmt::layer()
            .with_writer(console_writer())
            .with_target(false)
            .with_ansi(true)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_console)
        .with(text_console)
        .with(file_layer)
        .try_init();
    Ok(())
}
