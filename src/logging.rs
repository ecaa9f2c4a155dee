//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so while it runs logs go to the configured
//! file or nowhere. The headless subcommands log to stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file '{}': {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Where log lines should end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error
    Stderr,
    /// The log file if one is configured, otherwise discard
    FileOnly,
}

/// Build the filter: `RUST_LOG` wins, then the configured level.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns `false` when logging is disabled.
pub fn init(config: &LoggingConfig, target: LogTarget) -> Result<bool, LoggingError> {
    let filter = env_filter(config);

    if let Some(path) = &config.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggingError::OpenFile {
                path: path.clone(),
                source,
            })?;
        install(filter, config.format, Mutex::new(file), false)?;
        return Ok(true);
    }

    match target {
        LogTarget::Stderr => {
            install(filter, config.format, std::io::stderr, true)?;
            Ok(true)
        }
        LogTarget::FileOnly => Ok(false),
    }
}

fn install<W>(filter: EnvFilter, format: LogFormat, writer: W, ansi: bool) -> Result<(), LoggingError>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    result.map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_without_file_disables_logging() {
        let config = LoggingConfig::default();
        assert!(!init(&config, LogTarget::FileOnly).unwrap());
    }

    #[test]
    fn test_unopenable_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file: Some(dir.path().join("missing").join("remote.log")),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            init(&config, LogTarget::FileOnly),
            Err(LoggingError::OpenFile { .. })
        ));
    }

    #[test]
    fn test_bad_level_falls_back() {
        let config = LoggingConfig {
            level: "not a [valid filter".to_string(),
            ..LoggingConfig::default()
        };
        // Must not panic.
        let _ = env_filter(&config);
    }
}
