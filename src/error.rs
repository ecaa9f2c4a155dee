//! Unified application error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::port::PortError;
use crate::remote::TableError;
use crate::sound::SoundError;

/// Anything that stops the remote.
///
/// Every variant is fatal: the event loop returns it, the terminal is
/// restored and the binary exits with the message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Serial port '{port}': {source}")]
    Port {
        port: String,
        #[source]
        source: PortError,
    },

    #[error(transparent)]
    Sound(#[from] SoundError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl AppError {
    /// Attach the port name to a port error.
    pub fn port(port: impl Into<String>, source: PortError) -> Self {
        Self::Port {
            port: port.into(),
            source,
        }
    }
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
