//! Errors from the serial link to the transmitter.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while opening or writing to the transmitter's port.
///
/// The remote never reads back, so every write-side failure ends the
/// session; the variants only decide what the user is told.
#[derive(Debug, Error)]
pub enum PortError {
    /// No device with this name.
    #[error("Serial port not found: {0}")]
    NotFound(String),

    /// The line settings were refused when opening.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The transmitter went away mid-session (cable pulled, board reset).
    #[error("Transmitter disconnected: {0}")]
    Disconnected(io::Error),

    /// A command did not leave the output buffer in time.
    #[error("Write timed out after {0:?}")]
    Timeout(Duration),

    /// Any other I/O failure on the port.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reported by the serialport backend.
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl PortError {
    pub fn not_found(port_name: impl Into<String>) -> Self {
        Self::NotFound(port_name.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout(duration)
    }

    /// Classify a failed command write. `timeout` is the port's write timeout.
    pub fn from_write(err: io::Error, timeout: Duration) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Self::Timeout(timeout),
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::UnexpectedEof => Self::Disconnected(err),
            _ => Self::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortError::not_found("COM4");
        assert_eq!(err.to_string(), "Serial port not found: COM4");

        let err = PortError::config("Invalid baud rate");
        assert_eq!(err.to_string(), "Configuration error: Invalid baud rate");
    }

    #[test]
    fn test_write_failures_classified() {
        let timeout = Duration::from_millis(500);

        let err = PortError::from_write(io::Error::from(io::ErrorKind::TimedOut), timeout);
        assert!(matches!(err, PortError::Timeout(d) if d == timeout));
        assert!(err.to_string().contains("500ms"));

        let err = PortError::from_write(io::Error::from(io::ErrorKind::BrokenPipe), timeout);
        assert!(matches!(err, PortError::Disconnected(_)));
        assert!(err.to_string().starts_with("Transmitter disconnected"));

        let err = PortError::from_write(io::Error::other("framing"), timeout);
        assert!(matches!(err, PortError::Io(_)));
    }
}
