//! Mock serial port implementation for testing.
//!
//! Records every write so tests can assert exactly what the remote sent,
//! and can be told to fail the next write.

use super::error::PortError;
use super::traits::SerialPortAdapter;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Inner state of the mock port, protected by a mutex for interior mutability.
#[derive(Debug, Default)]
struct MockPortState {
    /// Log of all bytes written to the port.
    write_log: Vec<Vec<u8>>,
    /// Expected write operations (for verification).
    expected_writes: VecDeque<Vec<u8>>,
    /// Whether the next write should time out.
    should_timeout: bool,
    /// Whether the next write should fail as if the device vanished.
    should_disconnect: bool,
    /// Configured timeout duration.
    timeout: Duration,
    /// Number of flushes.
    flushes: usize,
    /// Reported line speed.
    baud_rate: u32,
}

/// Mock serial port implementation for testing.
///
/// Clones share state, so a test can keep one handle while the remote owns
/// another.
///
/// # Example
/// ```
/// use ir_serial_remote::port::{MockSerialPort, SerialPortAdapter};
///
/// let mut port = MockSerialPort::new("MOCK0");
/// port.write_bytes(b"3,180c,13").unwrap();
///
/// let writes = port.get_write_log();
/// assert_eq!(writes.len(), 1);
/// assert_eq!(writes[0], b"3,180c,13");
/// ```
#[derive(Clone)]
pub struct MockSerialPort {
    /// The port name/identifier.
    name: String,
    /// The internal state, wrapped in Arc<Mutex<>> for interior mutability.
    state: Arc<Mutex<MockPortState>>,
}

impl MockSerialPort {
    /// Create a new mock serial port with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockPortState {
                timeout: Duration::from_secs(1),
                baud_rate: 9600,
                ..Default::default()
            })),
        }
    }

    /// Expect a specific write operation.
    ///
    /// Use `verify_expectations()` to check that all expected writes occurred.
    pub fn expect_write(&mut self, data: &[u8]) {
        let mut state = self.state.lock();
        state.expected_writes.push_back(data.to_vec());
    }

    /// Verify that all expected writes have occurred in order.
    pub fn verify_expectations(&self) -> Result<(), String> {
        let state = self.state.lock();

        if !state.expected_writes.is_empty() {
            return Err(format!(
                "Expected {} more write(s), but none occurred",
                state.expected_writes.len()
            ));
        }

        Ok(())
    }

    /// Get a copy of all data written to the port.
    pub fn get_write_log(&self) -> Vec<Vec<u8>> {
        let state = self.state.lock();
        state.write_log.clone()
    }

    /// All writes decoded as UTF-8, for readable assertions.
    pub fn written_strings(&self) -> Vec<String> {
        self.get_write_log()
            .into_iter()
            .map(|w| String::from_utf8_lossy(&w).into_owned())
            .collect()
    }

    /// Clear the write log.
    pub fn clear_write_log(&mut self) {
        let mut state = self.state.lock();
        state.write_log.clear();
    }

    /// Set whether the next write should time out.
    pub fn set_should_timeout(&mut self, should_timeout: bool) {
        let mut state = self.state.lock();
        state.should_timeout = should_timeout;
    }

    /// Set whether the next write should fail with a broken pipe.
    pub fn set_should_disconnect(&mut self, should_disconnect: bool) {
        let mut state = self.state.lock();
        state.should_disconnect = should_disconnect;
    }

    /// Number of times `flush` was called.
    pub fn flush_count(&self) -> usize {
        self.state.lock().flushes
    }
}

impl SerialPortAdapter for MockSerialPort {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock();

        if state.should_timeout {
            state.should_timeout = false;
            let err = std::io::Error::from(std::io::ErrorKind::TimedOut);
            return Err(PortError::from_write(err, state.timeout));
        }

        if state.should_disconnect {
            state.should_disconnect = false;
            let err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "device disconnected");
            return Err(PortError::from_write(err, state.timeout));
        }

        state.write_log.push(data.to_vec());

        if let Some(expected) = state.expected_writes.pop_front() {
            if expected != data {
                return Err(PortError::config(format!(
                    "Expected write: {:?}, got: {:?}",
                    expected, data
                )));
            }
        }

        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), PortError> {
        self.state.lock().flushes += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn baud_rate(&self) -> Option<u32> {
        Some(self.state.lock().baud_rate)
    }
}

impl std::fmt::Debug for MockSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSerialPort")
            .field("name", &self.name)
            .field("writes", &self.get_write_log().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_logging() {
        let mut port = MockSerialPort::new("MOCK0");
        port.write_bytes(b"5,37c107").unwrap();
        port.write_bytes(b"5,36d924").unwrap();

        assert_eq!(port.written_strings(), vec!["5,37c107", "5,36d924"]);
    }

    #[test]
    fn test_clones_share_log() {
        let observer = MockSerialPort::new("MOCK0");
        let mut owned = observer.clone();
        owned.write_bytes(b"3,180c,13").unwrap();
        assert_eq!(observer.get_write_log().len(), 1);
    }

    #[test]
    fn test_expect_write() {
        let mut port = MockSerialPort::new("MOCK0");
        port.expect_write(b"Expected");
        port.write_bytes(b"Expected").unwrap();
        assert!(port.verify_expectations().is_ok());
    }

    #[test]
    fn test_expect_write_mismatch() {
        let mut port = MockSerialPort::new("MOCK0");
        port.expect_write(b"Expected");
        assert!(port.write_bytes(b"Different").is_err());
    }

    #[test]
    fn test_unmet_expectation() {
        let mut port = MockSerialPort::new("MOCK0");
        port.expect_write(b"never");
        assert!(port.verify_expectations().is_err());
    }

    #[test]
    fn test_timeout_simulation() {
        let mut port = MockSerialPort::new("MOCK0");
        port.set_should_timeout(true);
        assert!(matches!(port.write_bytes(b"x"), Err(PortError::Timeout(_))));
        // Only the next write fails.
        assert!(port.write_bytes(b"x").is_ok());
    }

    #[test]
    fn test_disconnect_simulation() {
        let mut port = MockSerialPort::new("MOCK0");
        port.set_should_disconnect(true);
        match port.write_bytes(b"x") {
            Err(PortError::Disconnected(e)) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
            other => panic!("Expected disconnect, got {:?}", other),
        }
        assert!(port.get_write_log().is_empty());
    }

    #[test]
    fn test_clear_and_flush() {
        let mut port = MockSerialPort::new("MOCK0");
        port.write_bytes(b"x").unwrap();
        port.flush().unwrap();
        port.clear_write_log();
        assert!(port.get_write_log().is_empty());
        assert_eq!(port.flush_count(), 1);
    }
}
