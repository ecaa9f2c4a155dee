//! Synchronous serial port implementation.
//!
//! Wraps the `serialport` crate's `SerialPort` trait with our own
//! `SerialPortAdapter` trait so the remote can be tested without hardware.

use super::error::PortError;
use super::traits::{PortConfiguration, SerialPortAdapter};
use std::io::Write;
use tracing::{debug, info};

/// Synchronous serial port implementation wrapping `serialport::SerialPort`.
pub struct SyncSerialPort {
    /// The underlying serial port implementation.
    port: Box<dyn serialport::SerialPort>,
    /// The port name/path for identification.
    name: String,
}

impl SyncSerialPort {
    /// Open a serial port with the given configuration.
    ///
    /// # Example
    /// ```no_run
    /// use ir_serial_remote::port::{SyncSerialPort, PortConfiguration};
    ///
    /// let port = SyncSerialPort::open("/dev/ttyUSB0", PortConfiguration::default())?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(port_name: &str, config: PortConfiguration) -> Result<Self, PortError> {
        let port = serialport::new(port_name, config.baud_rate)
            .data_bits(config.data_bits.into())
            .flow_control(config.flow_control.into())
            .parity(config.parity.into())
            .stop_bits(config.stop_bits.into())
            .timeout(config.timeout)
            .open()
            .map_err(|e| match e.kind() {
                serialport::ErrorKind::NoDevice => PortError::not_found(port_name),
                serialport::ErrorKind::InvalidInput => PortError::config(e.to_string()),
                _ => PortError::Serial(e),
            })?;

        info!(port = port_name, baud = config.baud_rate, "serial port opened");

        Ok(Self {
            port,
            name: port_name.to_string(),
        })
    }
}

impl SerialPortAdapter for SyncSerialPort {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError> {
        self.port
            .write_all(data)
            .map_err(|e| PortError::from_write(e, self.port.timeout()))?;
        debug!(port = %self.name, bytes = data.len(), "wrote to serial port");
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), PortError> {
        self.port
            .flush()
            .map_err(|e| PortError::from_write(e, self.port.timeout()))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn baud_rate(&self) -> Option<u32> {
        self.port.baud_rate().ok()
    }
}

impl std::fmt::Debug for SyncSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncSerialPort")
            .field("name", &self.name)
            .field("baud_rate", &self.port.baud_rate())
            .finish()
    }
}

/// Names of the serial ports currently present on the system.
pub fn available_port_names() -> Result<Vec<String>, PortError> {
    Ok(serialport::available_ports()?
        .into_iter()
        .map(|p| p.port_name)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_not_found_error() {
        let result = SyncSerialPort::open("/dev/nonexistent_port_12345", PortConfiguration::default());
        assert!(result.is_err());
    }
}
