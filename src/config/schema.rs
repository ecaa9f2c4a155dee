//! Configuration schema definitions.
//!
//! Every section has defaults that reproduce the stock remote, so an empty
//! or missing config file is valid.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use super::error::{ConfigError, ConfigResult};
use crate::port::{DataBits, FlowControl, Parity, PortConfiguration, StopBits};
use crate::remote::{Button, CodeTable, GridGeometry, TableError};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial link to the transmitter
    pub serial: SerialConfig,
    /// Button grid placement, in terminal cells
    pub layout: GridGeometry,
    /// Click feedback
    pub sound: SoundConfig,
    /// TUI appearance
    pub tui: TuiConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Replacement button table; empty means the built-in remote
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

impl Config {
    /// Check values that serde cannot.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.serial.port.trim().is_empty() {
            return Err(ConfigError::validation("serial.port", "must not be empty"));
        }
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::validation("serial.baud_rate", "must be non-zero"));
        }
        self.layout
            .validate()
            .map_err(|msg| ConfigError::validation("layout", msg))?;
        if self.tui.poll_interval_ms == 0 {
            return Err(ConfigError::validation(
                "tui.poll_interval_ms",
                "must be non-zero",
            ));
        }
        if self.sound.frequency_hz.is_nan() || self.sound.frequency_hz <= 0.0 {
            return Err(ConfigError::validation(
                "sound.frequency_hz",
                "must be positive",
            ));
        }
        Ok(())
    }

    /// The button table to use, checked against the grid size.
    pub fn code_table(&self) -> Result<CodeTable, TableError> {
        let cells = self.layout.len();
        if self.buttons.is_empty() {
            let builtin = CodeTable::builtin();
            return CodeTable::new(builtin.buttons().to_vec(), cells);
        }
        CodeTable::new(self.buttons.clone(), cells)
    }
}

/// Serial port configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Port name or alias
    pub port: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Write timeout in milliseconds
    pub timeout_ms: u64,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
    /// Appended after every command. The stock transmitter sketch needs none.
    pub terminator: Option<String>,
    /// Port aliases for convenience
    #[serde(default)]
    pub port_aliases: HashMap<String, String>,
}

impl Default for SerialConfig {
    fn default() -> Self {
        let port = if cfg!(windows) { "COM4" } else { "/dev/ttyUSB0" };
        Self {
            port: port.to_string(),
            baud_rate: 9600,
            timeout_ms: 1000,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            terminator: None,
            port_aliases: HashMap::new(),
        }
    }
}

impl SerialConfig {
    /// Get the timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Resolve a port name through aliases
    pub fn resolve_port(&self, name: &str) -> String {
        self.port_aliases
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    /// The configured port after alias resolution.
    pub fn resolved_port(&self) -> String {
        self.resolve_port(&self.port)
    }

    /// Line settings for opening the port.
    pub fn port_configuration(&self) -> PortConfiguration {
        PortConfiguration {
            baud_rate: self.baud_rate,
            data_bits: self.data_bits,
            flow_control: self.flow_control,
            parity: self.parity,
            stop_bits: self.stop_bits,
            timeout: self.timeout(),
        }
    }
}

/// Click sound configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    /// Play a click on every press
    pub enabled: bool,
    /// Tone of the click
    pub frequency_hz: f32,
    /// Length of the click
    pub duration_ms: u32,
    /// 0.0 to 1.0
    pub volume: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency_hz: 2500.0,
            duration_ms: 25,
            volume: 0.4,
        }
    }
}

/// TUI configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", "solarized", "dracula", "nord"
    pub theme: String,
    /// How long to wait for input before polling again
    pub poll_interval_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            poll_interval_ms: 100,
        }
    }
}

impl TuiConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Log file path. The TUI discards logs when this is unset.
    pub file: Option<PathBuf>,
    /// Log format: "json", "pretty", "compact"
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format
    Json,
    /// Pretty format with colors
    #[default]
    Pretty,
    /// Compact format
    Compact,
}
