//! IR serial remote.
//!
//! A terminal remote control: a grid of labelled buttons drawn with
//! ratatui. Clicking a button plays a short click and writes that
//! button's infrared command string (`protocol,code[,bits]`) to a serial
//! port, where a microcontroller with an IR LED transmits it.
//!
//! # Modules
//!
//! - `remote`: command strings, the button table and grid hit-testing
//! - `port`: serial port abstraction with a mock for tests
//! - `sound`: click synthesis and playback
//! - `config`: configuration management with TOML support
//! - `tui`: the event loop and rendering
//! - `cli`: command-line parsing and the headless listings
//! - `logging`: tracing subscriber setup
//! - `error`: unified error handling

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod port;
pub mod remote;
pub mod sound;
pub mod tui;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigError, ConfigLoader};
pub use error::{AppError, AppResult};
pub use port::{
    DataBits, FlowControl, MockSerialPort, Parity, PortConfiguration, PortError, SerialPortAdapter,
    StopBits, SyncSerialPort,
};
pub use remote::{Button, ButtonIndex, CodeTable, GridGeometry, IrCommand, Protocol};
pub use sound::{ClickSound, CpalClick, Silent};
pub use tui::{RemoteApp, Theme};
