//! Configuration module for the remote.
//!
//! TOML-based configuration with environment variable overrides. Every value
//! has a default matching the stock remote, so no file is required.
//!
//! # Configuration Resolution
//!
//! 1. `--config <path>` on the command line
//! 2. `IR_REMOTE_CONFIG` environment variable (explicit path)
//! 3. `./ir-remote.toml` (current directory)
//! 4. `<platform config dir>/ir-remote/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Overrides
//!
//! - `IR_REMOTE_SERIAL_PORT`, `IR_REMOTE_SERIAL_BAUD`, `IR_REMOTE_SERIAL_TIMEOUT_MS`
//! - `IR_REMOTE_SOUND_ENABLED`
//! - `IR_REMOTE_TUI_THEME`
//! - `IR_REMOTE_LOGGING_LEVEL`, `IR_REMOTE_LOGGING_FILE`
//!
//! # Example
//!
//! ```toml
//! [serial]
//! port = "COM4"
//! baud_rate = 9600
//!
//! [sound]
//! enabled = false
//!
//! [[buttons]]
//! label = "TVp"
//! command = "3,180c,13"
//! ```

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    get_default_config_dir, get_default_config_path, resolve_config_path, write_default_config,
    ConfigLoader,
};
pub use schema::{Config, LogFormat, LoggingConfig, SerialConfig, SoundConfig, TuiConfig};
