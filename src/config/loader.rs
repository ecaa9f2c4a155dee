//! Configuration loader with file resolution and environment override support.

use super::error::{ConfigError, ConfigResult};
use super::schema::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "IR_REMOTE";

/// Config file name inside the platform config directory
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config file name looked for in the working directory
const LOCAL_CONFIG_FILE_NAME: &str = "ir-remote.toml";

/// Environment variable for explicit config path
const CONFIG_PATH_ENV: &str = "IR_REMOTE_CONFIG";

/// Configuration loader with resolution and override logic.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any)
    pub config_path: Option<PathBuf>,
    /// The loaded configuration
    pub config: Config,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `IR_REMOTE_CONFIG` environment variable (explicit path)
    /// 2. `./ir-remote.toml` (current directory)
    /// 3. `<platform config dir>/ir-remote/config.toml`
    /// 4. Built-in defaults (no file required)
    ///
    /// Environment variables override values from the file, and the result
    /// is validated.
    pub fn load() -> ConfigResult<Self> {
        let loader = Self::read()?;
        loader.config.validate()?;
        Ok(loader)
    }

    /// Load configuration from a specific file path.
    ///
    /// Unlike [`load`](Self::load), a missing file is an error.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let loader = Self::read_from(path)?;
        loader.config.validate()?;
        Ok(loader)
    }

    /// Like [`load`](Self::load) but without validation, for callers that
    /// layer more overrides on top and validate the final result.
    pub fn read() -> ConfigResult<Self> {
        let config_path = resolve_config_path();

        let mut config = match config_path {
            Some(ref path) => load_from_file(path)?,
            None => Config::default(),
        };
        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Like [`load_from`](Self::load_from) but without validation.
    pub fn read_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        let mut config = load_from_file(&path)?;
        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Create a loader with default configuration (no file).
    pub fn with_defaults() -> Self {
        let mut config = Config::default();
        // Still apply env overrides even with defaults
        if apply_env_overrides(&mut config).is_err() {
            config = Config::default();
        }

        Self {
            config_path: None,
            config,
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Save the current configuration to a specific file.
    pub fn save_to(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        save_to_file(&self.config, path.as_ref())
    }
}

/// Resolve the configuration file path using standard locations.
pub fn resolve_config_path() -> Option<PathBuf> {
    // 1. Explicit environment variable
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. Current directory
    let cwd_config = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    // 3. Platform config directory
    if let Some(app_config) = get_default_config_path() {
        if app_config.exists() {
            return Some(app_config);
        }
    }

    None
}

/// Get the platform config directory for this application.
///
/// `~/.config/ir-remote` on Linux, `%APPDATA%\ir-remote\config` on Windows,
/// `~/Library/Application Support/ir-remote` on macOS.
pub fn get_default_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ir-remote").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the default config file path for creating new config files.
pub fn get_default_config_path() -> Option<PathBuf> {
    get_default_config_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

/// Write the default configuration to `path`, refusing to clobber an existing file.
pub fn write_default_config(path: &Path) -> ConfigResult<()> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    save_to_file(&Config::default(), path)
}

/// Load configuration from a file.
fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(ConfigError::ParseError)
}

/// Save configuration to a file.
fn save_to_file(config: &Config, path: &Path) -> ConfigResult<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn env_var(key: &str) -> Option<(String, String)> {
    let var = format!("{}_{}", ENV_PREFIX, key);
    std::env::var(&var).ok().map(|val| (var, val))
}

/// Apply environment variable overrides to the configuration.
///
/// Environment variables follow the pattern: `IR_REMOTE_<SECTION>_<KEY>`
/// For example:
/// - `IR_REMOTE_SERIAL_PORT=COM4`
/// - `IR_REMOTE_SERIAL_BAUD=9600`
/// - `IR_REMOTE_SOUND_ENABLED=false`
fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    // Serial overrides
    if let Some((_, val)) = env_var("SERIAL_PORT") {
        config.serial.port = val;
    }
    if let Some((var, val)) = env_var("SERIAL_BAUD") {
        config.serial.baud_rate = val
            .parse()
            .map_err(|_| ConfigError::env_parse(var, "Invalid baud rate"))?;
    }
    if let Some((var, val)) = env_var("SERIAL_TIMEOUT_MS") {
        config.serial.timeout_ms = val
            .parse()
            .map_err(|_| ConfigError::env_parse(var, "Invalid timeout"))?;
    }

    // Sound overrides
    if let Some((var, val)) = env_var("SOUND_ENABLED") {
        config.sound.enabled = match val.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => return Err(ConfigError::env_parse(var, "Expected true or false")),
        };
    }

    // TUI overrides
    if let Some((_, val)) = env_var("TUI_THEME") {
        config.tui.theme = val;
    }

    // Logging overrides
    if let Some((_, val)) = env_var("LOGGING_LEVEL") {
        config.logging.level = val;
    }
    if let Some((_, val)) = env_var("LOGGING_FILE") {
        config.logging.file = Some(PathBuf::from(val));
    }

    Ok(())
}
