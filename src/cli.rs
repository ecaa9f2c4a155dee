//! Command-line interface.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::{Config, ConfigLoader, ConfigResult};
use crate::remote::{CodeTable, GridGeometry};

/// Mouse-driven IR remote that sends button codes to a transmitter over a serial port.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ir-remote", version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the standard locations
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Serial port name or alias
    #[arg(short, long, global = true)]
    pub port: Option<String>,

    /// Baud rate
    #[arg(short, long, global = true)]
    pub baud: Option<u32>,

    /// Disable the click sound
    #[arg(long, global = true)]
    pub mute: bool,

    /// Color theme (dark, light, solarized, dracula, nord)
    #[arg(long, global = true)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the remote (default)
    Run,
    /// Print the button table
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Send one button's command without opening the remote
    Send {
        /// Button label; the first button with this label is sent
        #[arg(required_unless_present = "index", conflicts_with = "index")]
        label: Option<String>,
        /// Button index, row-major from the top left
        #[arg(long)]
        index: Option<usize>,
    },
    /// List serial ports
    Ports,
    /// Write the default configuration file
    InitConfig {
        /// Where to write it; defaults to the platform config directory
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

impl Cli {
    /// The subcommand to run, `run` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }

    /// Load the configuration this invocation asks for, with flags applied last.
    ///
    /// Validation runs once on the final result, so a flag can correct a bad
    /// file or environment value.
    pub fn load_config(&self) -> ConfigResult<Config> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::read_from(path)?,
            None => ConfigLoader::read()?,
        };
        let mut config = loader.into_config();
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply the command-line flags on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(port) = &self.port {
            config.serial.port = port.clone();
        }
        if let Some(baud) = self.baud {
            config.serial.baud_rate = baud;
        }
        if self.mute {
            config.sound.enabled = false;
        }
        if let Some(theme) = &self.theme {
            config.tui.theme = theme.clone();
        }
    }
}

/// One row of `ir-remote list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub index: usize,
    pub row: u16,
    pub column: u16,
    pub label: String,
    pub protocol: String,
    pub command: String,
}

/// Describe every button with its grid position.
pub fn list_entries(table: &CodeTable, geometry: &GridGeometry) -> Vec<ListEntry> {
    table
        .iter()
        .map(|(index, button)| {
            let (row, column) = geometry.position(index);
            ListEntry {
                index: index.get(),
                row,
                column,
                label: button.label.clone(),
                protocol: button.command.protocol().name().to_string(),
                command: button.command.to_string(),
            }
        })
        .collect()
}

/// Plain-text rendering of [`list_entries`].
pub fn format_list(entries: &[ListEntry]) -> String {
    let mut out = format!(
        "{:>5}  {:>7}  {:<6} {:<13} {}\n",
        "INDEX", "ROW,COL", "LABEL", "PROTOCOL", "COMMAND"
    );
    for entry in entries {
        out.push_str(&format!(
            "{:>5}  {:>7}  {:<6} {:<13} {}\n",
            entry.index,
            format!("{},{}", entry.row, entry.column),
            entry.label,
            entry.protocol,
            entry.command
        ));
    }
    out
}
