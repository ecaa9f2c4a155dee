use clap::Parser;
use tracing::{info, warn};

use ir_serial_remote::cli::{self, Cli, Command};
use ir_serial_remote::config::{get_default_config_path, write_default_config, Config, ConfigError};
use ir_serial_remote::logging::{self, LogTarget};
use ir_serial_remote::port::{available_port_names, SyncSerialPort};
use ir_serial_remote::remote::ButtonIndex;
use ir_serial_remote::sound::{ClickSound, ClickSpec, CpalClick, Silent};
use ir_serial_remote::tui::{self, RemoteApp, TerminalEvents, Theme};
use ir_serial_remote::{AppError, AppResult};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command();

    // init-config must work even when the existing file is broken.
    if let Command::InitConfig { path } = &command {
        return Ok(init_config(path.clone())?);
    }

    let config = cli.load_config()?;
    let target = match command {
        Command::Run => LogTarget::FileOnly,
        _ => LogTarget::Stderr,
    };
    logging::init(&config.logging, target)?;

    match command {
        Command::Run => run_remote(config)?,
        Command::List { json } => list(&config, json)?,
        Command::Send { label, index } => send(config, label, index)?,
        Command::Ports => ports()?,
        Command::InitConfig { .. } => unreachable!("handled above"),
    }
    Ok(())
}

/// Open the port and the sound, then hand the terminal to the remote.
fn run_remote(config: Config) -> AppResult<()> {
    let table = config.code_table()?;
    let theme = match Theme::by_name(&config.tui.theme) {
        Some(theme) => theme.clone(),
        None => {
            warn!(theme = %config.tui.theme, "unknown theme, using dark");
            Theme::default()
        }
    };

    let port_name = config.serial.resolved_port();
    let port = SyncSerialPort::open(&port_name, config.serial.port_configuration())
        .map_err(|e| AppError::port(&port_name, e))?;

    let sound: Box<dyn ClickSound> = if config.sound.enabled {
        Box::new(CpalClick::open(ClickSpec::from(&config.sound))?)
    } else {
        Box::new(Silent)
    };

    let mut app = RemoteApp::new(table, config.layout, port, sound)?
        .with_terminator(config.serial.terminator.as_deref());
    let mut events = TerminalEvents::new(config.tui.poll_interval());

    let mut terminal = tui::setup_terminal()?;
    let result = app.run(&mut terminal, &mut events, &theme);
    tui::restore_terminal(&mut terminal)?;

    let summary = result?;
    info!(frames = summary.frames, sent = summary.sent, "remote closed");
    Ok(())
}

fn list(config: &Config, json: bool) -> AppResult<()> {
    let table = config.code_table()?;
    let entries = cli::list_entries(&table, &config.layout);
    if json {
        let out = serde_json::to_string_pretty(&entries)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        println!("{out}");
    } else {
        print!("{}", cli::format_list(&entries));
    }
    Ok(())
}

/// Send one command without the terminal UI or the click.
fn send(config: Config, label: Option<String>, index: Option<usize>) -> AppResult<()> {
    let table = config.code_table()?;
    let index = match (label, index) {
        (_, Some(index)) => ButtonIndex::new(index),
        (Some(label), None) => table.find_label(&label)?.0,
        (None, None) => unreachable!("clap requires a label or an index"),
    };
    table.button(index)?;

    let port_name = config.serial.resolved_port();
    let port = SyncSerialPort::open(&port_name, config.serial.port_configuration())
        .map_err(|e| AppError::port(&port_name, e))?;
    let mut app = RemoteApp::new(table, config.layout, port, Silent)?
        .with_terminator(config.serial.terminator.as_deref());
    app.send(index)?;

    if let Some((index, button)) = app.last_sent() {
        println!("{index} {} -> {} on {port_name}", button.label, button.command);
    }
    Ok(())
}

fn ports() -> AppResult<()> {
    let names = available_port_names().map_err(|e| AppError::port("*", e))?;
    if names.is_empty() {
        println!("No serial ports found");
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn init_config(path: Option<std::path::PathBuf>) -> AppResult<()> {
    let path = path
        .or_else(get_default_config_path)
        .ok_or_else(|| ConfigError::MissingRequired("config directory".to_string()))?;
    write_default_config(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
