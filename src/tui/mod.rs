//! Terminal front end for the remote.
//!
//! Draws the button grid with ratatui, reads the mouse through crossterm
//! and drives [`RemoteApp`], which owns all of the remote's state.
//!
//! # Example
//!
//! ```rust,no_run
//! use ir_serial_remote::port::MockSerialPort;
//! use ir_serial_remote::remote::{CodeTable, GridGeometry};
//! use ir_serial_remote::sound::Silent;
//! use ir_serial_remote::tui::{self, RemoteApp, TerminalEvents, Theme};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = RemoteApp::new(
//!     CodeTable::builtin(),
//!     GridGeometry::terminal(),
//!     MockSerialPort::new("MOCK0"),
//!     Silent,
//! )?;
//! let mut terminal = tui::setup_terminal()?;
//! let result = app.run(&mut terminal, &mut TerminalEvents::default(), &Theme::default());
//! tui::restore_terminal(&mut terminal)?;
//! result?;
//! # Ok(())
//! # }
//! ```

mod app;
mod event;
mod theme;
mod ui;

pub use app::{Flow, RemoteApp, RunSummary};
pub use event::{Event, EventSource, ScriptedEvents, TerminalEvents};
pub use theme::{Theme, THEMES};
pub use ui::{render, restore_terminal, setup_terminal, Backdrop};
