//! The remote itself: command strings, the button table and grid geometry.
//!
//! Nothing in here touches the terminal, the serial port or the sound card,
//! so it is all plain data and pure functions.

pub mod command;
pub mod geometry;
pub mod table;

pub use command::{CommandError, IrCommand, Protocol};
pub use geometry::{ButtonIndex, CellRect, GridGeometry};
pub use table::{Button, CodeTable, TableError};
