//! Port abstraction layer for the serial link to the IR transmitter.
//!
//! The remote only ever writes to the port, but the link is still hidden
//! behind a trait so the event loop can be driven against a mock.

pub mod error;
pub mod mock;
pub mod sync_port;
pub mod traits;

pub use error::PortError;
pub use mock::MockSerialPort;
pub use sync_port::*;
pub use traits::*;
