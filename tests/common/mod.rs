//! Shared helpers for the integration tests.

#![allow(dead_code)]

use ir_serial_remote::port::MockSerialPort;
use ir_serial_remote::remote::{ButtonIndex, CodeTable, GridGeometry};
use ir_serial_remote::sound::ClickSound;
use ir_serial_remote::tui::RemoteApp;

mockall::mock! {
    pub Sound {}

    impl ClickSound for Sound {
        fn play(&mut self);
    }
}

/// A point inside the face of button `index`, `(dx, dy)` from its top left.
pub fn inside(geometry: &GridGeometry, index: usize, dx: i32, dy: i32) -> (i32, i32) {
    let rect = geometry.cell_rect(ButtonIndex::new(index));
    (rect.x + dx, rect.y + dy)
}

/// The stock remote on a mock port. The returned port shares the write log.
pub fn remote<S: ClickSound>(
    geometry: GridGeometry,
    sound: S,
) -> (RemoteApp<MockSerialPort, S>, MockSerialPort) {
    let port = MockSerialPort::new("MOCK0");
    let app = RemoteApp::new(CodeTable::builtin(), geometry, port.clone(), sound)
        .expect("builtin table fills the stock grid");
    (app, port)
}
