//! End-to-end runs of the remote against a mock port and a test terminal.

mod common;

use common::{inside, remote, MockSound};
use ir_serial_remote::remote::{ButtonIndex, GridGeometry};
use ir_serial_remote::sound::Silent;
use ir_serial_remote::tui::{Event, Flow, RunSummary, ScriptedEvents, Theme};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(48, 36)).unwrap()
}

#[test]
fn test_escape_only_draws_once_and_sends_nothing() {
    let mut sound = MockSound::new();
    sound.expect_play().never();
    let (mut app, port) = remote(GridGeometry::terminal(), sound);
    let mut terminal = terminal();
    let mut events = ScriptedEvents::new([Event::Quit]);

    let summary = app.run(&mut terminal, &mut events, &Theme::default()).unwrap();

    assert_eq!(summary, RunSummary { frames: 1, sent: 0 });
    assert!(port.get_write_log().is_empty());
    assert_eq!(port.flush_count(), 0);
}

#[test]
fn test_session_hover_then_press() {
    let geometry = GridGeometry::terminal();
    let mut sound = MockSound::new();
    sound.expect_play().times(1).return_const(());
    let (mut app, port) = remote(geometry, sound);

    let (x5, y5) = inside(&geometry, 5, 0, 0);
    let (x6, y6) = inside(&geometry, 6, 0, 0);
    let (px, py) = inside(&geometry, 0, 1, 1);
    let mut events = ScriptedEvents::new([
        Event::Hover { x: x5, y: y5 },
        Event::Hover { x: x5 + 1, y: y5 },
        Event::Hover { x: x6, y: y6 },
        Event::Press { x: px, y: py },
        Event::Press { x: -1, y: 5 },
    ]);
    let theme = Theme::default();
    let mut terminal = terminal();

    let summary = app.run(&mut terminal, &mut events, &theme).unwrap();

    // First frame, hover on 5, hover on 6, the press that sent.
    assert_eq!(summary, RunSummary { frames: 4, sent: 1 });
    assert_eq!(events.remaining(), 0);
    assert_eq!(port.written_strings(), vec!["3,180c,13"]);
    assert_eq!(app.hover(), Some(ButtonIndex::new(6)));

    let buf = terminal.backend().buffer();
    let (lx, ly) = geometry.label_anchor(ButtonIndex::new(6), 2);
    let cell = buf.cell((lx as u16, ly as u16)).unwrap();
    assert_eq!(cell.symbol(), ">");
    assert_eq!(cell.fg, theme.highlight);

    let (lx, ly) = geometry.label_anchor(ButtonIndex::new(5), 1);
    assert_eq!(buf.cell((lx as u16, ly as u16)).unwrap().fg, theme.label);
}

#[test]
fn test_gap_between_buttons_is_dead() {
    let geometry = GridGeometry::terminal();
    let mut sound = MockSound::new();
    sound.expect_play().never();
    let (mut app, port) = remote(geometry, sound);

    // The column right after button 0's face still counts as button 0; the
    // one after that is the gap.
    let (x, y) = inside(&geometry, 0, i32::from(geometry.button_width) + 1, 0);
    assert_eq!(app.handle_event(Event::Press { x, y }).unwrap(), Flow::Continue);
    assert!(port.get_write_log().is_empty());
}

#[test]
fn test_classic_window_coordinates() {
    let (mut app, port) = remote(GridGeometry::classic_window(), Silent);

    for (x, y) in [(66, 40), (65 + 71 * 2 + 5, 39 + 71 * 9 + 5), (64, 40), (120, 40)] {
        app.handle_event(Event::Press { x, y }).unwrap();
    }

    // (64, 40) is left of the grid and (120, 40) falls in the gap.
    assert_eq!(port.written_strings(), vec!["3,180c,13", "3,180d,13"]);
    assert_eq!(app.sent_count(), 2);
}

#[test]
fn test_every_button_reaches_the_port() {
    let geometry = GridGeometry::terminal();
    let (mut app, port) = remote(geometry, Silent);

    for index in 0..geometry.len() {
        let (x, y) = inside(&geometry, index, 2, 1);
        app.handle_event(Event::Press { x, y }).unwrap();
    }

    let written = port.written_strings();
    assert_eq!(written.len(), 40);
    for (i, (_, button)) in app.table().iter().enumerate() {
        assert_eq!(written[i], button.command.to_string());
    }
}

#[test]
fn test_write_failure_stops_the_loop() {
    let geometry = GridGeometry::terminal();
    let mut sound = MockSound::new();
    sound.expect_play().times(1).return_const(());
    let (mut app, mut port) = remote(geometry, sound);
    port.set_should_disconnect(true);

    let (x, y) = inside(&geometry, 3, 0, 0);
    let mut events = ScriptedEvents::new([
        Event::Press { x, y },
        Event::Hover { x: 0, y: 0 },
    ]);
    let result = app.run(&mut terminal(), &mut events, &Theme::default());

    assert!(result.is_err());
    assert_eq!(events.remaining(), 1);
}
