//! Input events for the remote.
//!
//! Terminal input is read on the event-loop thread itself; there is no
//! background reader. Raw crossterm events are narrowed down to the handful
//! the remote reacts to.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Events the remote handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Escape, `q` or Ctrl+C
    Quit,
    /// Any mouse button pressed at a cell
    Press { x: i32, y: i32 },
    /// Pointer moved (or dragged) to a cell
    Hover { x: i32, y: i32 },
    /// Terminal resized
    Resize(u16, u16),
}

impl Event {
    /// Map a crossterm event, dropping the ones the remote ignores.
    pub fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) => Self::from_key(key),
            CrosstermEvent::Mouse(mouse) => Self::from_mouse(mouse),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
            _ => None,
        }
    }

    fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Event::Quit),
            // Raw mode turns SIGINT into a key press.
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Event::Quit)
            }
            _ => None,
        }
    }

    fn from_mouse(mouse: MouseEvent) -> Option<Self> {
        let x = i32::from(mouse.column);
        let y = i32::from(mouse.row);
        match mouse.kind {
            MouseEventKind::Down(_) => Some(Event::Press { x, y }),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Event::Hover { x, y }),
            _ => None,
        }
    }
}

/// A source of input events.
pub trait EventSource {
    /// Wait for the next event.
    ///
    /// Returns `Ok(None)` when nothing relevant arrived in time, and
    /// `Ok(Some(Event::Quit))` once a source is exhausted.
    fn next_event(&mut self) -> io::Result<Option<Event>>;
}

/// Reads events from the terminal.
#[derive(Debug, Clone)]
pub struct TerminalEvents {
    poll_interval: Duration,
}

impl TerminalEvents {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }
}

impl Default for TerminalEvents {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        if !event::poll(self.poll_interval)? {
            return Ok(None);
        }
        Ok(Event::from_crossterm(event::read()?))
    }
}

/// A fixed sequence of events, followed by `Quit`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    events: VecDeque<Event>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Events not yet handed out.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        Ok(Some(self.events.pop_front().unwrap_or(Event::Quit)))
    }
}
