//! Remote state and the event loop.

use ratatui::backend::Backend;
use ratatui::Terminal;
use tracing::{debug, info};

use super::event::{Event, EventSource};
use super::theme::Theme;
use super::ui::{self, Backdrop};
use crate::error::{AppError, AppResult};
use crate::port::SerialPortAdapter;
use crate::remote::{Button, ButtonIndex, CodeTable, GridGeometry, TableError};
use crate::sound::ClickSound;

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Nothing visible changed
    Continue,
    /// Draw one new frame
    Redraw,
    /// Leave the loop
    Quit,
}

/// Counters returned when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames drawn, including the first
    pub frames: usize,
    /// Commands written to the port
    pub sent: usize,
}

/// Everything the event handler touches: the table, the grid, both output
/// sinks and the hover index.
pub struct RemoteApp<P, S> {
    table: CodeTable,
    geometry: GridGeometry,
    port: P,
    sound: S,
    terminator: Vec<u8>,
    hover: Option<ButtonIndex>,
    last_sent: Option<ButtonIndex>,
    sent: usize,
}

impl<P, S> RemoteApp<P, S>
where
    P: SerialPortAdapter,
    S: ClickSound,
{
    /// Create the remote. The table must have one button per grid cell.
    pub fn new(table: CodeTable, geometry: GridGeometry, port: P, sound: S) -> AppResult<Self> {
        if table.len() != geometry.len() {
            return Err(TableError::WrongLength {
                expected: geometry.len(),
                actual: table.len(),
            }
            .into());
        }
        Ok(Self {
            table,
            geometry,
            port,
            sound,
            terminator: Vec::new(),
            hover: None,
            last_sent: None,
            sent: 0,
        })
    }

    /// Bytes appended after every command.
    pub fn with_terminator(mut self, terminator: Option<&str>) -> Self {
        self.terminator = terminator.map(|t| t.as_bytes().to_vec()).unwrap_or_default();
        self
    }

    /// React to one event.
    pub fn handle_event(&mut self, event: Event) -> AppResult<Flow> {
        match event {
            Event::Quit => Ok(Flow::Quit),
            // The status bar shows the last command.
            Event::Press { x, y } => Ok(match self.press(x, y)? {
                Some(_) => Flow::Redraw,
                None => Flow::Continue,
            }),
            Event::Hover { x, y } => Ok(if self.hover_at(x, y) {
                Flow::Redraw
            } else {
                Flow::Continue
            }),
            Event::Resize(..) => Ok(Flow::Redraw),
        }
    }

    /// Handle a click. Clicks outside every button do nothing.
    pub fn press(&mut self, x: i32, y: i32) -> AppResult<Option<ButtonIndex>> {
        let Some(index) = self.geometry.hit_test(x, y) else {
            debug!(x, y, "press outside buttons");
            return Ok(None);
        };
        self.sound.play();
        self.send(index)?;
        Ok(Some(index))
    }

    /// Write a button's command to the port.
    pub fn send(&mut self, index: ButtonIndex) -> AppResult<()> {
        let button = self.table.button(index)?;
        let mut bytes = button.command.to_wire();
        bytes.extend_from_slice(&self.terminator);

        let port_name = self.port.name().to_string();
        self.port
            .write_bytes(&bytes)
            .and_then(|_| self.port.flush())
            .map_err(|e| AppError::port(port_name, e))?;

        info!(
            button = %index,
            label = %button.label,
            command = %button.command,
            "sent IR command"
        );
        self.last_sent = Some(index);
        self.sent += 1;
        Ok(())
    }

    /// Update the hover index. Returns whether it changed.
    pub fn hover_at(&mut self, x: i32, y: i32) -> bool {
        let index = self.geometry.hit_test(x, y);
        if index == self.hover {
            return false;
        }
        debug!(from = ?self.hover, to = ?index, "hover changed");
        self.hover = index;
        true
    }

    /// Draw the first frame, then handle events until one asks to quit.
    pub fn run<B, E>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
        theme: &Theme,
    ) -> AppResult<RunSummary>
    where
        B: Backend,
        E: EventSource,
    {
        let mut backdrop = Backdrop::default();
        let mut frames = 0;
        let mut draw = |app: &Self, terminal: &mut Terminal<B>| -> AppResult<()> {
            terminal.draw(|frame| {
                if backdrop.area() != frame.area() {
                    backdrop = Backdrop::new(frame.area(), &app.table, &app.geometry, theme);
                }
                ui::render(frame, app, &backdrop, theme);
            })?;
            frames += 1;
            Ok(())
        };

        draw(self, terminal)?;
        loop {
            let Some(event) = events.next_event()? else {
                continue;
            };
            match self.handle_event(event)? {
                Flow::Continue => {}
                Flow::Redraw => draw(self, terminal)?,
                Flow::Quit => break,
            }
        }

        Ok(RunSummary {
            frames,
            sent: self.sent,
        })
    }

    pub fn hover(&self) -> Option<ButtonIndex> {
        self.hover
    }

    pub fn hovered_button(&self) -> Option<&Button> {
        self.hover.and_then(|i| self.table.get(i))
    }

    pub fn last_sent(&self) -> Option<(ButtonIndex, &Button)> {
        self.last_sent
            .and_then(|i| self.table.get(i).map(|b| (i, b)))
    }

    pub fn sent_count(&self) -> usize {
        self.sent
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn port(&self) -> &P {
        &self.port
    }
}
