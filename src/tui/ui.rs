//! UI rendering for the remote.
//!
//! The casing, button faces and every label are drawn once into a cached
//! [`Backdrop`]. Each frame copies the whole backdrop, then paints the
//! hovered label on top in the highlight color and writes the status bar.

use super::app::RemoteApp;
use super::theme::Theme;
use crate::port::SerialPortAdapter;
use crate::remote::{ButtonIndex, CellRect, CodeTable, GridGeometry};
use crate::sound::ClickSound;
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
    Frame, Terminal,
};
use std::io::{self, Stdout};

/// Set up the terminal for TUI rendering.
pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to normal mode.
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// The remote drawn without any highlight.
#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    buffer: Buffer,
}

impl Backdrop {
    /// Draw the casing and all labels for a screen of size `area`.
    pub fn new(area: Rect, table: &CodeTable, geometry: &GridGeometry, theme: &Theme) -> Self {
        let mut buffer = Buffer::empty(area);
        buffer.set_style(area, Style::default().bg(theme.bg).fg(theme.fg));

        if let Some(body) = clip(body_rect(geometry), area) {
            Block::bordered()
                .title(Span::styled(
                    " IR Remote ",
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ))
                .border_style(Style::default().fg(theme.border))
                .style(Style::default().bg(theme.body))
                .render(body, &mut buffer);
        }

        let label_style = Style::default()
            .fg(theme.label)
            .bg(theme.button)
            .add_modifier(Modifier::BOLD);
        for (index, button) in table.iter() {
            if let Some(face) = clip(geometry.cell_rect(index), area) {
                buffer.set_style(face, Style::default().bg(theme.button));
            }
            draw_label(&mut buffer, geometry, index, &button.label, label_style);
        }

        Self { buffer }
    }

    /// Screen area this backdrop was drawn for.
    pub fn area(&self) -> Rect {
        self.buffer.area
    }
}

impl Widget for &Backdrop {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(self.buffer.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let (Some(src), Some(dst)) = (self.buffer.cell((x, y)), buf.cell_mut((x, y))) {
                    *dst = src.clone();
                }
            }
        }
    }
}

/// Render one frame.
pub fn render<P, S>(frame: &mut Frame, app: &RemoteApp<P, S>, backdrop: &Backdrop, theme: &Theme)
where
    P: SerialPortAdapter,
    S: ClickSound,
{
    let area = frame.area();
    frame.render_widget(backdrop, area);

    if let (Some(index), Some(button)) = (app.hover(), app.hovered_button()) {
        let style = Style::default()
            .fg(theme.highlight)
            .bg(theme.button)
            .add_modifier(Modifier::BOLD);
        draw_label(frame.buffer_mut(), app.geometry(), index, &button.label, style);
    }

    render_status_bar(frame, app, theme, status_rect(app.geometry(), area));
}

fn render_status_bar<P, S>(frame: &mut Frame, app: &RemoteApp<P, S>, theme: &Theme, area: Rect)
where
    P: SerialPortAdapter,
    S: ClickSound,
{
    let sent = match app.last_sent() {
        Some((_, button)) => Span::styled(
            format!("{} {}", button.label, button.command),
            Style::default().fg(theme.sent),
        ),
        None => Span::styled("nothing sent", Style::default().fg(theme.inactive)),
    };

    let link = match app.port().baud_rate() {
        Some(baud) => format!(" {} @ {baud} ", app.port().name()),
        None => format!(" {} ", app.port().name()),
    };
    let status = Line::from(vec![
        Span::styled(link, Style::default().fg(theme.fg)),
        Span::raw("| "),
        sent,
        Span::raw(" | "),
        Span::styled("Esc:quit", Style::default().fg(theme.inactive)),
    ]);

    frame.render_widget(
        Paragraph::new(status).style(Style::default().bg(theme.status_bg)),
        area,
    );
}

/// Draw a label centred on its button, clipped to the buffer.
fn draw_label(buf: &mut Buffer, geometry: &GridGeometry, index: ButtonIndex, label: &str, style: Style) {
    let width = label.chars().count().min(usize::from(u16::MAX)) as u16;
    let (x, y) = geometry.label_anchor(index, width);
    let area = buf.area;
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if x < area.left() || x >= area.right() || y < area.top() || y >= area.bottom() {
        return;
    }
    let max_width = usize::from(area.right() - x);
    buf.set_stringn(x, y, label, max_width, style);
}

/// Casing around the grid: two columns of margin at the sides, one row
/// top and bottom for the border.
fn body_rect(geometry: &GridGeometry) -> CellRect {
    let (right, bottom) = geometry.extent();
    let x = geometry.origin_x.saturating_sub(2);
    let y = geometry.origin_y.saturating_sub(1);
    let span = |from: i32, to: i32| {
        (i64::from(to) - i64::from(from)).clamp(0, i64::from(u16::MAX)) as u16
    };
    CellRect {
        x,
        y,
        width: span(x, right.saturating_add(2)),
        height: span(y, bottom.saturating_add(1)),
    }
}

/// One row directly under the casing, or the last screen row if that is off-screen.
fn status_rect(geometry: &GridGeometry, area: Rect) -> Rect {
    let below = body_rect(geometry);
    let wanted = below.y.saturating_add(i32::from(below.height));
    let last = i32::from(area.bottom()) - 1;
    let y = wanted.clamp(i32::from(area.top()), last.max(i32::from(area.top())));
    Rect::new(area.x, y as u16, area.width, area.height.min(1))
}

/// Convert a cell rectangle to a screen rect, dropping what is off-screen.
fn clip(rect: CellRect, area: Rect) -> Option<Rect> {
    let left = rect.x.max(0);
    let top = rect.y.max(0);
    let right = rect.x.saturating_add(i32::from(rect.width));
    let bottom = rect.y.saturating_add(i32::from(rect.height));
    if right <= left || bottom <= top {
        return None;
    }
    let to_u16 = |v: i32| v.clamp(0, i32::from(u16::MAX)) as u16;
    let screen = Rect::new(
        to_u16(left),
        to_u16(top),
        to_u16(right - left),
        to_u16(bottom - top),
    );
    let visible = screen.intersection(area);
    (!visible.is_empty()).then_some(visible)
}
