//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`common`]: Header bar, status bar and help overlay
//! - [`rings`]: The three metric panels, each a counter over a ring chart
//! - [`log`]: Newest-first event log
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├────────────┬────────────┬────────────┤
//! │   Yawns    │ Eye closures│  Alerts   │
//! │  counter   │  counter    │  counter  │
//! │   ring     │   ring      │   ring    │
//! ├────────────┴────────────┴────────────┤
//! │ Recent events (log::render)          │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top: common::render_help
//! ```

pub mod common;
pub mod log;
pub mod rings;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal size for usable display.
pub const MIN_WIDTH: u16 = 50;
pub const MIN_HEIGHT: u16 = 14;

/// Draw the whole dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let top = (area.height / 2).saturating_sub(2);
        let centered = Rect::new(area.x, area.y + top, area.width, 5u16.min(area.height - top));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1),      // Header bar
        Constraint::Percentage(55), // Counters and rings
        Constraint::Min(4),         // Event log
        Constraint::Length(1),      // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    rings::render(frame, app, chunks[1]);
    log::render(frame, app, chunks[2]);
    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use crate::app::App;

    /// Render `app` into an off-screen terminal and return its buffer.
    pub fn render_to_buffer(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| super::render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render `app` into an off-screen terminal and return its rows as text.
    pub fn render_to_lines(app: &App, width: u16, height: u16) -> Vec<String> {
        let buffer = render_to_buffer(app, width, height);
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    /// Row index of the first line containing `needle`.
    pub fn find_row(lines: &[String], needle: &str) -> Option<usize> {
        lines.iter().position(|line| line.contains(needle))
    }
}
