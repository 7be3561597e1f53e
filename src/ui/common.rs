//! Common UI components.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, LinkStatus};
use crate::data::duration::format_age;
use crate::data::Metric;

/// Render the header bar with link status and the latest totals.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.link_status();
    let status_style = app.theme.link_style(status);

    let mut spans = vec![
        Span::styled(" ● ", status_style),
        Span::styled("DROWSY DASH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(status.label(), status_style),
    ];

    if app.dashboard.stats().is_some() {
        for metric in Metric::ALL {
            spans.push(Span::raw(" │ "));
            spans.push(Span::raw(format!("{} ", metric.label())));
            spans.push(Span::styled(
                app.dashboard.counter_text(metric).to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = "↑↓:scroll e:export ?:help q:quit";

    let status = if let Some(ref err) = app.load_error {
        format!(" {} | Error: {} | {}", app.source_description(), err, controls)
    } else if let LinkStatus::Disconnected = app.link_status() {
        format!(" {} | {} | {}", app.source_description(), app.connection, controls)
    } else if let Some(at) = app.last_update {
        format!(
            " {} | Updated {} ago | {}",
            app.source_description(),
            format_age(at.elapsed()),
            controls
        )
    } else {
        format!(" {} | Waiting for data... | {}", app.source_description(), controls)
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Event log",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ k/j     Scroll one entry"),
        Line::from("  PgUp/PgDn   Scroll 10 entries"),
        Line::from("  Home/g      Newest entry"),
        Line::from("  End/G       Oldest entry"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Poll source now"),
        Line::from("  e         Export to JSON"),
        Line::from("  q/Esc     Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 17u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::app::App;
    use crate::data::StatsSnapshot;
    use crate::source::{ChannelSource, Message};
    use crate::ui::testing::{find_row, render_to_lines};

    #[test]
    fn test_header_shows_waiting_then_live() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), Duration::from_secs(60));

        let lines = render_to_lines(&app, 100, 30);
        assert!(lines[0].contains("WAITING"));
        assert!(lines[29].contains("Waiting for data"));

        tx.send(Message::Stats(StatsSnapshot {
            yawns_total: 3,
            eye_closures_total: 1,
            alerts_total: 0,
        }))
        .unwrap();
        app.reload_data();

        let lines = render_to_lines(&app, 100, 30);
        assert!(lines[0].contains("LIVE"));
        assert!(lines[0].contains("Yawns 3"));
        assert!(lines[0].contains("Eye closures 1"));
        assert!(lines[0].contains("Alerts 0"));
        assert!(lines[29].contains("Updated"));
    }

    #[test]
    fn test_header_shows_disconnected() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), Duration::from_secs(60));
        drop(tx);
        app.reload_data();

        let lines = render_to_lines(&app, 100, 30);
        assert!(lines[0].contains("DISCONNECTED"));
        assert!(find_row(&lines, "Sender dropped").is_some());
    }
}
