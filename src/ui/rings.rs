//! Metric panels: a text counter above a ring chart for each metric.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::data::{Metric, RingChart};
use crate::ui::Theme;

/// Outer radius of a ring in canvas units.
const RING_RADIUS: f64 = 1.0;
/// Inner radius as a fraction of the outer one (the ring's cutout).
const RING_CUTOUT: f64 = 0.7;
/// Canvas margin around the ring.
const RING_MARGIN: f64 = 1.15;

/// Render the three metric panels side by side.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    for (metric, column) in Metric::ALL.into_iter().zip(columns.iter()) {
        render_panel(frame, app, metric, *column);
    }
}

fn render_panel(frame: &mut Frame, app: &App, metric: Metric, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", metric.label()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(inner);

    let counter = Paragraph::new(app.dashboard.counter_text(metric).to_string())
        .alignment(Alignment::Center)
        .style(app.theme.header.add_modifier(Modifier::BOLD));
    frame.render_widget(counter, rows[0]);

    render_ring(frame, &app.theme, app.dashboard.chart(metric), rows[1]);
}

/// Draw one ring. A zero value is drawn in the empty color.
fn render_ring(frame: &mut Frame, theme: &Theme, chart: &RingChart, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    // Terminal cells are about twice as tall as they are wide
    let aspect = area.width as f64 / (area.height as f64 * 2.0);
    let y_bound = RING_RADIUS * RING_MARGIN;
    let x_bound = y_bound * aspect.max(1.0);

    let color = theme.ring_color(chart.value());
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_bound, x_bound])
        .y_bounds([-y_bound, y_bound])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: RING_RADIUS,
                color,
            });
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: RING_RADIUS * RING_CUTOUT,
                color,
            });
        });

    frame.render_widget(canvas, area);
}
