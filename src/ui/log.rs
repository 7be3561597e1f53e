//! Event log rendering, newest entry first.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::app::App;

/// Render the event log, starting at the app's scroll offset.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let entries = app.dashboard.events();

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .skip(app.log_offset)
        .map(|(i, entry)| {
            let item = ListItem::new(format!(" {}", entry));
            if i == 0 {
                item.style(app.theme.newest)
            } else {
                item
            }
        })
        .collect();

    let position_info = if entries.is_empty() {
        String::new()
    } else {
        format!(" [{}/{}]", app.log_offset + 1, entries.len())
    };
    let title = format!(" Recent events ({}){} ", entries.len(), position_info);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if items.is_empty() {
        let empty = List::new([ListItem::new(" No events")])
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    frame.render_widget(List::new(items).block(block), area);
}
