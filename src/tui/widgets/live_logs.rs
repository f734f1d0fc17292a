//! Live Terminal panel: the log ring buffer, newest first

use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::tui::app::TuiApp;
use crate::tui::theme::THEME;

/// Render the live log panel
pub fn render_live_logs(f: &mut Frame, area: Rect, app: &TuiApp) {
    let title = format!(" Live Terminal ({}) ", app.snapshot.logs.len());

    let items: Vec<ListItem> = app
        .snapshot
        .logs
        .iter()
        .skip(app.log_scroll_offset)
        .map(|entry| {
            ListItem::new(Line::styled(
                entry.to_string(),
                Style::default().fg(THEME.log_text),
            ))
        })
        .collect();

    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Line::styled(
            "Waiting for logs...",
            THEME.inactive_style(),
        ))])
    } else {
        List::new(items)
    };

    let list = list.block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(THEME.title_style())
            .border_style(THEME.border_style()),
    );

    f.render_widget(list, area);
}
