//! System Agents panel: one row per registered agent with its derived
//! liveness

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::state::Liveness;
use crate::tui::app::TuiApp;
use crate::tui::theme::THEME;

/// Render the agent liveness panel. `now` is the render-tick clock the
/// liveness classification is derived against.
pub fn render_agent_status(f: &mut Frame, area: Rect, app: &TuiApp, now: DateTime<Utc>) {
    let header = Row::new(
        ["Agent", "Status", "Last Seen"]
            .iter()
            .map(|h| Cell::from(*h).style(THEME.title_style())),
    )
    .height(1);

    let rows = app.agent_rows(now).into_iter().map(|row| {
        let dot = match row.liveness {
            Liveness::Active => "●",
            Liveness::Stale => "●",
            Liveness::Unknown => "○",
        };
        let status = format!("{dot} {}", row.liveness);
        let last_seen = row
            .last_seen
            .map(|ts| format_age(now, ts))
            .unwrap_or_else(|| "-".to_string());

        Row::new(vec![
            Cell::from(display_name(&row.name)).style(THEME.text_style()),
            Cell::from(status).style(THEME.liveness_style(row.liveness)),
            Cell::from(last_seen).style(THEME.inactive_style()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(14),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" System Agents ")
            .title_style(THEME.title_style())
            .border_style(THEME.border_style()),
    );

    f.render_widget(table, area);
}

/// "sentiment_agent" reads as "sentiment" in the panel
fn display_name(agent_id: &str) -> String {
    agent_id
        .strip_suffix("_agent")
        .unwrap_or(agent_id)
        .replace('_', " ")
}

fn format_age(now: DateTime<Utc>, ts: DateTime<Utc>) -> String {
    let secs = (now - ts).num_seconds().max(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("sentiment_agent"), "sentiment");
        assert_eq!(display_name("alpha_vantage_agent"), "alpha vantage");
        assert_eq!(display_name("brain"), "brain");
    }

    #[test]
    fn test_format_age() {
        let now = Utc::now();
        assert_eq!(format_age(now, now - chrono::Duration::seconds(5)), "5s ago");
        assert_eq!(format_age(now, now - chrono::Duration::seconds(130)), "2m ago");
        assert_eq!(format_age(now, now - chrono::Duration::hours(3)), "3h ago");
    }
}
