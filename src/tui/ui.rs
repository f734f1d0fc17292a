//! Main UI rendering logic
//!
//! Orchestrates the layout and renders all widgets.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::TuiApp;
use crate::tui::theme::THEME;
use crate::tui::widgets;

/// Render the entire UI. `now` drives the derived liveness column.
pub fn render(f: &mut Frame, app: &TuiApp, now: DateTime<Utc>) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Panels
        Constraint::Length(1), // Footer status bar
    ])
    .split(f.area());

    widgets::render_header(f, chunks[0], app);
    render_panels(f, chunks[1], app, now);
    widgets::render_footer(f, chunks[2], app);

    if app.show_help {
        render_help_overlay(f);
    }
}

fn render_panels(f: &mut Frame, area: Rect, app: &TuiApp, now: DateTime<Utc>) {
    let columns = Layout::horizontal([
        Constraint::Percentage(28), // Market + agents
        Constraint::Percentage(37), // Voting
        Constraint::Percentage(35), // Logs
    ])
    .split(area);

    let left = Layout::vertical([
        Constraint::Length(4), // Market status
        Constraint::Min(6),    // Agents
    ])
    .split(columns[0]);

    widgets::render_market_status(f, left[0], app);
    widgets::render_agent_status(f, left[1], app, now);
    widgets::render_brain_voting(f, columns[1], app);
    widgets::render_live_logs(f, columns[2], app);
}

fn render_help_overlay(f: &mut Frame) {
    let area = centered_rect(40, 10, f.area());

    let lines = vec![
        Line::from("q / Esc / Ctrl-C  quit"),
        Line::from("j / Down          scroll logs down"),
        Line::from("k / Up            scroll logs up"),
        Line::from("g                 newest log entry"),
        Line::from("?                 toggle this help"),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .title_style(THEME.title_style())
            .border_style(THEME.border_style()),
    );

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
