//! Header bar: title plus feed connection phase indicator

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::stream::ConnectionPhase;
use crate::tui::app::TuiApp;
use crate::tui::theme::THEME;

/// Render the header bar
pub fn render_header(f: &mut Frame, area: Rect, app: &TuiApp) {
    let open = app.phase == ConnectionPhase::Open;
    let indicator = if open { "●" } else { "○" };

    let line = Line::from(vec![
        Span::styled(" OPSDECK ", THEME.title_style()),
        Span::styled("Command Center", THEME.text_style()),
        Span::raw("    "),
        Span::styled(indicator, THEME.phase_style(open)),
        Span::raw(" "),
        Span::styled(app.phase.to_string(), THEME.phase_style(open)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(THEME.border_style()),
    );

    f.render_widget(paragraph, area);
}
