//! Market Status panel: active sessions and liquidity

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::TuiApp;
use crate::tui::theme::THEME;

/// Render the market status panel
pub fn render_market_status(f: &mut Frame, area: Rect, app: &TuiApp) {
    let market = &app.snapshot.market;

    let sessions_line = if market.sessions.is_empty() {
        Line::from(vec![
            Span::styled("Sessions: ", THEME.inactive_style()),
            Span::styled("-", THEME.inactive_style()),
        ])
    } else {
        let mut spans = vec![Span::styled("Sessions: ", THEME.inactive_style())];
        for (i, session) in market.sessions.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(session.clone(), THEME.highlight_style()));
        }
        Line::from(spans)
    };

    let liquidity_line = Line::from(vec![
        Span::styled("Liquidity: ", THEME.inactive_style()),
        Span::styled(
            market.liquidity.to_string(),
            THEME.liquidity_style(&market.liquidity),
        ),
    ]);

    let paragraph = Paragraph::new(vec![sessions_line, liquidity_line]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Market Status ")
            .title_style(THEME.title_style())
            .border_style(THEME.border_style()),
    );

    f.render_widget(paragraph, area);
}
