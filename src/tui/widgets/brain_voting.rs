//! Brain Decision Engine panel.
//!
//! One block per instrument pair: decision badge with confidence, then a
//! buy/sell power bar with the decision threshold markers overlaid.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::VotingRecord;
use crate::tui::app::TuiApp;
use crate::tui::theme::THEME;

/// Buy decision marker position on the power bar (percent)
const BUY_THRESHOLD_PCT: f64 = 75.0;
/// Sell decision marker position on the power bar (percent)
const SELL_THRESHOLD_PCT: f64 = 25.0;

/// Render the voting panel
pub fn render_brain_voting(f: &mut Frame, area: Rect, app: &TuiApp) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Brain Decision Engine ")
        .title_style(THEME.title_style())
        .border_style(THEME.border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.snapshot.voting.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No active voting sessions",
            THEME.inactive_style(),
        )));
        f.render_widget(empty, inner);
        return;
    }

    let mut lines = Vec::new();
    let bar_width = inner.width.saturating_sub(2) as usize;

    for record in app.snapshot.voting.values() {
        // Each pair takes three rows plus a spacer; stop once the panel
        // is full
        if lines.len() + 3 > inner.height as usize {
            break;
        }

        lines.push(title_line(record));
        lines.push(power_bar(record, bar_width));
        lines.push(Line::from(vec![
            Span::styled(format!("BUY {:.1}", record.buy), Style::default().fg(THEME.buy)),
            Span::raw("  "),
            Span::styled(
                format!("SELL {:.1}", record.sell),
                Style::default().fg(THEME.sell),
            ),
        ]));
        lines.push(Line::default());
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn title_line(record: &VotingRecord) -> Line<'static> {
    Line::from(vec![
        Span::styled(record.pair.clone(), THEME.title_style()),
        Span::raw("  "),
        Span::styled(
            format!("{} ({:.1}%)", record.decision, record.confidence),
            THEME.decision_style(&record.decision),
        ),
    ])
}

/// Buy power fills from the left, sell power follows, the remainder is
/// dim. Threshold markers at 75% and 25% overlay whatever cell they land
/// on.
fn power_bar(record: &VotingRecord, width: usize) -> Line<'static> {
    if width == 0 {
        return Line::default();
    }

    let total = record.buy + record.sell;
    let buy_cells = if total > 0.0 {
        ((record.buy / total) * width as f64).round() as usize
    } else {
        0
    };
    let sell_cells = if total > 0.0 {
        width.saturating_sub(buy_cells)
    } else {
        0
    };

    let buy_marker = ((BUY_THRESHOLD_PCT / 100.0) * width as f64) as usize;
    let sell_marker = ((SELL_THRESHOLD_PCT / 100.0) * width as f64) as usize;

    let spans: Vec<Span> = (0..width)
        .map(|i| {
            if i == buy_marker || i == sell_marker {
                return Span::styled("|", THEME.text_style());
            }
            if i < buy_cells {
                Span::styled("█", Style::default().fg(THEME.buy))
            } else if i < buy_cells + sell_cells {
                Span::styled("█", Style::default().fg(THEME.sell))
            } else {
                Span::styled("░", THEME.inactive_style())
            }
        })
        .collect();

    Line::from(spans)
}
