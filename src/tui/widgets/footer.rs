//! Footer status bar: pipeline diagnostics and key hints

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::TuiApp;
use crate::tui::theme::THEME;

/// Render the footer status bar
pub fn render_footer(f: &mut Frame, area: Rect, app: &TuiApp) {
    let diag = app.snapshot.diagnostics;

    let errors_style = if diag.decode_errors + diag.shape_errors > 0 {
        THEME.highlight_style()
    } else {
        THEME.inactive_style()
    };

    let line = Line::from(vec![
        Span::raw("  Frames: "),
        Span::styled(diag.frames_applied.to_string(), THEME.highlight_style()),
        Span::raw("  Decode errors: "),
        Span::styled(diag.decode_errors.to_string(), errors_style),
        Span::raw("  Shape errors: "),
        Span::styled(diag.shape_errors.to_string(), errors_style),
        Span::raw("    "),
        Span::styled("q quit  j/k scroll  g top  ? help", THEME.inactive_style()),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
