//! Theme and color definitions for the TUI dashboard

use ratatui::style::{Color, Modifier, Style};

use crate::state::{Decision, Liquidity, Liveness};

/// Theme configuration for the dashboard
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border color (cyan)
    pub border: Color,
    /// Title color
    pub title: Color,
    /// Buy side / healthy color (green)
    pub buy: Color,
    /// Sell side / unhealthy color (red)
    pub sell: Color,
    /// Highlight/accent color (yellow)
    pub highlight: Color,
    /// Inactive/dim color
    pub inactive: Color,
    /// Normal text color
    pub text: Color,
    /// Log terminal text color
    pub log_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Cyan,
            title: Color::Cyan,
            buy: Color::Green,
            sell: Color::Red,
            highlight: Color::Yellow,
            inactive: Color::DarkGray,
            text: Color::White,
            log_text: Color::Green,
        }
    }
}

impl Theme {
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default().fg(self.highlight)
    }

    pub fn inactive_style(&self) -> Style {
        Style::default().fg(self.inactive)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn decision_style(&self, decision: &Decision) -> Style {
        let color = match decision {
            Decision::Buy => self.buy,
            Decision::Sell => self.sell,
            Decision::Hold | Decision::Other(_) => self.highlight,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn liquidity_style(&self, liquidity: &Liquidity) -> Style {
        let color = match liquidity {
            Liquidity::High => self.buy,
            Liquidity::Low => self.sell,
            Liquidity::Unknown | Liquidity::Other(_) => self.highlight,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn liveness_style(&self, liveness: Liveness) -> Style {
        let color = match liveness {
            Liveness::Active => self.buy,
            Liveness::Stale => self.sell,
            Liveness::Unknown => self.inactive,
        };
        Style::default().fg(color)
    }

    pub fn phase_style(&self, open: bool) -> Style {
        let color = if open { self.buy } else { self.sell };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);
