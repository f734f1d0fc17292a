//! TUI application state.
//!
//! Holds the latest store snapshot plus display-only state (scroll,
//! overlays). Liveness is never kept here: it is derived from the stored
//! timestamps on every render pass.

use chrono::{DateTime, Utc};

use crate::state::{evaluate, DashboardSnapshot, Liveness};
use crate::stream::ConnectionPhase;

/// One row of the agent panel, derived at render time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRow {
    pub name: String,
    pub liveness: Liveness,
    pub last_seen: Option<DateTime<Utc>>,
}

/// TUI application state
pub struct TuiApp {
    /// Latest consistent snapshot of all state slices
    pub snapshot: DashboardSnapshot,
    /// Current feed connection phase
    pub phase: ConnectionPhase,
    /// Display ordering of known agents; ids seen on the wire but not
    /// listed here are appended after it
    pub registry: Vec<String>,
    /// Scroll offset into the log list
    pub log_scroll_offset: usize,
    /// Show help overlay
    pub show_help: bool,
    /// Is the app running
    pub running: bool,
    /// Last snapshot refresh
    pub last_update: DateTime<Utc>,
}

impl TuiApp {
    pub fn new(registry: Vec<String>) -> Self {
        Self {
            snapshot: DashboardSnapshot::default(),
            phase: ConnectionPhase::Uninstantiated,
            registry,
            log_scroll_offset: 0,
            show_help: false,
            running: true,
            last_update: Utc::now(),
        }
    }

    /// Check if app should continue running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Signal the app to quit
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Replace the displayed snapshot; called on every tick
    pub fn refresh(&mut self, snapshot: DashboardSnapshot, phase: ConnectionPhase) {
        self.snapshot = snapshot;
        self.phase = phase;
        self.last_update = Utc::now();
    }

    /// Agent rows in registry order, each with its liveness derived
    /// against `now`. Agents that signalled but are not in the registry
    /// are appended in name order.
    pub fn agent_rows(&self, now: DateTime<Utc>) -> Vec<AgentRow> {
        let mut rows: Vec<AgentRow> = self
            .registry
            .iter()
            .map(|name| {
                let entry = self.snapshot.agents.get(name);
                AgentRow {
                    name: name.clone(),
                    liveness: evaluate(entry, now),
                    last_seen: entry.map(|e| e.last_seen),
                }
            })
            .collect();

        let mut extras: Vec<&String> = self
            .snapshot
            .agents
            .keys()
            .filter(|name| !self.registry.contains(name))
            .collect();
        extras.sort();

        for name in extras {
            let entry = self.snapshot.agents.get(name);
            rows.push(AgentRow {
                name: name.clone(),
                liveness: evaluate(entry, now),
                last_seen: entry.map(|e| e.last_seen),
            });
        }

        rows
    }

    /// Scroll logs up (toward newer entries)
    pub fn scroll_up(&mut self) {
        self.log_scroll_offset = self.log_scroll_offset.saturating_sub(1);
    }

    /// Scroll logs down (toward older entries)
    pub fn scroll_down(&mut self) {
        if self.log_scroll_offset < self.snapshot.logs.len().saturating_sub(1) {
            self.log_scroll_offset += 1;
        }
    }

    /// Reset scroll to the newest entry
    pub fn scroll_to_top(&mut self) {
        self.log_scroll_offset = 0;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AgentLivenessEntry, DashboardStore};
    use serde_json::json;

    fn registry() -> Vec<String> {
        vec!["sentiment_agent".to_string(), "news_agent".to_string()]
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let store = DashboardStore::new();
        store.apply_log(json!("boot")).await;

        let mut app = TuiApp::new(registry());
        assert!(app.snapshot.logs.is_empty());

        app.refresh(store.snapshot().await, ConnectionPhase::Open);
        assert_eq!(app.snapshot.logs.len(), 1);
        assert_eq!(app.phase, ConnectionPhase::Open);
    }

    #[test]
    fn test_agent_rows_follow_registry_order() {
        let mut app = TuiApp::new(registry());
        let now = Utc::now();
        app.snapshot
            .agents
            .insert("news_agent".to_string(), AgentLivenessEntry { last_seen: now });
        // Wire-only agent, not in the registry
        app.snapshot.agents.insert(
            "calendar_agent".to_string(),
            AgentLivenessEntry { last_seen: now },
        );

        let rows = app.agent_rows(now);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "sentiment_agent");
        assert_eq!(rows[0].liveness, Liveness::Unknown);
        assert_eq!(rows[1].name, "news_agent");
        assert_eq!(rows[1].liveness, Liveness::Active);
        assert_eq!(rows[2].name, "calendar_agent");
    }

    #[test]
    fn test_liveness_rederived_per_call() {
        let mut app = TuiApp::new(registry());
        let seen = Utc::now();
        app.snapshot.agents.insert(
            "sentiment_agent".to_string(),
            AgentLivenessEntry { last_seen: seen },
        );

        let rows = app.agent_rows(seen + chrono::Duration::milliseconds(59_999));
        assert_eq!(rows[0].liveness, Liveness::Active);

        // Same snapshot, later clock: the classification flips with no
        // new event
        let rows = app.agent_rows(seen + chrono::Duration::milliseconds(60_001));
        assert_eq!(rows[0].liveness, Liveness::Stale);
    }

    #[test]
    fn test_scroll_bounds() {
        let mut app = TuiApp::new(registry());
        app.scroll_down();
        assert_eq!(app.log_scroll_offset, 0); // No logs

        app.snapshot.logs = vec![
            crate::state::LogEntry::Text("a".to_string()),
            crate::state::LogEntry::Text("b".to_string()),
        ];
        app.scroll_down();
        assert_eq!(app.log_scroll_offset, 1);
        app.scroll_down();
        assert_eq!(app.log_scroll_offset, 1);
        app.scroll_up();
        assert_eq!(app.log_scroll_offset, 0);
    }
}
