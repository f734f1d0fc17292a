//! Shared dashboard state.
//!
//! One writer (the ingest loop) folds payloads in through the reducer
//! methods; the presentation side reads cloned snapshots. The `RwLock`
//! keeps every read a consistent prior-or-current view, never a torn one.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::warn;

use crate::state::types::{
    AgentLivenessEntry, LogEntry, MarketStatus, VotingRecord,
};

/// Maximum number of log entries kept, oldest evicted first
pub const LOG_CAPACITY: usize = 100;

/// Non-fatal pipeline failure counters, shown in the diagnostics footer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Frames that reached a reducer
    pub frames_applied: u64,
    /// Frames dropped before routing (malformed JSON, empty channel,
    /// invalid nested payload)
    pub decode_errors: u64,
    /// Decoded payloads missing a required key for their reducer
    pub shape_errors: u64,
}

#[derive(Debug, Default)]
struct DashboardState {
    logs: VecDeque<LogEntry>,
    market: MarketStatus,
    voting: BTreeMap<String, VotingRecord>,
    agents: HashMap<String, AgentLivenessEntry>,
    diagnostics: Diagnostics,
}

/// Consistent point-in-time copy of all state slices for the read path
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    /// Newest first
    pub logs: Vec<LogEntry>,
    pub market: MarketStatus,
    pub voting: BTreeMap<String, VotingRecord>,
    pub agents: HashMap<String, AgentLivenessEntry>,
    pub diagnostics: Diagnostics,
}

/// Thread-safe owner of the four state slices.
///
/// Cheap to clone; all clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    inner: Arc<RwLock<DashboardState>>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log reducer: prepend, truncate to capacity. No deduplication,
    /// arrival order preserved.
    pub async fn apply_log(&self, data: Value) {
        let mut state = self.inner.write().await;
        state.diagnostics.frames_applied += 1;

        state.logs.push_front(LogEntry::from(data));
        state.logs.truncate(LOG_CAPACITY);
    }

    /// Market reducer: full replace, last write wins. Missing fields take
    /// the documented defaults (empty sessions, UNKNOWN liquidity); a
    /// payload that is not an object at all is a shape failure and leaves
    /// the previous value in place.
    pub async fn apply_market_status(&self, data: Value) {
        let mut state = self.inner.write().await;
        state.diagnostics.frames_applied += 1;

        match serde_json::from_value::<MarketStatus>(data) {
            Ok(status) => state.market = status,
            Err(e) => {
                warn!("Dropping market_status payload with invalid shape: {e}");
                state.diagnostics.shape_errors += 1;
            }
        }
    }

    /// Voting reducer: upsert by `pair`, other pairs untouched. A payload
    /// without `pair` is a no-op.
    pub async fn apply_voting(&self, data: Value) {
        let mut state = self.inner.write().await;
        state.diagnostics.frames_applied += 1;

        match serde_json::from_value::<VotingRecord>(data) {
            Ok(record) => {
                state.voting.insert(record.pair.clone(), record);
            }
            Err(e) => {
                warn!("Dropping brain_status payload without a valid pair: {e}");
                state.diagnostics.shape_errors += 1;
            }
        }
    }

    /// Liveness reducer: upsert `agent -> now`, overwriting any prior
    /// entry. A payload without a non-empty `agent` is a no-op.
    pub async fn apply_signal(&self, data: Value) {
        self.apply_signal_at(data, Utc::now()).await;
    }

    /// Same as [`apply_signal`](Self::apply_signal) with an explicit
    /// timestamp. Frames are processed in arrival order, so `last_seen`
    /// only ever advances.
    pub async fn apply_signal_at(&self, data: Value, now: DateTime<Utc>) {
        let mut state = self.inner.write().await;
        state.diagnostics.frames_applied += 1;

        let agent = data
            .get("agent")
            .and_then(Value::as_str)
            .filter(|a| !a.is_empty());

        match agent {
            Some(agent) => {
                state
                    .agents
                    .insert(agent.to_string(), AgentLivenessEntry { last_seen: now });
            }
            None => {
                warn!("Dropping signal payload without an agent id");
                state.diagnostics.shape_errors += 1;
            }
        }
    }

    /// Record a frame dropped before routing
    pub async fn record_decode_error(&self) {
        self.inner.write().await.diagnostics.decode_errors += 1;
    }

    /// Current log sequence, newest first
    pub async fn logs(&self) -> Vec<LogEntry> {
        self.inner.read().await.logs.iter().cloned().collect()
    }

    /// Current global market status
    pub async fn market_status(&self) -> MarketStatus {
        self.inner.read().await.market.clone()
    }

    /// Current voting table, keyed by instrument pair
    pub async fn voting(&self) -> BTreeMap<String, VotingRecord> {
        self.inner.read().await.voting.clone()
    }

    /// Current liveness table. Entries only record `last_seen`; derive
    /// active/stale with [`crate::state::liveness::evaluate`].
    pub async fn agent_liveness(&self) -> HashMap<String, AgentLivenessEntry> {
        self.inner.read().await.agents.clone()
    }

    pub async fn diagnostics(&self) -> Diagnostics {
        self.inner.read().await.diagnostics
    }

    /// One consistent snapshot of everything, for the display tick
    pub async fn snapshot(&self) -> DashboardSnapshot {
        let state = self.inner.read().await;
        DashboardSnapshot {
            logs: state.logs.iter().cloned().collect(),
            market: state.market.clone(),
            voting: state.voting.clone(),
            agents: state.agents.clone(),
            diagnostics: state.diagnostics,
        }
    }
}
