//! State aggregation: four independent slices folded from the event feed
//! plus the derived-on-read liveness classification.

pub mod liveness;
pub mod store;
pub mod types;

pub use liveness::{evaluate, STALENESS_WINDOW_MS};
pub use store::{DashboardSnapshot, DashboardStore, Diagnostics, LOG_CAPACITY};
pub use types::{
    AgentLivenessEntry, Decision, Liquidity, Liveness, LogEntry, MarketStatus, VotingRecord,
};
