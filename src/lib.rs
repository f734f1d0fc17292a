pub mod config;
pub mod error;
pub mod state;
pub mod stream;
pub mod tui;

pub use config::AppConfig;
pub use error::{DecodeError, OpsdeckError, Result};
pub use state::{
    evaluate, AgentLivenessEntry, DashboardSnapshot, DashboardStore, Decision, Diagnostics,
    Liquidity, Liveness, LogEntry, MarketStatus, VotingRecord, LOG_CAPACITY, STALENESS_WINDOW_MS,
};
pub use stream::{decode_frame, run_ingest, Channel, ConnectionPhase, Envelope, FeedConnector};
pub use tui::{run_tui, TuiApp};
