//! TUI Widget components
//!
//! Modular widgets for the dashboard display.

pub mod agent_status;
pub mod brain_voting;
pub mod footer;
pub mod header;
pub mod live_logs;
pub mod market_status;

pub use agent_status::render_agent_status;
pub use brain_voting::render_brain_voting;
pub use footer::render_footer;
pub use header::render_header;
pub use live_logs::render_live_logs;
pub use market_status::render_market_status;
