//! Event ingestion: WebSocket connector, frame decoder, channel router.

pub mod connector;
pub mod envelope;
pub mod ingest;

pub use connector::{ConnectionPhase, FeedConnector};
pub use envelope::{decode_frame, Channel, Envelope};
pub use ingest::{route, run_ingest};
