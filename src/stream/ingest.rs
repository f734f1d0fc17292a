//! Ingest loop: the single consumer of the frame queue.
//!
//! Frames are processed strictly in arrival order, one at a time, which is
//! what makes last-write-wins safe for every keyed slice. Decode and
//! routing never block on I/O; the only awaits are the store's lock.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::state::DashboardStore;
use crate::stream::envelope::{decode_frame, Channel, Envelope};

/// Route one decoded envelope to exactly one reducer.
///
/// Unknown channels are dropped silently: new channels on the feed must
/// not break older dashboards.
pub async fn route(store: &DashboardStore, envelope: Envelope) {
    match envelope.channel {
        Channel::Logs => store.apply_log(envelope.data).await,
        Channel::MarketStatus => store.apply_market_status(envelope.data).await,
        Channel::BrainStatus => store.apply_voting(envelope.data).await,
        Channel::Signals(_) => store.apply_signal(envelope.data).await,
        Channel::Unknown(name) => {
            debug!("Ignoring frame on unknown channel {name:?}");
        }
    }
}

/// Drain the frame queue into the store until the connector drops it
pub async fn run_ingest(store: DashboardStore, mut frames: mpsc::UnboundedReceiver<String>) {
    while let Some(frame) = frames.recv().await {
        match decode_frame(&frame) {
            Ok(envelope) => route(&store, envelope).await,
            Err(e) => {
                warn!("Dropping frame: {e}");
                store.record_decode_error().await;
            }
        }
    }

    debug!("Frame queue closed, ingest loop exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Liveness;

    #[tokio::test]
    async fn test_unknown_channel_leaves_state_untouched() {
        let store = DashboardStore::new();
        let envelope = decode_frame(r#"{"channel":"heartbeat","data":{"agent":"x"}}"#).unwrap();

        route(&store, envelope).await;

        let snapshot = store.snapshot().await;
        assert!(snapshot.logs.is_empty());
        assert!(snapshot.voting.is_empty());
        assert!(snapshot.agents.is_empty());
        assert_eq!(snapshot.diagnostics.shape_errors, 0);
    }

    #[tokio::test]
    async fn test_signal_routes_to_liveness() {
        let store = DashboardStore::new();
        let envelope =
            decode_frame(r#"{"channel":"signals:news","data":{"agent":"news_agent"}}"#).unwrap();

        route(&store, envelope).await;

        let agents = store.agent_liveness().await;
        let status = crate::state::evaluate(agents.get("news_agent"), chrono::Utc::now());
        assert_eq!(status, Liveness::Active);
    }
}
