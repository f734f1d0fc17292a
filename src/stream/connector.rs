//! Feed connector.
//!
//! Owns the single persistent WebSocket connection to the platform's event
//! feed: at most one active connection, frames forwarded in arrival order,
//! unconditional reconnect on any drop. The current connection phase is
//! published through a `watch` channel for the header indicator; shutdown
//! closes the active connection and suppresses further reconnects.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info};
use url::Url;

use crate::config::{FeedConfig, ReconnectConfig};
use crate::error::{OpsdeckError, Result};

const PING_INTERVAL_SECS: u64 = 30;
const MAX_DELAY_STEPS: u32 = 10;

/// Observable lifecycle of the feed connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionPhase {
    #[default]
    Uninstantiated,
    Connecting,
    Open,
    Closing,
    Closed,
}

impl std::fmt::Display for ConnectionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionPhase::Uninstantiated => f.write_str("Uninstantiated"),
            ConnectionPhase::Connecting => f.write_str("Connecting"),
            ConnectionPhase::Open => f.write_str("Open"),
            ConnectionPhase::Closing => f.write_str("Closing"),
            ConnectionPhase::Closed => f.write_str("Closed"),
        }
    }
}

/// How one connected session ended
enum SessionEnd {
    /// Local teardown requested; do not reconnect
    Shutdown,
    /// Server closed or the stream ended; reconnect
    Remote,
}

/// WebSocket client for the dashboard event feed
pub struct FeedConnector {
    url: Url,
    connect_timeout: Duration,
    reconnect: ReconnectConfig,
    phase_tx: watch::Sender<ConnectionPhase>,
    frame_tx: mpsc::UnboundedSender<String>,
}

impl FeedConnector {
    /// Create a connector. Returns the receiving end of the frame queue;
    /// frames arrive there in wire order.
    pub fn new(
        feed: &FeedConfig,
        reconnect: ReconnectConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<String>)> {
        let url = Url::parse(&feed.ws_url)?;
        let (phase_tx, _) = watch::channel(ConnectionPhase::Uninstantiated);
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();

        Ok((
            Self {
                url,
                connect_timeout: Duration::from_millis(feed.connect_timeout_ms),
                reconnect,
                phase_tx,
                frame_tx,
            },
            frame_rx,
        ))
    }

    /// Subscribe to connection phase changes
    pub fn phase(&self) -> watch::Receiver<ConnectionPhase> {
        self.phase_tx.subscribe()
    }

    /// Run the connection with auto-reconnect until `shutdown` flips true.
    ///
    /// Retries are unconditional and unbounded; only the delay between
    /// attempts is policy (grows linearly per failed attempt, capped at
    /// `max_delay_ms`, reset after a session that opened successfully).
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let mut attempt: u32 = 0;
        let max_delay = Duration::from_millis(self.reconnect.max_delay_ms);

        info!("Starting feed connector for {}", self.url);

        loop {
            if *shutdown.borrow() {
                break;
            }

            match self.connect_and_stream(&mut shutdown).await {
                Ok(SessionEnd::Shutdown) => {
                    self.phase_tx.send_replace(ConnectionPhase::Closed);
                    break;
                }
                Ok(SessionEnd::Remote) => {
                    info!("Feed connection closed by remote");
                    attempt = 0;
                }
                Err(e) => {
                    attempt += 1;
                    error!("Feed connection error (attempt {attempt}): {e}");
                }
            }

            self.phase_tx.send_replace(ConnectionPhase::Closed);

            let delay = Duration::from_millis(self.reconnect.initial_delay_ms)
                * attempt.min(MAX_DELAY_STEPS);
            let delay = delay.min(max_delay);

            info!("Reconnecting in {delay:?}...");
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Feed connector stopped");
        Ok(())
    }

    /// One connected session: connect, then pump frames until the stream
    /// ends or teardown is requested.
    async fn connect_and_stream(
        &self,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<SessionEnd> {
        self.phase_tx.send_replace(ConnectionPhase::Connecting);

        let (ws_stream, _) =
            tokio::time::timeout(self.connect_timeout, connect_async(&self.url))
                .await
                .map_err(|_| OpsdeckError::ConnectTimeout(self.url.to_string()))?
                .map_err(OpsdeckError::WebSocket)?;

        info!("Connected to feed at {}", self.url);
        self.phase_tx.send_replace(ConnectionPhase::Open);

        let (mut write, mut read) = ws_stream.split();
        let mut ping_interval = tokio::time::interval(Duration::from_secs(PING_INTERVAL_SECS));

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            if self.frame_tx.send(text).is_err() {
                                // Consumer gone; in-flight frames are dropped
                                self.phase_tx.send_replace(ConnectionPhase::Closing);
                                let _ = write.send(Message::Close(None)).await;
                                return Ok(SessionEnd::Shutdown);
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if let Err(e) = write.send(Message::Pong(data)).await {
                                error!("Failed to send pong: {e}");
                            }
                        }
                        Some(Ok(Message::Close(_))) => {
                            info!("Received close frame");
                            return Ok(SessionEnd::Remote);
                        }
                        Some(Err(e)) => {
                            return Err(OpsdeckError::WebSocket(e));
                        }
                        None => {
                            info!("Feed stream ended");
                            return Ok(SessionEnd::Remote);
                        }
                        _ => {}
                    }
                }
                _ = ping_interval.tick() => {
                    if let Err(e) = write.send(Message::Ping(vec![])).await {
                        error!("Failed to send ping: {e}");
                        return Ok(SessionEnd::Remote);
                    }
                    debug!("Sent ping");
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        self.phase_tx.send_replace(ConnectionPhase::Closing);
                        let _ = write.send(Message::Close(None)).await;
                        return Ok(SessionEnd::Shutdown);
                    }
                }
            }
        }
    }
}
