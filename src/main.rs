use anyhow::anyhow;
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use opsdeck::config::AppConfig;
use opsdeck::state::DashboardStore;
use opsdeck::stream::{run_ingest, ConnectionPhase, FeedConnector};
use opsdeck::tui::run_tui;

#[derive(Parser)]
#[command(name = "opsdeck", about = "Terminal command center for the trading platform")]
struct Cli {
    /// Directory holding default.toml and environment overrides
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Override the feed WebSocket URL from the config
    #[arg(long, env = "OPSDECK_WS_URL")]
    ws_url: Option<String>,

    /// Render the dashboard with canned data, no connection
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config_dir)?;
    if let Some(ws_url) = cli.ws_url {
        config.feed.ws_url = ws_url;
    }
    config
        .validate()
        .map_err(|errors| anyhow!("Invalid configuration:\n  {}", errors.join("\n  ")))?;

    init_logging(&config.logging.level);

    let store = DashboardStore::new();

    if cli.demo {
        seed_demo_data(&store).await;
        let (_phase_tx, phase_rx) = watch::channel(ConnectionPhase::Open);
        run_tui(store, phase_rx, config.agents.registry).await?;
        return Ok(());
    }

    let (connector, frames) = FeedConnector::new(&config.feed, config.reconnect.clone())?;
    let phase_rx = connector.phase();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let connector_task = tokio::spawn(async move { connector.run(shutdown_rx).await });
    let ingest_task = tokio::spawn(run_ingest(store.clone(), frames));

    run_tui(store, phase_rx, config.agents.registry.clone()).await?;

    // Teardown: close the connection, stop reconnecting, and drop any
    // frames still in flight instead of processing them
    let _ = shutdown_tx.send(true);
    let _ = connector_task.await;
    ingest_task.abort();

    Ok(())
}

/// Set up tracing. The TUI owns the terminal, so logs go to a rolling
/// file only; with no writable log directory, tracing stays disabled
/// rather than corrupting the display.
fn init_logging(level: &str) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},opsdeck=debug")));

    let log_dir = std::env::var("OPSDECK_LOG_DIR")
        .or_else(|_| std::env::var("LOG_DIR"))
        .unwrap_or_else(|_| "/tmp/opsdeck".to_string());

    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    // `tracing_appender::rolling::daily` panics if it cannot create the
    // initial log file, so preflight writability first.
    let test_path = std::path::Path::new(&log_dir).join(".opsdeck_write_test");
    let writable = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&test_path)
        .is_ok();
    if !writable {
        return;
    }
    let _ = std::fs::remove_file(&test_path);

    let file_appender = tracing_appender::rolling::daily(&log_dir, "opsdeck.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the guard alive for the lifetime of the process
    Box::leak(Box::new(guard));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

/// Fill the store with representative data for `--demo`
async fn seed_demo_data(store: &DashboardStore) {
    use serde_json::json;

    store
        .apply_market_status(json!({"sessions": ["LONDON", "NEW_YORK"], "liquidity": "HIGH"}))
        .await;

    store
        .apply_voting(json!({
            "pair": "EUR/USD", "buy": 5.0, "sell": 2.0,
            "decision": "BUY", "confidence": 71.4
        }))
        .await;
    store
        .apply_voting(json!({
            "pair": "GBP/JPY", "buy": 1.5, "sell": 4.5,
            "decision": "SELL", "confidence": 64.0
        }))
        .await;
    store
        .apply_voting(json!({
            "pair": "USD/CHF", "buy": 3.0, "sell": 3.0,
            "decision": "HOLD", "confidence": 38.2
        }))
        .await;

    for agent in ["sentiment_agent", "technical_agent", "news_agent", "risk_agent"] {
        store.apply_signal(json!({"agent": agent})).await;
    }

    for i in 0..20 {
        store
            .apply_log(json!(format!("[INFO] demo pipeline tick {i}")))
            .await;
    }
}
