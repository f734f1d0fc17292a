use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub feed: FeedConfig,
    #[serde(default)]
    pub reconnect: ReconnectConfig,
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// WebSocket endpoint of the dashboard event feed
    pub ws_url: String,
    /// Connection establishment timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
}

fn default_connect_timeout() -> u64 {
    10_000
}

/// Reconnect delay policy.
///
/// The connector always retries; only the delay between attempts is
/// configurable. Delay grows linearly with the attempt count and is capped
/// at `max_delay_ms`, resetting after a session that opened successfully.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconnectConfig {
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

fn default_initial_delay() -> u64 {
    1_000
}

fn default_max_delay() -> u64 {
    60_000
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

/// Static agent registry used by the display to enumerate rows.
///
/// The liveness table itself is keyed by whatever agent ids arrive on the
/// wire; this list only fixes the order and set of rows shown.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentsConfig {
    #[serde(default = "default_registry")]
    pub registry: Vec<String>,
}

fn default_registry() -> Vec<String> {
    [
        "finnhub_agent",
        "alpha_vantage_agent",
        "vision_agent",
        "technical_agent",
        "sentiment_agent",
        "execution_agent",
        "risk_agent",
        "session_agent",
        "news_agent",
        "social_agent",
        "correlation_agent",
        "volatility_agent",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            registry: default_registry(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("feed.ws_url", "ws://localhost:8000/ws")?
            .set_default("feed.connect_timeout_ms", 10_000i64)?
            .set_default("logging.level", "info")?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("OPSDECK_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (OPSDECK_FEED__WS_URL, etc.)
            .add_source(
                Environment::with_prefix("OPSDECK")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.feed.ws_url.is_empty() {
            errors.push("feed.ws_url must not be empty".to_string());
        } else if url::Url::parse(&self.feed.ws_url).is_err() {
            errors.push(format!("feed.ws_url is not a valid URL: {}", self.feed.ws_url));
        }

        if self.reconnect.initial_delay_ms == 0 {
            errors.push("reconnect.initial_delay_ms must be positive".to_string());
        }

        if self.reconnect.max_delay_ms < self.reconnect.initial_delay_ms {
            errors.push("reconnect.max_delay_ms must be >= initial_delay_ms".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
