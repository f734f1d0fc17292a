use thiserror::Error;

/// Main error type for the dashboard
#[derive(Error, Debug)]
pub enum OpsdeckError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ConfigValidation(String),

    // Network errors
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Invalid feed URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Connection timeout: {0}")]
    ConnectTimeout(String),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for OpsdeckError
pub type Result<T> = std::result::Result<T, OpsdeckError>;

/// Non-fatal frame decode failures.
///
/// None of these stop the pipeline: the offending frame is dropped and the
/// next one is processed. They are counted in the store for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Frame has an empty channel")]
    EmptyChannel,

    #[error("Invalid nested payload on channel {channel}: {reason}")]
    InvalidNestedPayload { channel: String, reason: String },
}
