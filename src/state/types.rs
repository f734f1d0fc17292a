//! Typed state slices projected from the event feed.
//!
//! Wire payloads are loosely structured, so every enum that crosses the wire
//! keeps an `Other` variant instead of failing on values we have not seen.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// One entry in the live log terminal.
///
/// The feed sends either a plain string or a structured record; both are
/// kept verbatim and only formatted at render time.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Text(String),
    Structured(Value),
}

impl From<Value> for LogEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => LogEntry::Text(s),
            other => LogEntry::Structured(other),
        }
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEntry::Text(s) => f.write_str(s),
            LogEntry::Structured(v) => f.write_str(&v.to_string()),
        }
    }
}

/// Market liquidity classification as reported by the session agent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(from = "String")]
pub enum Liquidity {
    High,
    Low,
    #[default]
    Unknown,
    Other(String),
}

impl From<String> for Liquidity {
    fn from(s: String) -> Self {
        match s.as_str() {
            "HIGH" => Liquidity::High,
            "LOW" => Liquidity::Low,
            "UNKNOWN" => Liquidity::Unknown,
            _ => Liquidity::Other(s),
        }
    }
}

impl std::fmt::Display for Liquidity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Liquidity::High => f.write_str("HIGH"),
            Liquidity::Low => f.write_str("LOW"),
            Liquidity::Unknown => f.write_str("UNKNOWN"),
            Liquidity::Other(s) => f.write_str(s),
        }
    }
}

/// Global market status. A single value with no history: each valid
/// `market_status` payload replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct MarketStatus {
    #[serde(default)]
    pub sessions: Vec<String>,
    #[serde(default)]
    pub liquidity: Liquidity,
}

/// Brain decision for an instrument pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(from = "String")]
pub enum Decision {
    Buy,
    Sell,
    #[default]
    Hold,
    Other(String),
}

impl From<String> for Decision {
    fn from(s: String) -> Self {
        match s.as_str() {
            "BUY" => Decision::Buy,
            "SELL" => Decision::Sell,
            "HOLD" => Decision::Hold,
            _ => Decision::Other(s),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Buy => f.write_str("BUY"),
            Decision::Sell => f.write_str("SELL"),
            Decision::Hold => f.write_str("HOLD"),
            Decision::Other(s) => f.write_str(s),
        }
    }
}

/// Latest voting round for one instrument pair.
///
/// `pair` is the table key and the only required field; everything else
/// defaults when the brain omits it. Vote powers are non-negative weights,
/// confidence is a percentage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VotingRecord {
    pub pair: String,
    #[serde(default)]
    pub buy: f64,
    #[serde(default)]
    pub sell: f64,
    #[serde(default)]
    pub decision: Decision,
    #[serde(default)]
    pub confidence: f64,
}

/// Last observed signal activity for one agent.
///
/// Presence of an entry means the agent has been seen at least once this
/// session; whether it still counts as active is derived on read, see
/// [`crate::state::liveness`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentLivenessEntry {
    pub last_seen: DateTime<Utc>,
}

/// Derived agent liveness classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// Never seen this session
    Unknown,
    /// Signal received within the staleness window
    Active,
    /// Last signal is older than the staleness window
    Stale,
}

impl std::fmt::Display for Liveness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Liveness::Unknown => f.write_str("unknown"),
            Liveness::Active => f.write_str("active"),
            Liveness::Stale => f.write_str("stale"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_market_status_defaults() {
        let status: MarketStatus = serde_json::from_value(json!({})).unwrap();
        assert!(status.sessions.is_empty());
        assert_eq!(status.liquidity, Liquidity::Unknown);
    }

    #[test]
    fn test_liquidity_passthrough() {
        let status: MarketStatus =
            serde_json::from_value(json!({"liquidity": "MODERATE"})).unwrap();
        assert_eq!(status.liquidity, Liquidity::Other("MODERATE".to_string()));
        assert_eq!(status.liquidity.to_string(), "MODERATE");
    }

    #[test]
    fn test_voting_record_requires_pair() {
        let missing = json!({"buy": 5.0, "sell": 2.0, "decision": "BUY"});
        assert!(serde_json::from_value::<VotingRecord>(missing).is_err());

        let record: VotingRecord = serde_json::from_value(json!({
            "pair": "EUR/USD", "buy": 5.0, "sell": 2.0,
            "decision": "BUY", "confidence": 71.4
        }))
        .unwrap();
        assert_eq!(record.pair, "EUR/USD");
        assert_eq!(record.decision, Decision::Buy);
        assert_eq!(record.confidence, 71.4);
    }

    #[test]
    fn test_voting_record_defaults_decision_to_hold() {
        let record: VotingRecord =
            serde_json::from_value(json!({"pair": "GBP/JPY"})).unwrap();
        assert_eq!(record.decision, Decision::Hold);
        assert_eq!(record.buy, 0.0);
        assert_eq!(record.sell, 0.0);
    }

    #[test]
    fn test_log_entry_display() {
        let text = LogEntry::from(json!("system online"));
        assert_eq!(text.to_string(), "system online");

        let structured = LogEntry::from(json!({"level": "INFO", "msg": "tick"}));
        assert!(structured.to_string().contains("\"level\""));
    }
}
