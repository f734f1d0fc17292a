//! Frame decoding.
//!
//! Every frame on the feed is JSON text of the shape
//! `{"channel": "<name>", "data": <any>}`. On the structured channels the
//! `data` field sometimes arrives as a JSON string instead of a JSON value
//! (the relay forwards pub/sub payloads verbatim), so those are decoded a
//! second time. A frame that fails either decode is dropped whole.

use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;

/// Channel classification. Routing is exact match for the three named
/// channels and prefix match for signals; anything else is ignored rather
/// than rejected, so unknown channels stay forward compatible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    /// `logs`: live log terminal
    Logs,
    /// `market_status`: global market status replace
    MarketStatus,
    /// `brain_status`: per-pair voting upsert
    BrainStatus,
    /// `signals:<suffix>`: agent liveness touch
    Signals(String),
    /// Anything else; accepted but produces no state change
    Unknown(String),
}

impl Channel {
    pub fn classify(name: &str) -> Self {
        match name {
            "logs" => Channel::Logs,
            "market_status" => Channel::MarketStatus,
            "brain_status" => Channel::BrainStatus,
            _ => match name.strip_prefix("signals:") {
                Some(suffix) => Channel::Signals(suffix.to_string()),
                None => Channel::Unknown(name.to_string()),
            },
        }
    }

    /// Channels whose payload is a structured value (possibly arriving as
    /// an embedded JSON string). `logs` keeps string payloads verbatim.
    fn is_structured(&self) -> bool {
        matches!(
            self,
            Channel::MarketStatus | Channel::BrainStatus | Channel::Signals(_)
        )
    }
}

/// Decoded `(channel, payload)` pair, payload already normalized to a
/// structured value on the structured channels
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub channel: Channel,
    pub data: Value,
}

#[derive(Deserialize)]
struct RawFrame {
    channel: String,
    data: Value,
}

/// Decode one raw frame into an envelope.
///
/// Failures are all non-fatal to the pipeline: the caller drops the frame,
/// records the error, and moves on. There is no retry of a failed frame.
pub fn decode_frame(text: &str) -> Result<Envelope, DecodeError> {
    let frame: RawFrame = serde_json::from_str(text)
        .map_err(|e| DecodeError::MalformedFrame(e.to_string()))?;

    if frame.channel.is_empty() {
        return Err(DecodeError::EmptyChannel);
    }

    let channel = Channel::classify(&frame.channel);

    let data = match frame.data {
        Value::String(s) if channel.is_structured() => serde_json::from_str(&s).map_err(|e| {
            DecodeError::InvalidNestedPayload {
                channel: frame.channel,
                reason: e.to_string(),
            }
        })?,
        other => other,
    };

    Ok(Envelope { channel, data })
}
