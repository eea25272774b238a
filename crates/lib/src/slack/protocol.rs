//! Slack Socket Mode wire types (envelopes, acks, event payloads).

use serde::{Deserialize, Serialize};

/// One inbound Socket Mode frame:
/// `{ "type", "envelope_id"?, "payload"?, "reason"? }`.
///
/// `hello` and `disconnect` frames carry no envelope id; everything else does
/// and must be acked with it.
#[derive(Debug, Clone, Deserialize)]
pub struct SocketEnvelope {
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(default)]
    pub envelope_id: Option<String>,
    #[serde(default)]
    pub payload: serde_json::Value,
    /// Set on `disconnect` frames ("refresh_requested", "link_disabled", ...).
    #[serde(default)]
    pub reason: Option<String>,
}

/// Acknowledgement sent back for every envelope: `{ "envelope_id" }`.
#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeAck {
    pub envelope_id: String,
}

impl EnvelopeAck {
    pub fn new(envelope_id: impl Into<String>) -> Self {
        Self {
            envelope_id: envelope_id.into(),
        }
    }
}

/// Payload of an `events_api` envelope: `{ "type": "event_callback", "event" }`.
/// Only the inner event matters here; the rest of the callback wrapper
/// (team id, api app id, auth list) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsApiPayload {
    #[serde(default)]
    pub event: Option<MessageEvent>,
}

/// A message-style event. Every field is optional on the wire: subtypes such
/// as `message_changed` or `message_deleted` omit `user` or `text`, and those
/// are skipped by the listener rather than rejected at parse time.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageEvent {
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Present when the message was authored by a bot (including this one).
    #[serde(default)]
    pub bot_id: Option<String>,
}
