//! Slack integration: Socket Mode transport and the Web API client.
//!
//! The Socket Mode connection delivers event envelopes over a WebSocket; the
//! client acks every envelope and hands message events to the listener.
//! Replies leave through `chat.postMessage` with the bot token.

mod protocol;
mod socket;
mod web;

pub use protocol::{EnvelopeAck, EventsApiPayload, MessageEvent, SocketEnvelope};
pub use socket::SocketModeClient;
pub use web::{SlackError, SlackWebClient};
