//! Slack Socket Mode client: open a WebSocket, ack envelopes, dispatch events.

use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::listener::MessageListener;
use crate::slack::protocol::{EnvelopeAck, EventsApiPayload, SocketEnvelope};
use crate::slack::web::{DEFAULT_API_BASE, SlackError};

/// Pause before retrying after a transport error. Server-initiated
/// disconnects reconnect immediately (Slack refreshes connections routinely).
const RECONNECT_PAUSE_SECS: u64 = 2;

#[derive(Debug, Deserialize)]
struct ConnectionsOpenResponse {
    ok: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Socket Mode connector: fetches a WebSocket URL via
/// `apps.connections.open`, then reads envelopes until the server ends the
/// connection, acking every envelope before its payload is touched.
pub struct SocketModeClient {
    api_base: String,
    app_token: String,
    listener: MessageListener,
    running: AtomicBool,
    client: reqwest::Client,
}

impl SocketModeClient {
    /// `api_base` overrides `https://slack.com` (used by tests).
    pub fn new(
        app_token: impl Into<String>,
        listener: MessageListener,
        api_base: Option<String>,
    ) -> Self {
        let api_base = api_base
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            api_base,
            app_token: app_token.into(),
            listener,
            running: AtomicBool::new(false),
            client: reqwest::Client::new(),
        }
    }

    fn running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Run until `stop()`: open a connection, serve it to its end, reconnect.
    pub async fn run(&self) {
        self.running.store(true, Ordering::SeqCst);
        log::info!("slack: starting socket mode loop");
        while self.running() {
            match self.open_connection().await {
                Ok(url) => {
                    if let Err(e) = self.serve_connection(&url).await {
                        log::warn!("slack: socket connection error: {}", e);
                        tokio::time::sleep(tokio::time::Duration::from_secs(RECONNECT_PAUSE_SECS))
                            .await;
                    }
                }
                Err(e) => {
                    log::warn!("slack: apps.connections.open failed: {}", e);
                    tokio::time::sleep(tokio::time::Duration::from_secs(RECONNECT_PAUSE_SECS))
                        .await;
                }
            }
        }
        log::info!("slack: socket mode loop stopped");
    }

    /// Fetch a fresh WebSocket URL. Slack wants the app-level token and a
    /// form-encoded content type even though the body is empty.
    async fn open_connection(&self) -> Result<String, SlackError> {
        let url = format!("{}/api/apps.connections.open", self.api_base);
        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.app_token))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(SlackError::Api(format!("{} {}", status, body)));
        }
        let data: ConnectionsOpenResponse = res.json().await?;
        if !data.ok {
            return Err(SlackError::Api(
                data.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        data.url
            .ok_or_else(|| SlackError::Api("connections.open returned no url".to_string()))
    }

    /// Serve one WebSocket connection. Returns `Ok` when the server ends it
    /// (disconnect frame or stream end); transport errors bubble up so the
    /// run loop pauses before reconnecting.
    async fn serve_connection(&self, url: &str) -> Result<(), tungstenite::Error> {
        let (mut ws, _) = tokio_tungstenite::connect_async(url).await?;
        log::info!("slack: socket mode connected");
        while self.running() {
            let Some(msg) = ws.next().await else { break };
            let msg = msg?;
            let Message::Text(text) = msg else { continue };
            let envelope: SocketEnvelope = match serde_json::from_str(&text) {
                Ok(env) => env,
                Err(e) => {
                    log::debug!("slack: unparseable frame: {}", e);
                    continue;
                }
            };
            log::debug!("slack: received {} envelope", envelope.typ);
            // Ack first, for every envelope type, even when the payload is
            // ignored or fails to parse.
            if let Some(id) = envelope.envelope_id.clone() {
                let ack = EnvelopeAck::new(id);
                ws.send(Message::Text(
                    serde_json::to_string(&ack).unwrap_or_default(),
                ))
                .await?;
            }
            match envelope.typ.as_str() {
                "hello" => log::info!("slack: hello received, connection established"),
                "disconnect" => {
                    log::info!(
                        "slack: server requested disconnect ({})",
                        envelope.reason.as_deref().unwrap_or("no reason")
                    );
                    return Ok(());
                }
                "events_api" => self.dispatch_events_api(envelope.payload).await,
                other => log::debug!("slack: ignoring {} envelope", other),
            }
        }
        Ok(())
    }

    /// Hand the inner event to the listener. Unrecognized payload shapes are
    /// dropped here; the envelope was already acked.
    async fn dispatch_events_api(&self, payload: serde_json::Value) {
        let payload: EventsApiPayload = match serde_json::from_value(payload) {
            Ok(p) => p,
            Err(e) => {
                log::debug!("slack: unrecognized events_api payload: {}", e);
                return;
            }
        };
        if let Some(event) = payload.event {
            self.listener.handle_event(&event).await;
        }
    }
}
