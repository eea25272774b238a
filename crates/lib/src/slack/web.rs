//! Slack Web API client (token-authenticated, `chat.postMessage` only).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::listener::OutboundSender;

pub(crate) const DEFAULT_API_BASE: &str = "https://slack.com";

pub struct SlackWebClient {
    api_base: String,
    bot_token: String,
    client: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    #[error("slack request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("slack api error: {0}")]
    Api(String),
}

/// Envelope every Web API call answers with: `{ "ok", "error"? }`.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackWebClient {
    /// `api_base` overrides `https://slack.com` (used by tests).
    pub fn new(bot_token: impl Into<String>, api_base: Option<String>) -> Self {
        let api_base = api_base
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            api_base,
            bot_token: bot_token.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Post `text` to `channel` via `chat.postMessage`.
    pub async fn chat_post_message(&self, channel: &str, text: &str) -> Result<(), SlackError> {
        let url = format!("{}/api/chat.postMessage", self.api_base);
        let body = json!({
            "channel": channel,
            "text": text,
        });
        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.bot_token))
            .json(&body)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(SlackError::Api(format!("{} {}", status, body)));
        }
        let data: ApiResponse = res.json().await?;
        if !data.ok {
            return Err(SlackError::Api(
                data.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl OutboundSender for SlackWebClient {
    async fn post_message(&self, channel: &str, text: &str) -> Result<(), String> {
        self.chat_post_message(channel, text)
            .await
            .map_err(|e| e.to_string())
    }
}
