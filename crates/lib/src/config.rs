//! Environment configuration: required Slack tokens, optional liveness bind.

use anyhow::{bail, Context};

/// Runtime configuration, resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot token (`xoxb-...`) for the Web API.
    pub bot_token: String,
    /// App-level token (`xapp-...`) for Socket Mode.
    pub app_token: String,
    pub liveness_bind: String,
    pub liveness_port: u16,
}

fn default_liveness_port() -> u16 {
    8080
}

fn default_liveness_bind() -> String {
    "0.0.0.0".to_string()
}

/// Read an env var, treating unset and blank the same.
fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|s| {
        let t = s.trim();
        if t.is_empty() {
            None
        } else {
            Some(t.to_string())
        }
    })
}

impl Config {
    /// Resolve from the environment. Missing or blank tokens fail here so the
    /// process dies before anything connects.
    pub fn from_env() -> anyhow::Result<Self> {
        let Some(bot_token) = env_nonempty("SLACK_BOT_TOKEN") else {
            bail!("SLACK_BOT_TOKEN is not set");
        };
        let Some(app_token) = env_nonempty("SLACK_APP_TOKEN") else {
            bail!("SLACK_APP_TOKEN is not set");
        };
        let liveness_bind = env_nonempty("LIVENESS_BIND").unwrap_or_else(default_liveness_bind);
        let liveness_port = match env_nonempty("LIVENESS_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("LIVENESS_PORT is not a port number: {}", raw))?,
            None => default_liveness_port(),
        };
        Ok(Self {
            bot_token,
            app_token,
            liveness_bind,
            liveness_port,
        })
    }
}
