//! Liveness endpoint: `GET /` answers with a fixed plain-text body.

use anyhow::Context;
use axum::routing::get;
use axum::Router;

/// Body the external supervisor greps for; changing it breaks the probe.
const LIVENESS_BODY: &str = "Zpathconverter is alive!";

/// Serve `GET /` on `bind:port` until the process exits. No other routes,
/// no auth, no state.
pub async fn run_liveness(bind: &str, port: u16) -> anyhow::Result<()> {
    let app = Router::new().route("/", get(alive));

    let bind_addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("liveness endpoint listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .context("liveness server exited")?;
    Ok(())
}

/// GET / returns the fixed liveness body (for probes).
async fn alive() -> &'static str {
    LIVENESS_BODY
}
