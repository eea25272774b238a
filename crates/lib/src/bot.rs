//! Runtime composition: liveness endpoint plus the Socket Mode listener.

use std::sync::Arc;

use crate::config::Config;
use crate::listener::MessageListener;
use crate::liveness;
use crate::slack::{SlackWebClient, SocketModeClient};

/// Wire everything together and run until a shutdown signal arrives.
///
/// The liveness endpoint runs as an independent task; it shares no state with
/// the Slack side, and a bind failure there is logged without taking the bot
/// down.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let web = Arc::new(SlackWebClient::new(config.bot_token, None));
    let listener = MessageListener::new(web);
    let socket = SocketModeClient::new(config.app_token, listener, None);

    let bind = config.liveness_bind;
    let port = config.liveness_port;
    tokio::spawn(async move {
        if let Err(e) = liveness::run_liveness(&bind, port).await {
            log::error!("liveness endpoint failed: {}", e);
        }
    });

    tokio::select! {
        _ = socket.run() => {}
        _ = shutdown_signal() => {
            socket.stop();
        }
    }
    log::info!("zpathconverter stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, stopping socket mode client");
}
