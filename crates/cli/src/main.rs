use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zpathconverter")]
#[command(about = "Slack path-notation converter bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Run the bot: Socket Mode listener plus the liveness HTTP endpoint.
    /// Requires SLACK_BOT_TOKEN and SLACK_APP_TOKEN in the environment.
    Run {
        /// Liveness HTTP port (default from LIVENESS_PORT or 8080)
        #[arg(long, short)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("zpathconverter {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Run { port }) => {
            if let Err(e) = run_bot(port).await {
                log::error!("zpathconverter failed: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

async fn run_bot(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = lib::config::Config::from_env()?;
    if let Some(p) = port {
        config.liveness_port = p;
    }
    log::info!(
        "starting zpathconverter, liveness on {}:{}",
        config.liveness_bind,
        config.liveness_port
    );
    lib::bot::run(config).await
}
