use anyhow::Context;
use clap::Parser;
use parlor_simulator::{Api, Config, Simulator};
use std::{path::PathBuf, sync::Arc};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    port: Option<u16>,

    #[arg(short, long)]
    log_level: Option<String>,

    /// Seed every session for reproducible games.
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Load config, command line flags win
    let mut config = match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config file {}", path.display()))?;
            Config::from_yaml(&contents).context("could not parse config file")?
        }
        None => Config::default(),
    };
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let config = config.validate().context("invalid config")?;

    // Create logger
    if config.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(config.log_level)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(config.log_level)
            .init();
    }

    let simulator = Arc::new(Simulator::new(config.session));
    let api = Api::new(simulator);
    let app = api.router();

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        decks = config.session.deck_count,
        starting_chips = config.session.starting_chips,
        "Listening on {}",
        addr
    );
    axum::serve(listener, app)
        .await
        .context("axum server error")?;

    Ok(())
}
