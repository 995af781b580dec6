//! BlockVote Server
//!
//! Serves the voting pages, the JSON API and the live event socket on top of
//! the mock chain.
//!
//! Run with: cargo run --bin blockvote
//!
//! # Configuration
//!
//! Read from `--config`, or the first of `~/.config/blockvote/config.toml`,
//! `/etc/blockvote/config.toml` and `./config.toml`. `BLOCKVOTE_*` environment
//! variables override file values, and `RUST_LOG` overrides the log level.

use anyhow::Context;
use blockvote::api::{serve, AppState};
use blockvote::chain::{FileFlagStore, MockChain};
use blockvote::config::{generate_default_config, Config, LoggingConfig};
use clap::Parser;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

#[derive(Parser)]
#[command(name = "blockvote")]
#[command(about = "Blockchain voting mockup server", long_about = None)]
#[command(version)]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_logging(&config.logging)?;

    tracing::info!("Starting BlockVote server v{}", env!("CARGO_PKG_VERSION"));

    let flag_file = config.chain.flag_file();
    tracing::info!("Wallet flag file: {:?}", flag_file);
    let flags = FileFlagStore::open(flag_file.clone())
        .with_context(|| format!("Failed to open flag store at {:?}", flag_file))?;

    let latency = config.chain.latency();
    tracing::info!(scale = config.chain.latency_scale, "Chain latency: {:?}", latency);
    let chain = Arc::new(MockChain::new(Arc::new(flags), latency));

    let api_config = config.server.to_api_config();
    let state = AppState::with_ws_config(
        chain,
        api_config.clone(),
        config.websocket.to_hub_config(),
    );

    serve(state, &api_config).await?;

    tracing::info!("BlockVote server stopped");
    Ok(())
}

/// Install the global subscriber from the `[logging]` section
fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("blockvote={},tower_http=info", config.level))
    });

    let writer = match &config.file {
        Some(path) => {
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    Ok(())
}
