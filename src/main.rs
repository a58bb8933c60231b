//! Bishnupriya Manipuri Dictionary Server
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request    ┌──────────┐    ┌──────────┐    ┌────────────────┐
//!   ─────────────────▶│ listener │───▶│   http   │───▶│   dictionary   │
//!                     │  (tokio) │    │ handlers │    │   WordStore    │
//!   Client Response   └──────────┘    └────┬─────┘    └───────┬────────┘
//!   ◀──────────────────────────────────────┘                  │ loaded once
//!                                                             ▼
//!                                                  data/alphabets/<letter>.json
//!
//!   Cross-cutting: config · observability (logs, metrics) · lifecycle
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use bpy_dictionary::config::{load_config, validate_config, ConfigError, DictionaryConfig};
use bpy_dictionary::lifecycle::{load_store, Shutdown};
use bpy_dictionary::observability::{logging, metrics};
use bpy_dictionary::HttpServer;

#[derive(Parser)]
#[command(name = "bpy-dictionary")]
#[command(about = "Bishnupriya Manipuri dictionary API server", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the alphabet JSON files (overrides the config file).
    #[arg(short, long)]
    data_dir: Option<String>,

    /// Address to listen on (overrides the config file).
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(args: &Args) -> Result<DictionaryConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => DictionaryConfig::default(),
    };

    if let Some(dir) = &args.data_dir {
        config.data.alphabets_dir = dir.clone();
    }
    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init_logging(&config.observability);

    tracing::info!("bpy-dictionary v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        alphabets_dir = %config.data.alphabets_dir,
        base_path = %config.api.base_path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address was checked by validation
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let store = Arc::new(load_store(&config)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
