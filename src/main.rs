//! Upload relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌───────────────────────────────────────────────┐
//!                         │                 UPLOAD RELAY                  │
//!     multipart POST      │  ┌────────┐   ┌───────────┐   ┌───────────┐  │
//!     ────────────────────┼─▶│  http  │──▶│ multipart │──▶│  forward  │──┼──▶ POST {processor}/upload
//!                         │  │ server │   │ extractor │   │ (reqwest) │  │
//!                         │  └────────┘   └───────────┘   └─────┬─────┘  │
//!     relayed response    │  ┌────────┐                         │        │
//!     ◀───────────────────┼──│response│◀────────────────────────┘        │
//!                         │  └────────┘                                  │
//!                         │   config · observability · lifecycle         │
//!                         └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use upload_relay::config::{self, RelayConfig};
use upload_relay::http::HttpServer;
use upload_relay::lifecycle::Shutdown;
use upload_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "upload-relay")]
#[command(about = "Relay the first file of a multipart upload to a processor service", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Dotenv file with fallback environment variables (ignored if missing).
    #[arg(long, default_value = config::DOTENV_FILE)]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let dotenv = config::read_dotenv(&args.env_file)?;
    let mut config: RelayConfig = match &args.config {
        Some(path) => config::load_config(path, &dotenv)?,
        None => config::from_env(&dotenv)?,
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        config::validate_config(&config).map_err(config::ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("upload-relay v{} starting", env!("CARGO_PKG_VERSION"));
    if !dotenv.is_empty() {
        tracing::info!(
            path = %args.env_file.display(),
            variables = dotenv.len(),
            "Loaded dotenv file"
        );
    }

    if config.processor.url.is_none() {
        tracing::warn!(
            "{} is not set; uploads will fail until it is configured",
            config::PROCESSOR_URL_ENV
        );
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        processor_url = config.processor.url.as_deref().unwrap_or("<unset>"),
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // validated above
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
