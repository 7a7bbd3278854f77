//! Tally server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), constructs
//! the configured storage backend, and serves the scoring API plus the
//! static web client.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tally_core::store::EventStore;
use tally_server::{ServerConfig, StoreBackend};
use tally_store_mem::MemStore;
use tally_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Tally scoring server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TALLY"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // The store is constructed here and passed down; nothing else selects or
  // reaches a backend.
  match server_cfg.store_backend {
    StoreBackend::Memory => {
      tracing::info!("using in-memory store; state is lost on shutdown");
      serve(Arc::new(MemStore::new()), server_cfg).await
    }
    StoreBackend::Sqlite => {
      let store = SqliteStore::open(&server_cfg.store_path)
        .await
        .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;
      tracing::info!("using sqlite store at {:?}", server_cfg.store_path);
      serve(Arc::new(store), server_cfg).await
    }
  }
}

async fn serve<S>(store: Arc<S>, config: ServerConfig) -> anyhow::Result<()>
where
  S: EventStore + 'static,
{
  let app = tally_server::router(store, &config);
  let address = format!("{}:{}", config.host, config.port);

  tracing::info!("listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
