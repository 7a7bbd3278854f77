//! Tally server assembly.
//!
//! Mounts the JSON API under `/api` next to a health probe and the static
//! web client, with permissive CORS and request tracing. The API crate
//! itself stays transport-agnostic.

use std::{path::PathBuf, sync::Arc};

use axum::{Json, Router, routing::get};
use serde::Deserialize;
use serde_json::{Value, json};
use tally_core::store::EventStore;
use tower_http::{
  cors::CorsLayer,
  services::{ServeDir, ServeFile},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which storage backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
  /// Volatile in-process store; state is lost on shutdown.
  Memory,
  /// Durable single-file SQLite store.
  Sqlite,
}

/// Runtime server configuration, deserialised from `config.toml` layered
/// under `TALLY_*` environment variables. Every field has a default, so the
/// server starts with no configuration at all.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,

  #[serde(default = "default_port")]
  pub port: u16,

  #[serde(default = "default_store_backend")]
  pub store_backend: StoreBackend,

  /// SQLite database path; ignored by the memory backend.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,

  /// Directory served at `/static`, with its `index.html` at `/`.
  #[serde(default = "default_web_dir")]
  pub web_dir: PathBuf,
}

fn default_host() -> String {
  "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
  8000
}

fn default_store_backend() -> StoreBackend {
  StoreBackend::Memory
}

fn default_store_path() -> PathBuf {
  PathBuf::from("tally.db")
}

fn default_web_dir() -> PathBuf {
  PathBuf::from("web")
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application router for `store`.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: EventStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api", tally_api::api_router(store))
    .route_service("/", ServeFile::new(config.web_dir.join("index.html")))
    .nest_service("/static", ServeDir::new(&config.web_dir))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

/// `GET /health`
async fn health() -> Json<Value> {
  Json(json!({ "ok": true }))
}
