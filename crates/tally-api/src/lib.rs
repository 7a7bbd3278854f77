//! JSON REST API for Tally.
//!
//! Exposes an axum [`Router`] backed by any [`tally_core::store::EventStore`].
//! Transport concerns (TLS, CORS, static assets) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tally_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod events;
pub mod scores;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use tally_core::store::EventStore;

pub use error::ApiError;


/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: EventStore + 'static,
{
  Router::new()
    .route("/events", post(events::create::<S>))
    .route("/events/{event_id}", get(events::get_one::<S>))
    .route("/events/{event_id}/join", post(events::join::<S>))
    .route("/events/{event_id}/results", get(events::results::<S>))
    .route(
      "/events/{event_id}/participants/{participant_id}/scores",
      put(scores::put_scores::<S>),
    )
    .with_state(store)
}
