//! Handler for the score submission endpoint.
//!
//! `PUT /events/{event_id}/participants/{participant_id}/scores` upserts a
//! batch of scores for one participant. The caller must present the bearer
//! key issued at join time in the `X-Participant-Key` header.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::HeaderMap,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tally_core::{score::ScoreItem, store::EventStore};

use crate::{error::ApiError, events::require_event};

/// Header carrying the participant's bearer key.
pub const PARTICIPANT_KEY_HEADER: &str = "x-participant-key";

/// JSON body accepted by the scores endpoint.
#[derive(Debug, Deserialize)]
pub struct PutScoresBody {
  pub scores: Vec<ScoreItem>,
}

/// `PUT /events/{event_id}/participants/{participant_id}/scores`
pub async fn put_scores<S>(
  State(store): State<Arc<S>>,
  Path((event_id, participant_id)): Path<(String, String)>,
  headers: HeaderMap,
  Json(body): Json<PutScoresBody>,
) -> Result<Json<Value>, ApiError>
where
  S: EventStore,
{
  let participant_key = headers
    .get(PARTICIPANT_KEY_HEADER)
    .and_then(|value| value.to_str().ok())
    .filter(|value| !value.is_empty())
    .ok_or_else(|| {
      ApiError::Unauthorized("X-Participant-Key header is required".to_owned())
    })?;

  for item in &body.scores {
    item.validate()?;
  }

  require_event(store.as_ref(), &event_id).await?;
  store
    .put_scores(&event_id, &participant_id, participant_key, &body.scores)
    .await?;

  Ok(Json(json!({ "ok": true })))
}
