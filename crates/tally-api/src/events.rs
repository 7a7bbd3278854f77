//! Handlers for `/events` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/events` | Body: [`CreateEventBody`]; returns 201 + event id |
//! | `GET`  | `/events/{event_id}` | 404 if not found |
//! | `POST` | `/events/{event_id}/join` | Body: `{"name":"..."}`; returns the bearer key once |
//! | `GET`  | `/events/{event_id}/results` | Overall + per-participant rankings |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tally_core::{
  event::Event,
  ranking::{OverallRow, ParticipantResult, compute_overall, compute_per_participant},
  store::EventStore,
};

use crate::error::ApiError;

/// Fetch an event or fail with 404.
pub(crate) async fn require_event<S>(store: &S, event_id: &str) -> Result<Event, ApiError>
where
  S: EventStore,
{
  store
    .get_event(event_id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("event {event_id} not found")))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /events`.
#[derive(Debug, Deserialize)]
pub struct CreateEventBody {
  pub title:   String,
  pub entries: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateEventResponse {
  pub event_id: String,
}

/// `POST /events`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateEventBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EventStore,
{
  let event = store.create_event(&body.title, &body.entries).await?;
  Ok((StatusCode::CREATED, Json(CreateEventResponse { event_id: event.id })))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /events/{event_id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(event_id): Path<String>,
) -> Result<Json<Event>, ApiError>
where
  S: EventStore,
{
  let event = require_event(store.as_ref(), &event_id).await?;
  Ok(Json(event))
}

// ─── Join ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /events/{event_id}/join`.
#[derive(Debug, Deserialize)]
pub struct JoinEventBody {
  pub name: String,
}

/// The only response that ever carries the participant's bearer key.
#[derive(Debug, Serialize)]
pub struct JoinEventResponse {
  pub participant_id:  String,
  pub participant_key: String,
}

/// `POST /events/{event_id}/join`
pub async fn join<S>(
  State(store): State<Arc<S>>,
  Path(event_id): Path<String>,
  Json(body): Json<JoinEventBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EventStore,
{
  require_event(store.as_ref(), &event_id).await?;
  let participant = store.join_event(&event_id, &body.name).await?;
  Ok((
    StatusCode::CREATED,
    Json(JoinEventResponse {
      participant_id:  participant.id,
      participant_key: participant.participant_key,
    }),
  ))
}

// ─── Results ──────────────────────────────────────────────────────────────────

/// Overall and per-participant rankings, computed on read from current state.
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
  pub event_id:        String,
  pub event_title:     String,
  pub overall:         Vec<OverallRow>,
  pub per_participant: Vec<ParticipantResult>,
}

/// `GET /events/{event_id}/results`
pub async fn results<S>(
  State(store): State<Arc<S>>,
  Path(event_id): Path<String>,
) -> Result<Json<ResultsResponse>, ApiError>
where
  S: EventStore,
{
  let event = require_event(store.as_ref(), &event_id).await?;
  let participants = store.list_participants(&event_id).await?;
  let scores = store.list_scores_by_participant(&event_id).await?;

  let overall = compute_overall(&event.entries, &scores);
  let per_participant = compute_per_participant(&event.entries, &participants, &scores);

  Ok(Json(ResultsResponse {
    event_id:    event.id,
    event_title: event.title,
    overall,
    per_participant,
  }))
}
