//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("forbidden: {0}")]
  PermissionDenied(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("store error: {0}")]
  Store(#[source] tally_core::Error),
}

impl From<tally_core::Error> for ApiError {
  fn from(err: tally_core::Error) -> Self {
    use tally_core::Error as E;
    match err {
      E::EventNotFound(_) | E::ParticipantNotFound(_) => Self::NotFound(err.to_string()),
      E::KeyMismatch => Self::PermissionDenied(err.to_string()),
      E::DuplicateParticipantName(_) => Self::Conflict(err.to_string()),
      E::BlankTitle
      | E::TitleTooLong(_)
      | E::TooManyEntries(_)
      | E::NoEntries
      | E::BlankParticipantName
      | E::ParticipantNameTooLong(_)
      | E::ScoreOutOfRange(_) => Self::BadRequest(err.to_string()),
      E::Storage(_) => Self::Store(err),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::PermissionDenied(m) => (StatusCode::FORBIDDEN, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::Store(e) => {
        tracing::error!("store error: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, "an internal error occurred".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
