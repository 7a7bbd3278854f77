//! Error types for `tally-core`.
//!
//! Every variant is locally detected and non-retryable from the core's point
//! of view: retrying a key mismatch or a duplicate name cannot succeed. The
//! boundary layer translates variants to externally visible statuses.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("event not found: {0}")]
  EventNotFound(String),

  #[error("participant not found: {0}")]
  ParticipantNotFound(String),

  #[error("invalid participant key")]
  KeyMismatch,

  #[error("participant name already taken: {0:?}")]
  DuplicateParticipantName(String),

  #[error("event title must not be blank")]
  BlankTitle,

  #[error("event title is longer than {0} characters")]
  TitleTooLong(usize),

  #[error("at most {0} entries are accepted")]
  TooManyEntries(usize),

  #[error("at least one non-blank entry is required")]
  NoEntries,

  #[error("participant name must not be blank")]
  BlankParticipantName,

  #[error("participant name is longer than {0} characters")]
  ParticipantNameTooLong(usize),

  #[error("score {0} is out of range (0..=100)")]
  ScoreOutOfRange(u32),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend-specific failure.
  pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
