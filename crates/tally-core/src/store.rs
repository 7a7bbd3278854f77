//! The `EventStore` trait.
//!
//! The trait is implemented by storage backends (`tally-store-mem`,
//! `tally-store-sqlite`). The API layer depends on this abstraction, not on
//! any concrete backend; the server picks and constructs one at startup.

use std::future::Future;

use crate::{
  Result,
  event::Event,
  participant::Participant,
  ranking::ScoresByParticipant,
  score::ScoreItem,
};

/// Abstraction over a Tally storage backend.
///
/// Every mutating operation is scoped to a single key or a batch of
/// independent per-item upserts; no multi-key transactions are required.
/// Concurrent writes from different participants commute; concurrent writes
/// from the same participant race last-write-wins per score key.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EventStore: Send + Sync {
  /// Create an event with a fixed, ordered list of entries.
  ///
  /// The title and entry names are trimmed and blank entry names dropped;
  /// fails with `Error::NoEntries` when nothing remains.
  fn create_event<'a>(
    &'a self,
    title: &'a str,
    entry_names: &'a [String],
  ) -> impl Future<Output = Result<Event>> + Send + 'a;

  /// Fetch an event by id. Returns `None` if not found.
  fn get_event<'a>(
    &'a self,
    event_id: &'a str,
  ) -> impl Future<Output = Result<Option<Event>>> + Send + 'a;

  /// Add a participant to an event and issue its bearer key.
  ///
  /// Fails with `Error::DuplicateParticipantName` when another participant
  /// of the same event already has the same trimmed name. The comparison is
  /// case-sensitive; the same name is allowed in different events.
  fn join_event<'a>(
    &'a self,
    event_id: &'a str,
    participant_name: &'a str,
  ) -> impl Future<Output = Result<Participant>> + Send + 'a;

  /// Fetch one participant of an event. Returns `None` if not found.
  fn get_participant<'a>(
    &'a self,
    event_id: &'a str,
    participant_id: &'a str,
  ) -> impl Future<Output = Result<Option<Participant>>> + Send + 'a;

  /// List every participant of an event, in unspecified order.
  fn list_participants<'a>(
    &'a self,
    event_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Participant>>> + Send + 'a;

  /// Upsert a batch of scores for one participant.
  ///
  /// Fails with `Error::ParticipantNotFound` when the participant does not
  /// exist under the event, and with `Error::KeyMismatch` when
  /// `participant_key` differs from the stored secret; both are checked
  /// before any write. On success each item overwrites by `(event_id,
  /// participant_id, entry_id)`: last write wins, no history.
  fn put_scores<'a>(
    &'a self,
    event_id: &'a str,
    participant_id: &'a str,
    participant_key: &'a str,
    scores: &'a [ScoreItem],
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  /// Every stored score for an event, grouped by participant.
  fn list_scores_by_participant<'a>(
    &'a self,
    event_id: &'a str,
  ) -> impl Future<Output = Result<ScoresByParticipant>> + Send + 'a;
}
