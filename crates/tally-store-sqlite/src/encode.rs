//! Key scheme and JSON payload types for the single `records` table.
//!
//! Partition key: `EVENT#{event_id}`. Sort keys: `META` for event metadata,
//! `PARTICIPANT#{participant_id}` for participants, and
//! `SCORE#{participant_id}#{entry_id}` for individual score records. Ids
//! never contain `#`, so sort keys split unambiguously.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_core::{
  event::{Entry, Event},
  participant::Participant,
};

/// Sort key of the single metadata record per event.
pub const META_SK: &str = "META";

const PARTICIPANT_SK_PREFIX: &str = "PARTICIPANT#";
const SCORE_SK_PREFIX: &str = "SCORE#";

// ─── Keys ────────────────────────────────────────────────────────────────────

pub fn event_pk(event_id: &str) -> String {
  format!("EVENT#{event_id}")
}

pub fn participant_sk(participant_id: &str) -> String {
  format!("{PARTICIPANT_SK_PREFIX}{participant_id}")
}

pub fn score_sk(participant_id: &str, entry_id: &str) -> String {
  format!("{SCORE_SK_PREFIX}{participant_id}#{entry_id}")
}

/// SQL `LIKE` pattern matching every participant sort key.
pub fn participant_sk_pattern() -> String {
  format!("{PARTICIPANT_SK_PREFIX}%")
}

/// SQL `LIKE` pattern matching every score sort key.
pub fn score_sk_pattern() -> String {
  format!("{SCORE_SK_PREFIX}%")
}

/// Split `PARTICIPANT#{pid}` back into the participant id.
pub fn split_participant_sk(sk: &str) -> Option<&str> {
  sk.strip_prefix(PARTICIPANT_SK_PREFIX)
}

/// Split `SCORE#{pid}#{entry_id}` back into `(participant_id, entry_id)`.
pub fn split_score_sk(sk: &str) -> Option<(&str, &str)> {
  sk.strip_prefix(SCORE_SK_PREFIX)?.split_once('#')
}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// JSON payload stored under the `META` sort key.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventMeta {
  pub title:      String,
  pub created_at: DateTime<Utc>,
  pub entries:    Vec<Entry>,
}

impl EventMeta {
  pub fn from_event(event: &Event) -> Self {
    Self {
      title:      event.title.clone(),
      created_at: event.created_at,
      entries:    event.entries.clone(),
    }
  }

  pub fn into_event(self, event_id: &str) -> Event {
    Event {
      id:         event_id.to_owned(),
      title:      self.title,
      entries:    self.entries,
      created_at: self.created_at,
    }
  }
}

/// JSON payload stored under a `PARTICIPANT#` sort key.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipantRecord {
  pub name:            String,
  pub participant_key: String,
}

impl ParticipantRecord {
  pub fn from_participant(participant: &Participant) -> Self {
    Self {
      name:            participant.name.clone(),
      participant_key: participant.participant_key.clone(),
    }
  }

  pub fn into_participant(self, participant_id: &str) -> Participant {
    Participant {
      id:              participant_id.to_owned(),
      name:            self.name,
      participant_key: self.participant_key,
    }
  }
}

/// JSON payload stored under a `SCORE#` sort key.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreRecord {
  pub score: u32,
}
