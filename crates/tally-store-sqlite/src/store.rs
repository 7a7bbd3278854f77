//! [`SqliteStore`] — the SQLite implementation of [`EventStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tally_core::{
  Error, Result,
  event::Event,
  participant::Participant,
  ranking::ScoresByParticipant,
  score::ScoreItem,
  store::EventStore,
};

use crate::{
  encode::{
    EventMeta, META_SK, ParticipantRecord, ScoreRecord, event_pk, participant_sk,
    participant_sk_pattern, score_sk, score_sk_pattern, split_participant_sk, split_score_sk,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tally event store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and all
/// calls are serialised onto its dedicated thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(Error::storage)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(Error::storage)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(Error::storage)
  }

  /// Fetch the payload of a single record, if present.
  async fn get_payload(&self, pk: String, sk: String) -> Result<Option<String>> {
    self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT payload FROM records WHERE pk = ?1 AND sk = ?2",
              rusqlite::params![pk, sk],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::storage)
  }

  /// Fetch `(sk, payload)` for every record of `pk` whose sort key matches
  /// the `LIKE` pattern.
  async fn list_payloads(&self, pk: String, sk_pattern: String) -> Result<Vec<(String, String)>> {
    self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT sk, payload FROM records WHERE pk = ?1 AND sk LIKE ?2")?;
        let rows = stmt
          .query_map(rusqlite::params![pk, sk_pattern], |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::storage)
  }
}

// ─── EventStore impl ─────────────────────────────────────────────────────────

impl EventStore for SqliteStore {
  async fn create_event(&self, title: &str, entry_names: &[String]) -> Result<Event> {
    let event = Event::create(title, entry_names)?;

    let pk = event_pk(&event.id);
    let payload =
      serde_json::to_string(&EventMeta::from_event(&event)).map_err(Error::storage)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO records (pk, sk, payload) VALUES (?1, ?2, ?3)",
          rusqlite::params![pk, META_SK, payload],
        )?;
        Ok(())
      })
      .await
      .map_err(Error::storage)?;

    Ok(event)
  }

  async fn get_event(&self, event_id: &str) -> Result<Option<Event>> {
    let payload = self.get_payload(event_pk(event_id), META_SK.to_owned()).await?;
    match payload {
      None => Ok(None),
      Some(json) => {
        let meta: EventMeta = serde_json::from_str(&json).map_err(Error::storage)?;
        Ok(Some(meta.into_event(event_id)))
      }
    }
  }

  async fn join_event(&self, event_id: &str, participant_name: &str) -> Result<Participant> {
    let participant = Participant::create(participant_name)?;

    let pk = event_pk(event_id);
    let sk = participant_sk(&participant.id);
    let name = participant.name.clone();
    let payload = serde_json::to_string(&ParticipantRecord::from_participant(&participant))
      .map_err(Error::storage)?;

    // The duplicate scan and the insert run in one call, which occupies the
    // connection thread end to end; a concurrent join cannot interleave.
    let inserted: bool = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT payload FROM records WHERE pk = ?1 AND sk LIKE ?2")?;
        let payloads = stmt
          .query_map(rusqlite::params![pk, participant_sk_pattern()], |row| {
            row.get::<_, String>(0)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        for json in &payloads {
          let record: ParticipantRecord = serde_json::from_str(json)
            .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
          if record.name == name {
            return Ok(false);
          }
        }

        conn.execute(
          "INSERT INTO records (pk, sk, payload) VALUES (?1, ?2, ?3)",
          rusqlite::params![pk, sk, payload],
        )?;
        Ok(true)
      })
      .await
      .map_err(Error::storage)?;

    if !inserted {
      return Err(Error::DuplicateParticipantName(participant.name));
    }
    Ok(participant)
  }

  async fn get_participant(
    &self,
    event_id: &str,
    participant_id: &str,
  ) -> Result<Option<Participant>> {
    let payload = self
      .get_payload(event_pk(event_id), participant_sk(participant_id))
      .await?;
    match payload {
      None => Ok(None),
      Some(json) => {
        let record: ParticipantRecord =
          serde_json::from_str(&json).map_err(Error::storage)?;
        Ok(Some(record.into_participant(participant_id)))
      }
    }
  }

  async fn list_participants(&self, event_id: &str) -> Result<Vec<Participant>> {
    let rows = self
      .list_payloads(event_pk(event_id), participant_sk_pattern())
      .await?;

    rows
      .into_iter()
      .map(|(sk, json)| {
        let participant_id = split_participant_sk(&sk)
          .ok_or_else(|| Error::Storage(format!("malformed participant key: {sk}").into()))?;
        let record: ParticipantRecord =
          serde_json::from_str(&json).map_err(Error::storage)?;
        Ok(record.into_participant(participant_id))
      })
      .collect()
  }

  async fn put_scores(
    &self,
    event_id: &str,
    participant_id: &str,
    participant_key: &str,
    scores: &[ScoreItem],
  ) -> Result<()> {
    let participant = self
      .get_participant(event_id, participant_id)
      .await?
      .ok_or_else(|| Error::ParticipantNotFound(participant_id.to_owned()))?;
    if participant.participant_key != participant_key {
      return Err(Error::KeyMismatch);
    }

    let pk = event_pk(event_id);
    let items = scores
      .iter()
      .map(|item| {
        let payload = serde_json::to_string(&ScoreRecord { score: item.score })
          .map_err(Error::storage)?;
        Ok((score_sk(participant_id, &item.entry_id), payload))
      })
      .collect::<Result<Vec<_>>>()?;

    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "INSERT INTO records (pk, sk, payload) VALUES (?1, ?2, ?3)
           ON CONFLICT (pk, sk) DO UPDATE SET payload = excluded.payload",
        )?;
        for (sk, payload) in &items {
          stmt.execute(rusqlite::params![pk, sk, payload])?;
        }
        Ok(())
      })
      .await
      .map_err(Error::storage)?;

    Ok(())
  }

  async fn list_scores_by_participant(&self, event_id: &str) -> Result<ScoresByParticipant> {
    let rows = self
      .list_payloads(event_pk(event_id), score_sk_pattern())
      .await?;

    let mut result = ScoresByParticipant::new();
    for (sk, json) in rows {
      let (participant_id, entry_id) = split_score_sk(&sk)
        .ok_or_else(|| Error::Storage(format!("malformed score key: {sk}").into()))?;
      let record: ScoreRecord = serde_json::from_str(&json).map_err(Error::storage)?;
      result
        .entry(participant_id.to_owned())
        .or_default()
        .insert(entry_id.to_owned(), record.score);
    }
    Ok(result)
  }
}
