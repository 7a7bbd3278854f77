//! [`MemStore`] — the in-memory implementation of [`EventStore`].

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, MutexGuard},
};

use tally_core::{
  Error, Result,
  event::Event,
  participant::Participant,
  ranking::ScoresByParticipant,
  score::ScoreItem,
  store::EventStore,
};

#[derive(Default)]
struct Inner {
  events:       HashMap<String, Event>,
  participants: HashMap<(String, String), Participant>,
  scores:       HashMap<(String, String, String), u32>,
}

/// An event store held entirely in process memory.
///
/// Cloning is cheap — clones share the same underlying state.
#[derive(Clone, Default)]
pub struct MemStore {
  inner: Arc<Mutex<Inner>>,
}

impl MemStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    // No operation can leave the maps torn, so a poisoned lock is safe to reuse.
    self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl EventStore for MemStore {
  async fn create_event(&self, title: &str, entry_names: &[String]) -> Result<Event> {
    let event = Event::create(title, entry_names)?;
    self.lock().events.insert(event.id.clone(), event.clone());
    Ok(event)
  }

  async fn get_event(&self, event_id: &str) -> Result<Option<Event>> {
    Ok(self.lock().events.get(event_id).cloned())
  }

  async fn join_event(&self, event_id: &str, participant_name: &str) -> Result<Participant> {
    let participant = Participant::create(participant_name)?;

    // The duplicate check and the insert share one lock acquisition, so two
    // concurrent joins with the same name cannot both pass.
    let mut inner = self.lock();
    let taken = inner
      .participants
      .iter()
      .any(|((eid, _), p)| eid == event_id && p.name == participant.name);
    if taken {
      return Err(Error::DuplicateParticipantName(participant.name));
    }

    inner.participants.insert(
      (event_id.to_owned(), participant.id.clone()),
      participant.clone(),
    );
    Ok(participant)
  }

  async fn get_participant(
    &self,
    event_id: &str,
    participant_id: &str,
  ) -> Result<Option<Participant>> {
    let key = (event_id.to_owned(), participant_id.to_owned());
    Ok(self.lock().participants.get(&key).cloned())
  }

  async fn list_participants(&self, event_id: &str) -> Result<Vec<Participant>> {
    Ok(
      self
        .lock()
        .participants
        .iter()
        .filter(|((eid, _), _)| eid.as_str() == event_id)
        .map(|(_, p)| p.clone())
        .collect(),
    )
  }

  async fn put_scores(
    &self,
    event_id: &str,
    participant_id: &str,
    participant_key: &str,
    scores: &[ScoreItem],
  ) -> Result<()> {
    let mut inner = self.lock();

    let key = (event_id.to_owned(), participant_id.to_owned());
    let stored_key = inner
      .participants
      .get(&key)
      .map(|p| p.participant_key.clone())
      .ok_or_else(|| Error::ParticipantNotFound(participant_id.to_owned()))?;
    if stored_key != participant_key {
      return Err(Error::KeyMismatch);
    }

    for item in scores {
      inner.scores.insert(
        (event_id.to_owned(), participant_id.to_owned(), item.entry_id.clone()),
        item.score,
      );
    }
    Ok(())
  }

  async fn list_scores_by_participant(&self, event_id: &str) -> Result<ScoresByParticipant> {
    let inner = self.lock();
    let mut result = ScoresByParticipant::new();
    for ((eid, pid, entry_id), score) in &inner.scores {
      if eid != event_id {
        continue;
      }
      result
        .entry(pid.clone())
        .or_default()
        .insert(entry_id.clone(), *score);
    }
    Ok(result)
  }
}
