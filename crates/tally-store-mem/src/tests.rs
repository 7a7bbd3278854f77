//! Integration tests for `MemStore`.

use tally_core::{Error, score::ScoreItem, store::EventStore};

use crate::MemStore;

fn names(raw: &[&str]) -> Vec<String> {
  raw.iter().map(|s| s.to_string()).collect()
}

fn score(entry_id: &str, score: u32) -> ScoreItem {
  ScoreItem { entry_id: entry_id.into(), score }
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_event() {
  let s = MemStore::new();

  let event = s.create_event("Chili Cook-Off", &names(&["A", "B"])).await.unwrap();
  assert_eq!(event.title, "Chili Cook-Off");
  assert_eq!(event.entries.len(), 2);

  let fetched = s.get_event(&event.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, event.id);
  assert_eq!(fetched.entries, event.entries);
}

#[tokio::test]
async fn get_event_missing_returns_none() {
  let s = MemStore::new();
  assert!(s.get_event("evt_missing").await.unwrap().is_none());
}

#[tokio::test]
async fn create_event_drops_blank_entries() {
  let s = MemStore::new();
  let event = s.create_event("t", &names(&[" A ", "", "  ", "B"])).await.unwrap();
  let entry_names: Vec<_> = event.entries.iter().map(|e| e.name.as_str()).collect();
  assert_eq!(entry_names, ["A", "B"]);
}

#[tokio::test]
async fn create_event_with_only_blank_entries_errors() {
  let s = MemStore::new();
  let err = s.create_event("t", &names(&[" ", "\t"])).await.unwrap_err();
  assert!(matches!(err, Error::NoEntries));
}

// ─── Joining ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn join_issues_id_and_bearer_key() {
  let s = MemStore::new();
  let event = s.create_event("t", &names(&["A"])).await.unwrap();

  let participant = s.join_event(&event.id, "ann").await.unwrap();
  assert!(participant.id.starts_with("p_"));
  assert!(participant.participant_key.starts_with("k_"));

  let fetched = s.get_participant(&event.id, &participant.id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "ann");
  assert_eq!(fetched.participant_key, participant.participant_key);
}

#[tokio::test]
async fn join_rejects_duplicate_trimmed_name_within_event() {
  let s = MemStore::new();
  let event = s.create_event("t", &names(&["A"])).await.unwrap();

  s.join_event(&event.id, "  ann  ").await.unwrap();
  let err = s.join_event(&event.id, "ann").await.unwrap_err();
  assert!(matches!(err, Error::DuplicateParticipantName(name) if name == "ann"));
}

#[tokio::test]
async fn duplicate_name_check_is_case_sensitive() {
  let s = MemStore::new();
  let event = s.create_event("t", &names(&["A"])).await.unwrap();

  s.join_event(&event.id, "Ann").await.unwrap();
  assert!(s.join_event(&event.id, "ann").await.is_ok());
}

#[tokio::test]
async fn join_allows_same_name_in_different_events() {
  let s = MemStore::new();
  let event1 = s.create_event("t1", &names(&["A"])).await.unwrap();
  let event2 = s.create_event("t2", &names(&["A"])).await.unwrap();

  s.join_event(&event1.id, "ann").await.unwrap();
  assert!(s.join_event(&event2.id, "ann").await.is_ok());
}

#[tokio::test]
async fn list_participants_is_scoped_to_the_event() {
  let s = MemStore::new();
  let event1 = s.create_event("t1", &names(&["A"])).await.unwrap();
  let event2 = s.create_event("t2", &names(&["A"])).await.unwrap();

  s.join_event(&event1.id, "ann").await.unwrap();
  s.join_event(&event1.id, "bob").await.unwrap();
  s.join_event(&event2.id, "cat").await.unwrap();

  let listed = s.list_participants(&event1.id).await.unwrap();
  let mut listed_names: Vec<_> = listed.iter().map(|p| p.name.clone()).collect();
  listed_names.sort();
  assert_eq!(listed_names, ["ann", "bob"]);
}

// ─── Scores ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_scores_requires_existing_participant() {
  let s = MemStore::new();
  let event = s.create_event("t", &names(&["A"])).await.unwrap();

  let err = s
    .put_scores(&event.id, "p_missing", "k_whatever", &[score("ent_a", 1)])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ParticipantNotFound(_)));
}

#[tokio::test]
async fn put_scores_rejects_wrong_key_without_writing() {
  let s = MemStore::new();
  let event = s.create_event("t", &names(&["A"])).await.unwrap();
  let participant = s.join_event(&event.id, "ann").await.unwrap();
  let entry_id = event.entries[0].id.clone();

  let err = s
    .put_scores(&event.id, &participant.id, "k_wrong", &[score(&entry_id, 50)])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::KeyMismatch));

  let scores = s.list_scores_by_participant(&event.id).await.unwrap();
  assert!(scores.is_empty());
}

#[tokio::test]
async fn put_scores_overwrites_last_write_wins() {
  let s = MemStore::new();
  let event = s.create_event("t", &names(&["A"])).await.unwrap();
  let participant = s.join_event(&event.id, "ann").await.unwrap();
  let entry_id = event.entries[0].id.clone();

  s.put_scores(&event.id, &participant.id, &participant.participant_key, &[score(&entry_id, 10)])
    .await
    .unwrap();
  s.put_scores(&event.id, &participant.id, &participant.participant_key, &[score(&entry_id, 70)])
    .await
    .unwrap();

  let scores = s.list_scores_by_participant(&event.id).await.unwrap();
  assert_eq!(scores[&participant.id][&entry_id], 70);
}

#[tokio::test]
async fn resubmitting_identical_scores_is_idempotent() {
  let s = MemStore::new();
  let event = s.create_event("t", &names(&["A", "B"])).await.unwrap();
  let participant = s.join_event(&event.id, "ann").await.unwrap();
  let items: Vec<_> =
    event.entries.iter().map(|e| score(&e.id, 42)).collect();

  s.put_scores(&event.id, &participant.id, &participant.participant_key, &items)
    .await
    .unwrap();
  let first = s.list_scores_by_participant(&event.id).await.unwrap();

  s.put_scores(&event.id, &participant.id, &participant.participant_key, &items)
    .await
    .unwrap();
  let second = s.list_scores_by_participant(&event.id).await.unwrap();

  assert_eq!(first, second);
}

#[tokio::test]
async fn list_scores_groups_by_participant() {
  let s = MemStore::new();
  let event = s.create_event("t", &names(&["A", "B"])).await.unwrap();
  let ann = s.join_event(&event.id, "ann").await.unwrap();
  let bob = s.join_event(&event.id, "bob").await.unwrap();
  let a = event.entries[0].id.clone();
  let b = event.entries[1].id.clone();

  s.put_scores(&event.id, &ann.id, &ann.participant_key, &[score(&a, 10), score(&b, 5)])
    .await
    .unwrap();
  s.put_scores(&event.id, &bob.id, &bob.participant_key, &[score(&a, 3)])
    .await
    .unwrap();

  let scores = s.list_scores_by_participant(&event.id).await.unwrap();
  assert_eq!(scores.len(), 2);
  assert_eq!(scores[&ann.id].len(), 2);
  assert_eq!(scores[&ann.id][&a], 10);
  assert_eq!(scores[&bob.id][&a], 3);
}

#[tokio::test]
async fn scores_are_scoped_to_their_event() {
  let s = MemStore::new();
  let event1 = s.create_event("t1", &names(&["A"])).await.unwrap();
  let event2 = s.create_event("t2", &names(&["A"])).await.unwrap();
  let ann = s.join_event(&event1.id, "ann").await.unwrap();
  let entry_id = event1.entries[0].id.clone();

  s.put_scores(&event1.id, &ann.id, &ann.participant_key, &[score(&entry_id, 9)])
    .await
    .unwrap();

  assert!(s.list_scores_by_participant(&event2.id).await.unwrap().is_empty());
}
