//! The ranking/aggregation engine.
//!
//! Pure, synchronous functions over data already fetched from a store. The
//! scheme is dense ranking: tied scores share a rank and the next distinct
//! score advances the rank by exactly one, so scores 10,10,0 rank as 1,1,2
//! rather than the 1,1,3 of competition ranking. Score ties always break by
//! key ascending, which keeps output deterministic regardless of map
//! iteration order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{event::Entry, participant::Participant};

/// Every submitted score for one event, grouped by participant:
/// `participant_id -> entry_id -> score`. A participant that has not
/// submitted anything yet simply has no key here.
pub type ScoresByParticipant = HashMap<String, HashMap<String, u32>>;

// ─── Derived rows — computed on read, never persisted ────────────────────────

/// One entry's position within a single participant's ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRow {
  pub entry_id:   String,
  pub entry_name: String,
  pub score:      u32,
  pub rank:       u32,
}

/// One participant's complete ranking over every entry in the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantResult {
  pub participant_id:   String,
  pub participant_name: String,
  pub rankings:         Vec<RankingRow>,
}

/// One entry's position in the cross-participant aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallRow {
  pub entry_id:    String,
  pub entry_name:  String,
  pub total_score: u64,
  pub rank:        u32,
}

// ─── Dense ranking ───────────────────────────────────────────────────────────

/// Rank `(key, score)` pairs by score descending, densely.
///
/// Equal scores receive the same rank, and the next distinct score gets the
/// next integer however many pairs were tied. Keys are assumed unique.
/// An empty input yields an empty map.
pub fn dense_rank_desc<S: Ord + Copy>(pairs: &[(String, S)]) -> HashMap<String, u32> {
  let mut sorted: Vec<&(String, S)> = pairs.iter().collect();
  sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

  let mut ranks = HashMap::with_capacity(pairs.len());
  let mut current_rank = 0u32;
  let mut last_score: Option<S> = None;

  for (key, score) in sorted {
    if last_score != Some(*score) {
      current_rank += 1;
      last_score = Some(*score);
    }
    ranks.insert(key.clone(), current_rank);
  }

  ranks
}

// ─── Per-participant aggregation ─────────────────────────────────────────────

/// Rank every entry of the event once per participant.
///
/// Entries the participant never scored count as zero; absence is a real
/// value here, not an error. Output participants are ordered by name (id as
/// tie-break), not by join order; each participant's rows are ordered by
/// score descending, then entry id.
pub fn compute_per_participant(
  entries:      &[Entry],
  participants: &[Participant],
  scores:       &ScoresByParticipant,
) -> Vec<ParticipantResult> {
  let entry_names: HashMap<&str, &str> =
    entries.iter().map(|e| (e.id.as_str(), e.name.as_str())).collect();

  let mut ordered: Vec<&Participant> = participants.iter().collect();
  ordered.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

  let no_scores = HashMap::new();

  ordered
    .into_iter()
    .map(|participant| {
      let score_map = scores.get(&participant.id).unwrap_or(&no_scores);
      let mut pairs: Vec<(String, u32)> = entries
        .iter()
        .map(|e| (e.id.clone(), score_map.get(&e.id).copied().unwrap_or(0)))
        .collect();
      let ranks = dense_rank_desc(&pairs);
      pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

      let rankings = pairs
        .into_iter()
        .map(|(entry_id, score)| RankingRow {
          entry_name: entry_names[entry_id.as_str()].to_owned(),
          rank: ranks[&entry_id],
          entry_id,
          score,
        })
        .collect();

      ParticipantResult {
        participant_id:   participant.id.clone(),
        participant_name: participant.name.clone(),
        rankings,
      }
    })
    .collect()
}

// ─── Overall aggregation ─────────────────────────────────────────────────────

/// Sum each entry's score across all participants and rank the totals.
///
/// A participant that never scored an entry contributes zero, so the result
/// is independent of participant iteration order and a participant with no
/// submissions changes nothing. Scores recorded against entry ids that are
/// not part of the event are ignored. Rows are ordered by total descending,
/// then entry id.
pub fn compute_overall(entries: &[Entry], scores: &ScoresByParticipant) -> Vec<OverallRow> {
  let mut totals: HashMap<&str, u64> = HashMap::new();
  for score_map in scores.values() {
    for (entry_id, score) in score_map {
      *totals.entry(entry_id.as_str()).or_insert(0) += u64::from(*score);
    }
  }

  let mut pairs: Vec<(String, u64)> = entries
    .iter()
    .map(|e| (e.id.clone(), totals.get(e.id.as_str()).copied().unwrap_or(0)))
    .collect();
  let ranks = dense_rank_desc(&pairs);
  pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

  let entry_names: HashMap<&str, &str> =
    entries.iter().map(|e| (e.id.as_str(), e.name.as_str())).collect();

  pairs
    .into_iter()
    .map(|(entry_id, total_score)| OverallRow {
      entry_name: entry_names[entry_id.as_str()].to_owned(),
      rank: ranks[&entry_id],
      entry_id,
      total_score,
    })
    .collect()
}
