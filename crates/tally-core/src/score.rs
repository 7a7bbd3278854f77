//! Score records.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Inclusive upper bound for a single score value.
pub const SCORE_MAX: u32 = 100;

/// One participant's score for one entry.
///
/// The authoritative record is keyed by `(event_id, participant_id,
/// entry_id)`; a later write for the same key overwrites the earlier one.
/// No history is retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreItem {
  pub entry_id: String,
  pub score:    u32,
}

impl ScoreItem {
  /// Check the `0..=100` range contract.
  pub fn validate(&self) -> Result<()> {
    if self.score > SCORE_MAX {
      return Err(Error::ScoreOutOfRange(self.score));
    }
    Ok(())
  }
}
