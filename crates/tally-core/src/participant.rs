//! Participants — anonymous scorers identified by a bearer secret.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  id::{KEY_PREFIX, PARTICIPANT_PREFIX, new_id},
};

/// Maximum length of a participant name, in characters, after trimming.
pub const NAME_MAX_CHARS: usize = 30;

/// An anonymous scorer within one event.
///
/// `participant_key` is the bearer secret required to submit or overwrite
/// this participant's scores. It is handed to the joining client exactly
/// once; the API never echoes it back afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
  pub id:              String,
  pub name:            String,
  pub participant_key: String,
}

impl Participant {
  /// Build a new participant from a raw display name.
  ///
  /// The name is trimmed; fails when it is blank or too long afterwards.
  pub fn create(name: &str) -> Result<Self> {
    let name = name.trim();
    if name.is_empty() {
      return Err(Error::BlankParticipantName);
    }
    if name.chars().count() > NAME_MAX_CHARS {
      return Err(Error::ParticipantNameTooLong(NAME_MAX_CHARS));
    }
    Ok(Self {
      id:              new_id(PARTICIPANT_PREFIX),
      name:            name.to_owned(),
      participant_key: new_id(KEY_PREFIX),
    })
  }
}
