//! Events and their entries.
//!
//! An event owns a fixed, ordered list of entries. Both are immutable after
//! creation; rankings are always computed from current score state on read,
//! never written back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  id::{ENTRY_PREFIX, EVENT_PREFIX, new_id},
};

/// Maximum length of an event title, in characters, after trimming.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum number of entry names accepted per event, counted before blank
/// names are filtered out.
pub const MAX_ENTRIES: usize = 50;

/// A contestant or option being scored within an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
  pub id:   String,
  pub name: String,
}

/// The top-level scoring session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  pub id:         String,
  pub title:      String,
  pub entries:    Vec<Entry>,
  pub created_at: DateTime<Utc>,
}

impl Event {
  /// Build a new event from raw request input.
  ///
  /// The title and every entry name are trimmed; blank entry names are
  /// silently dropped. Fails when the trimmed title is blank or too long,
  /// when more than [`MAX_ENTRIES`] names are supplied, or when no non-blank
  /// entry name remains.
  pub fn create(title: &str, entry_names: &[String]) -> Result<Self> {
    let title = title.trim();
    if title.is_empty() {
      return Err(Error::BlankTitle);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
      return Err(Error::TitleTooLong(TITLE_MAX_CHARS));
    }
    if entry_names.len() > MAX_ENTRIES {
      return Err(Error::TooManyEntries(MAX_ENTRIES));
    }

    let entries: Vec<Entry> = entry_names
      .iter()
      .map(|name| name.trim())
      .filter(|name| !name.is_empty())
      .map(|name| Entry {
        id:   new_id(ENTRY_PREFIX),
        name: name.to_owned(),
      })
      .collect();
    if entries.is_empty() {
      return Err(Error::NoEntries);
    }

    Ok(Self {
      id: new_id(EVENT_PREFIX),
      title: title.to_owned(),
      entries,
      created_at: Utc::now(),
    })
  }
}
