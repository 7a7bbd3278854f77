//! Opaque, prefix-scoped identifier generation.
//!
//! Identifiers look like `evt_3f2e…`: an entity-type prefix followed by
//! 128 bits of randomness in lowercase hex. Uniqueness is probabilistic;
//! nothing ever checks a fresh id against existing records.

use uuid::Uuid;

/// Prefix for event ids.
pub const EVENT_PREFIX: &str = "evt";
/// Prefix for entry ids.
pub const ENTRY_PREFIX: &str = "ent";
/// Prefix for participant ids.
pub const PARTICIPANT_PREFIX: &str = "p";
/// Prefix for participant bearer keys.
pub const KEY_PREFIX: &str = "k";

/// Generate a fresh `{prefix}_{32-hex-chars}` identifier.
pub fn new_id(prefix: &str) -> String {
  format!("{prefix}_{}", Uuid::new_v4().as_simple())
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn id_is_prefix_underscore_128_bit_hex() {
    let id = new_id(EVENT_PREFIX);
    let (prefix, hex) = id.split_once('_').unwrap();
    assert_eq!(prefix, "evt");
    assert_eq!(hex.len(), 32);
    assert!(hex.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
  }

  #[test]
  fn ids_do_not_repeat() {
    let ids: HashSet<_> = (0..1000).map(|_| new_id(PARTICIPANT_PREFIX)).collect();
    assert_eq!(ids.len(), 1000);
  }
}
