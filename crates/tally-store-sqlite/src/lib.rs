//! SQLite backend for the Tally event store.
//!
//! One key-value table holds every record, addressed by partition and sort
//! key: event metadata at `EVENT#{id}` / `META`, participants at
//! `PARTICIPANT#{pid}`, scores at `SCORE#{pid}#{entry_id}`. Payloads are
//! JSON. Wraps [`tokio_rusqlite`] so database access runs on a dedicated
//! thread without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub use store::SqliteStore;
