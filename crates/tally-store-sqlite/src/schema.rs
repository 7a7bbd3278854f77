//! SQL schema for the Tally SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS records (
    pk      TEXT NOT NULL,   -- partition key: EVENT#{event_id}
    sk      TEXT NOT NULL,   -- sort key: META | PARTICIPANT#{pid} | SCORE#{pid}#{entry_id}
    payload TEXT NOT NULL,   -- JSON body of the record
    PRIMARY KEY (pk, sk)
);

PRAGMA user_version = 1;
";
