//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Timestamps are ISO 8601 UTC text with millisecond precision
-- (YYYY-MM-DDTHH:MM:SS.sssZ) so string comparison is chronological.
CREATE TABLE IF NOT EXISTS constituents (
    id              TEXT PRIMARY KEY,          -- ULID; server-assigned
    email           TEXT NOT NULL UNIQUE,      -- lowercased; upsert key
    name            TEXT,
    phone           TEXT,
    address         TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    unsubscribed_at TEXT
);

CREATE INDEX IF NOT EXISTS constituents_created_at_idx ON constituents(created_at);

PRAGMA user_version = 1;
";
