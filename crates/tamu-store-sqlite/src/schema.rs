//! SQL schema for the Tamu SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Image bytes, shared by every guest row with the same content hash.
CREATE TABLE IF NOT EXISTS photos (
    content_hash TEXT PRIMARY KEY,   -- SHA-256 hex
    media_type   TEXT NOT NULL,
    data         BLOB NOT NULL
);

-- One row per visit. Written once; only ever deleted afterwards.
CREATE TABLE IF NOT EXISTS guests (
    guest_id   TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    phone      TEXT,
    company    TEXT,
    purpose    TEXT NOT NULL,
    photo_hash TEXT NOT NULL REFERENCES photos(content_hash),
    officer    TEXT NOT NULL,
    timestamp  TEXT              -- RFC 3339 UTC, millisecond precision
);

CREATE TABLE IF NOT EXISTS keywords (
    keyword_id TEXT PRIMARY KEY,
    value      TEXT NOT NULL,    -- lower-cased
    officer    TEXT NOT NULL,
    active     INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT
);

CREATE INDEX IF NOT EXISTS guests_timestamp_idx ON guests(timestamp);
CREATE INDEX IF NOT EXISTS guests_photo_idx     ON guests(photo_hash);
CREATE INDEX IF NOT EXISTS keywords_active_idx  ON keywords(active);

PRAGMA user_version = 1;
";
