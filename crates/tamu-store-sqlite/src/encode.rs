//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 UTC strings with exactly three fractional digits,
//! so lexical order in SQL matches chronological order. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use tamu_core::{
  guest::{GuestRecord, PhotoRef},
  keyword::Keyword,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const GUEST_COLUMNS: &str = "g.guest_id, g.name, g.phone, g.company, g.purpose, \
                                 g.photo_hash, p.media_type, g.officer, g.timestamp";

/// Raw strings read from a `guests` row joined with its photo's media type.
pub struct RawGuest {
  pub guest_id:   String,
  pub name:       String,
  pub phone:      Option<String>,
  pub company:    Option<String>,
  pub purpose:    String,
  pub photo_hash: String,
  pub media_type: Option<String>,
  pub officer:    String,
  pub timestamp:  Option<String>,
}

impl RawGuest {
  /// Read a row selected with [`GUEST_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      guest_id:   row.get(0)?,
      name:       row.get(1)?,
      phone:      row.get(2)?,
      company:    row.get(3)?,
      purpose:    row.get(4)?,
      photo_hash: row.get(5)?,
      media_type: row.get(6)?,
      officer:    row.get(7)?,
      timestamp:  row.get(8)?,
    })
  }

  pub fn into_record(self) -> Result<GuestRecord> {
    let Some(media_type) = self.media_type else {
      return Err(Error::PhotoMissing(self.photo_hash));
    };
    Ok(GuestRecord {
      id:        decode_uuid(&self.guest_id)?,
      name:      self.name,
      phone:     self.phone,
      company:   self.company,
      purpose:   self.purpose,
      photo:     PhotoRef { content_hash: self.photo_hash, media_type },
      officer:   self.officer,
      timestamp: self.timestamp.as_deref().map(decode_dt).transpose()?,
    })
  }
}

pub const KEYWORD_COLUMNS: &str =
  "keyword_id, value, officer, active, created_at, updated_at";

/// Raw values read from a `keywords` row.
pub struct RawKeyword {
  pub keyword_id: String,
  pub value:      String,
  pub officer:    String,
  pub active:     bool,
  pub created_at: String,
  pub updated_at: Option<String>,
}

impl RawKeyword {
  /// Read a row selected with [`KEYWORD_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      keyword_id: row.get(0)?,
      value:      row.get(1)?,
      officer:    row.get(2)?,
      active:     row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
    })
  }

  pub fn into_keyword(self) -> Result<Keyword> {
    Ok(Keyword {
      id:         decode_uuid(&self.keyword_id)?,
      value:      self.value,
      officer:    self.officer,
      active:     self.active,
      created_at: decode_dt(&self.created_at)?,
      updated_at: self.updated_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}
