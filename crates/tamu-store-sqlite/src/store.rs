//! [`SqliteStore`]: the SQLite implementation of [`GuestStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use tamu_core::{
  guest::{GuestRecord, NewGuest},
  keyword::{Keyword, KeywordUpdate, NewKeyword},
  photo::Photo,
  store::GuestStore,
};

use crate::{
  encode::{
    encode_dt, encode_uuid, RawGuest, RawKeyword, GUEST_COLUMNS, KEYWORD_COLUMNS,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A visitor log backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_keyword(&self, id: Uuid) -> Result<Option<Keyword>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawKeyword> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {KEYWORD_COLUMNS} FROM keywords WHERE keyword_id = ?1"),
            rusqlite::params![id_str],
            RawKeyword::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawKeyword::into_keyword).transpose()
  }

  async fn query_keywords(&self, sql: String) -> Result<Vec<Keyword>> {
    let raws: Vec<RawKeyword> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawKeyword::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawKeyword::into_keyword).collect()
  }
}

// ─── GuestStore impl ─────────────────────────────────────────────────────────

impl GuestStore for SqliteStore {
  type Error = Error;

  // ── Guests ────────────────────────────────────────────────────────────────

  async fn insert_guest(&self, input: NewGuest) -> Result<GuestRecord> {
    let record = GuestRecord {
      id:        Uuid::new_v4(),
      name:      input.name,
      phone:     input.phone,
      company:   input.company,
      purpose:   input.purpose,
      photo:     input.photo.reference(),
      officer:   input.officer,
      timestamp: Some(Utc::now().trunc_subsecs(3)),
    };

    let Photo { media_type, content_hash, data } = input.photo;
    let id_str = encode_uuid(record.id);
    let name = record.name.clone();
    let phone = record.phone.clone();
    let company = record.company.clone();
    let purpose = record.purpose.clone();
    let officer = record.officer.clone();
    let ts_str = record.timestamp.map(encode_dt);

    let stored_media_type: String = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT OR IGNORE INTO photos (content_hash, media_type, data)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![content_hash, media_type, data],
        )?;
        tx.execute(
          "INSERT INTO guests (
             guest_id, name, phone, company, purpose, photo_hash, officer, timestamp
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            name,
            phone,
            company,
            purpose,
            content_hash,
            officer,
            ts_str,
          ],
        )?;
        let stored: String = tx.query_row(
          "SELECT media_type FROM photos WHERE content_hash = ?1",
          rusqlite::params![content_hash],
          |r| r.get(0),
        )?;
        tx.commit()?;
        Ok(stored)
      })
      .await?;

    // An identical image stored earlier keeps its original media type.
    let mut record = record;
    record.photo.media_type = stored_media_type;
    Ok(record)
  }

  async fn list_guests(&self) -> Result<Vec<GuestRecord>> {
    let raws: Vec<RawGuest> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {GUEST_COLUMNS}
           FROM guests g
           LEFT JOIN photos p ON p.content_hash = g.photo_hash
           ORDER BY g.timestamp IS NULL, g.timestamp DESC, g.rowid DESC"
        ))?;
        let rows = stmt
          .query_map([], RawGuest::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGuest::into_record).collect()
  }

  async fn get_guest(&self, id: Uuid) -> Result<Option<GuestRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawGuest> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {GUEST_COLUMNS}
               FROM guests g
               LEFT JOIN photos p ON p.content_hash = g.photo_hash
               WHERE g.guest_id = ?1"
            ),
            rusqlite::params![id_str],
            RawGuest::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawGuest::into_record).transpose()
  }

  async fn delete_guest(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let hash: Option<String> = tx
          .query_row(
            "SELECT photo_hash FROM guests WHERE guest_id = ?1",
            rusqlite::params![id_str],
            |r| r.get(0),
          )
          .optional()?;
        let Some(hash) = hash else {
          return Ok(false);
        };

        tx.execute("DELETE FROM guests WHERE guest_id = ?1", rusqlite::params![id_str])?;
        // Drop the image once no visit refers to it any more.
        tx.execute(
          "DELETE FROM photos
           WHERE content_hash = ?1
             AND NOT EXISTS (SELECT 1 FROM guests WHERE photo_hash = ?1)",
          rusqlite::params![hash],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if deleted {
      tracing::debug!(guest_id = %id, "guest row deleted");
    }
    Ok(deleted)
  }

  async fn get_photo<'a>(&'a self, content_hash: &'a str) -> Result<Option<Photo>> {
    let hash = content_hash.to_owned();

    let row: Option<(String, Vec<u8>)> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT media_type, data FROM photos WHERE content_hash = ?1",
            rusqlite::params![hash],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?)
      })
      .await?;

    Ok(row.map(|(media_type, data)| Photo::new(media_type, data)))
  }

  // ── Keywords ──────────────────────────────────────────────────────────────

  async fn active_keywords(&self) -> Result<Vec<Keyword>> {
    self
      .query_keywords(format!(
        "SELECT {KEYWORD_COLUMNS} FROM keywords
         WHERE active = 1
         ORDER BY COALESCE(updated_at, created_at) DESC, rowid DESC"
      ))
      .await
  }

  async fn list_keywords(&self) -> Result<Vec<Keyword>> {
    self
      .query_keywords(format!(
        "SELECT {KEYWORD_COLUMNS} FROM keywords
         ORDER BY created_at DESC, rowid DESC"
      ))
      .await
  }

  async fn insert_keyword(&self, input: NewKeyword) -> Result<Keyword> {
    let keyword = Keyword {
      id:         Uuid::new_v4(),
      value:      input.value,
      officer:    input.officer,
      active:     true,
      created_at: Utc::now().trunc_subsecs(3),
      updated_at: None,
    };

    let id_str = encode_uuid(keyword.id);
    let value = keyword.value.clone();
    let officer = keyword.officer.clone();
    let at_str = encode_dt(keyword.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO keywords (keyword_id, value, officer, active, created_at)
           VALUES (?1, ?2, ?3, 1, ?4)",
          rusqlite::params![id_str, value, officer, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(keyword)
  }

  async fn update_keyword(&self, id: Uuid, update: KeywordUpdate) -> Result<Keyword> {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(Utc::now().trunc_subsecs(3));
    let KeywordUpdate { value, officer, active } = update;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE keywords
           SET value = ?2, officer = ?3, active = ?4, updated_at = ?5
           WHERE keyword_id = ?1",
          rusqlite::params![id_str, value, officer, active, at_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::KeywordNotFound(id));
    }

    self.get_keyword(id).await?.ok_or(Error::KeywordNotFound(id))
  }
}
