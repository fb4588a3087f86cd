//! Error type for `tamu-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A guest row points at a photo hash that has no stored bytes.
  #[error("photo {0} missing for guest")]
  PhotoMissing(String),

  #[error("keyword not found: {0}")]
  KeywordNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
