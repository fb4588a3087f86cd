//! The admission keyword and its administration.
//!
//! A single keyword record is created once and then overwritten in place on
//! every change; at most one record is active at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  error::{FlowError, ValidationError},
  store::GuestStore,
  validate::{sanitize, validate_length},
};

/// The shared secret visitors type into the kiosk, plus the officer on duty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
  pub id:         Uuid,
  /// Stored lower-cased; compared case-insensitively.
  pub value:      String,
  pub officer:    String,
  pub active:     bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
}

/// Input to [`GuestStore::insert_keyword`]. New keywords start active.
#[derive(Debug, Clone)]
pub struct NewKeyword {
  pub value:   String,
  pub officer: String,
}

/// Input to [`GuestStore::update_keyword`]; replaces all mutable fields.
#[derive(Debug, Clone)]
pub struct KeywordUpdate {
  pub value:   String,
  pub officer: String,
  pub active:  bool,
}

/// What an administrator submits when changing the keyword.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordInput {
  pub value:   String,
  pub officer: String,
}

/// The keyword currently admitting visitors, if any.
pub async fn current<S: GuestStore>(store: &S) -> Result<Option<Keyword>, S::Error> {
  Ok(store.active_keywords().await?.into_iter().next())
}

/// Set the keyword and duty officer.
///
/// Updates the active record in place; failing that, re-activates the newest
/// existing record. A new record is inserted only when none exists at all.
/// There is no concurrency control: two admins racing here means the last
/// write wins.
pub async fn set<S: GuestStore>(
  store: &S,
  input: KeywordInput,
) -> Result<Keyword, FlowError<S::Error>> {
  if !validate_length(Some(&input.value), 1, 100) {
    return Err(ValidationError::KeywordValue.into());
  }
  if !validate_length(Some(&input.officer), 2, 100) {
    return Err(ValidationError::Officer.into());
  }

  let value = sanitize(&input.value).to_lowercase();
  let officer = sanitize(&input.officer);
  if value.is_empty() {
    return Err(ValidationError::KeywordValue.into());
  }
  if officer.chars().count() < 2 {
    return Err(ValidationError::Officer.into());
  }

  let existing = match current(store).await.map_err(FlowError::Store)? {
    Some(kw) => Some(kw),
    None => store
      .list_keywords()
      .await
      .map_err(FlowError::Store)?
      .into_iter()
      .next(),
  };

  let keyword = match existing {
    Some(kw) => {
      store
        .update_keyword(kw.id, KeywordUpdate { value, officer, active: true })
        .await
        .map_err(FlowError::Store)?
    }
    None => store
      .insert_keyword(NewKeyword { value, officer })
      .await
      .map_err(FlowError::Store)?,
  };

  tracing::info!(keyword_id = %keyword.id, officer = %keyword.officer, "keyword updated");
  Ok(keyword)
}
