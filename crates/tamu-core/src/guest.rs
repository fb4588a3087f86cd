//! Guest records, one entry per visit.
//!
//! A record is written once by the intake flow and never updated afterwards;
//! the only later mutation is deletion by an administrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::photo::Photo;

/// Reference to a captured photo; the bytes live in the store, keyed by hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
  /// SHA-256 hex digest of the image bytes.
  pub content_hash: String,
  pub media_type:   String,
}

/// A persisted visit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
  pub id:        Uuid,
  pub name:      String,
  pub phone:     Option<String>,
  pub company:   Option<String>,
  /// Resolved label: a catalog label or the visitor's own description.
  pub purpose:   String,
  pub photo:     PhotoRef,
  /// Duty officer copied from the keyword that admitted this visit.
  pub officer:   String,
  /// Store-assigned creation instant. Rows carried over from older data may
  /// lack one; such records only show up in unfiltered views.
  pub timestamp: Option<DateTime<Utc>>,
}

/// Input to [`crate::store::GuestStore::insert_guest`].
/// `id` and `timestamp` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewGuest {
  pub name:    String,
  pub phone:   Option<String>,
  pub company: Option<String>,
  pub purpose: String,
  pub photo:   Photo,
  pub officer: String,
}
