//! The `GuestStore` trait: the record repository behind intake and admin.
//!
//! Implemented by storage backends (e.g. `tamu-store-sqlite`). Every call may
//! suspend on I/O and may fail; callers treat each one as independent and
//! atomic per record, with no cross-record transactions.

use std::future::Future;

use uuid::Uuid;

use crate::{
  guest::{GuestRecord, NewGuest},
  keyword::{Keyword, KeywordUpdate, NewKeyword},
  photo::Photo,
};

/// Abstraction over a visitor-log backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait GuestStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Guests ────────────────────────────────────────────────────────────

  /// Persist a new visit. The store assigns `id` and `timestamp` and keeps
  /// the photo bytes alongside, deduplicated by content hash.
  fn insert_guest(
    &self,
    input: NewGuest,
  ) -> impl Future<Output = Result<GuestRecord, Self::Error>> + Send + '_;

  /// Every record, newest first. Records without a timestamp come last.
  fn list_guests(
    &self,
  ) -> impl Future<Output = Result<Vec<GuestRecord>, Self::Error>> + Send + '_;

  /// Retrieve one record. Returns `None` if not found.
  fn get_guest(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<GuestRecord>, Self::Error>> + Send + '_;

  /// Delete a record. Returns `false` when no record had that id.
  fn delete_guest(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Fetch the image bytes behind a [`crate::guest::PhotoRef`].
  fn get_photo<'a>(
    &'a self,
    content_hash: &'a str,
  ) -> impl Future<Output = Result<Option<Photo>, Self::Error>> + Send + 'a;

  // ── Keywords ──────────────────────────────────────────────────────────

  /// Keywords with `active = true`.
  fn active_keywords(
    &self,
  ) -> impl Future<Output = Result<Vec<Keyword>, Self::Error>> + Send + '_;

  /// All keyword records, newest first.
  fn list_keywords(
    &self,
  ) -> impl Future<Output = Result<Vec<Keyword>, Self::Error>> + Send + '_;

  fn insert_keyword(
    &self,
    input: NewKeyword,
  ) -> impl Future<Output = Result<Keyword, Self::Error>> + Send + '_;

  /// Overwrite a keyword in place and stamp `updated_at`. Errors if the id is
  /// unknown.
  fn update_keyword(
    &self,
    id: Uuid,
    update: KeywordUpdate,
  ) -> impl Future<Output = Result<Keyword, Self::Error>> + Send + '_;
}
