//! Error types for `tamu-core`.

use thiserror::Error;

/// A field failed a length or shape check. Nothing was persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("a photo must be captured before submitting")]
  PhotoMissing,

  #[error("photo is not a valid image: {0}")]
  Photo(#[from] PhotoError),

  #[error("name must be 2-100 characters")]
  Name,

  #[error("phone number format is invalid, e.g. 081234567890")]
  Phone,

  #[error("company must be at most 200 characters")]
  Company,

  #[error("unknown visit purpose: {0:?}")]
  UnknownPurpose(String),

  #[error("visit purpose must be 3-200 characters")]
  OtherPurpose,

  #[error("keyword must be 1-100 characters")]
  KeywordValue,

  #[error("duty officer name must be 2-100 characters")]
  Officer,
}

/// Why a `data:` URL could not be turned into a [`crate::photo::Photo`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
  #[error("not a base64 data URL")]
  NotDataUrl,

  #[error("media type {0:?} is not an image")]
  NotImage(String),

  #[error("invalid base64 payload")]
  Base64,

  #[error("payload is empty")]
  Empty,

  #[error("payload is {0} bytes, limit is {1}")]
  TooLarge(usize, usize),
}

/// Failure of a multi-step flow (intake, keyword administration) that talks to
/// a [`crate::store::GuestStore`] with error type `E`.
#[derive(Debug, Error)]
pub enum FlowError<E> {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("invalid keyword")]
  InvalidKeyword,

  #[error("repository error: {0}")]
  Store(#[source] E),
}
