//! Webcam captures arriving as `data:` URLs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use sha2::{Digest, Sha256};

use crate::{error::PhotoError, guest::PhotoRef};

/// Upper bound on the decoded image size.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// A decoded image payload together with its content hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
  pub media_type:   String,
  pub content_hash: String,
  pub data:         Vec<u8>,
}

impl std::fmt::Debug for Photo {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Photo")
      .field("media_type", &self.media_type)
      .field("content_hash", &self.content_hash)
      .field("len", &self.data.len())
      .finish()
  }
}

impl Photo {
  /// Build a photo from raw bytes, computing its hash.
  pub fn new(media_type: impl Into<String>, data: Vec<u8>) -> Self {
    let content_hash = hex::encode(Sha256::digest(&data));
    Self { media_type: media_type.into(), content_hash, data }
  }

  /// Parse `data:image/jpeg;base64,<payload>` as produced by a browser
  /// canvas or webcam screenshot.
  pub fn from_data_url(url: &str) -> Result<Self, PhotoError> {
    let rest = url.trim().strip_prefix("data:").ok_or(PhotoError::NotDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(PhotoError::NotDataUrl)?;
    let media_type = header
      .strip_suffix(";base64")
      .ok_or(PhotoError::NotDataUrl)?
      .to_ascii_lowercase();

    if !media_type.starts_with("image/") {
      return Err(PhotoError::NotImage(media_type));
    }

    // Base64 inflates by 4/3; reject oversized payloads before decoding.
    if payload.len() / 4 * 3 > MAX_PHOTO_BYTES + 3 {
      return Err(PhotoError::TooLarge(payload.len() / 4 * 3, MAX_PHOTO_BYTES));
    }

    let data = B64.decode(payload).map_err(|_| PhotoError::Base64)?;
    if data.is_empty() {
      return Err(PhotoError::Empty);
    }
    if data.len() > MAX_PHOTO_BYTES {
      return Err(PhotoError::TooLarge(data.len(), MAX_PHOTO_BYTES));
    }

    Ok(Self::new(media_type, data))
  }

  pub fn reference(&self) -> PhotoRef {
    PhotoRef {
      content_hash: self.content_hash.clone(),
      media_type:   self.media_type.clone(),
    }
  }
}
