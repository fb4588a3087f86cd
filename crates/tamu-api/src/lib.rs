//! JSON REST API for the Tamu visitor log.
//!
//! Exposes an axum [`Router`] backed by any [`tamu_core::store::GuestStore`].
//! Public routes serve the kiosk; everything under `/admin` requires an
//! [`session::AdminSession`]. TLS and path obfuscation are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tamu_api::api_router(state.clone()))
//! ```

pub mod error;
pub mod export;
pub mod guests;
pub mod intake;
pub mod keyword;
pub mod session;
pub mod stats;

use std::sync::Arc;

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use chrono::{DateTime, FixedOffset, Utc};
use tamu_core::store::GuestStore;

pub use error::ApiError;
pub use session::{AdminSession, SessionConfig};

/// Request bodies carry a base64 photo of up to 5 MiB decoded.
const BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:   Arc<S>,
  pub session: Arc<SessionConfig>,
  /// Offset of the office's local calendar, used by every report.
  pub offset:  FixedOffset,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      session: Arc::clone(&self.session),
      offset:  self.offset,
    }
  }
}

impl<S> ApiState<S> {
  /// The current instant on the office's local calendar.
  pub fn now(&self) -> DateTime<FixedOffset> { Utc::now().with_timezone(&self.offset) }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: GuestStore + 'static,
{
  Router::new()
    // Kiosk
    .route("/purposes", get(intake::purposes))
    .route("/guests", post(intake::create::<S>))
    // Session
    .route("/admin/login", post(session::login::<S>))
    .route("/admin/logout", post(session::logout))
    // Keyword
    .route("/admin/keyword", get(keyword::get_current::<S>).put(keyword::update::<S>))
    // Guests
    .route("/admin/guests", get(guests::list::<S>))
    .route("/admin/guests/{id}", get(guests::get_one::<S>).delete(guests::delete_one::<S>))
    .route("/admin/guests/{id}/photo", get(guests::photo::<S>))
    // Reports
    .route("/admin/statistics", get(stats::statistics::<S>))
    .route("/admin/export", get(export::download::<S>))
    .layer(DefaultBodyLimit::max(BODY_LIMIT))
    .with_state(state)
}
