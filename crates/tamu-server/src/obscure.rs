//! Hides the admin dashboard behind a configurable public path.
//!
//! The dashboard is routed at [`INTERNAL_ADMIN`], which is never reachable
//! directly. Requests for `/<admin_path>` are rewritten to it before routing,
//! so the visible URL stays the secret one. The old `/admin` path and the
//! internal path both bounce to `/`.

use std::sync::Arc;

use axum::{
  extract::{Request, State},
  http::Uri,
  middleware::Next,
  response::{IntoResponse, Redirect, Response},
};

pub const INTERNAL_ADMIN: &str = "/admin-internal";
const LEGACY_ADMIN: &str = "/admin";

/// First path segments that are never inspected.
const PASSTHROUGH: [&str; 4] = ["api", "static", "images", "favicon.ico"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Rewrite,
  Redirect,
  Pass,
}

#[derive(Debug, Clone)]
pub struct ObscuredPaths {
  public: String,
}

impl ObscuredPaths {
  /// `admin_path` may be given with or without its leading `/`.
  pub fn new(admin_path: &str) -> Self {
    Self { public: format!("/{}", admin_path.trim_start_matches('/')) }
  }

  pub fn public(&self) -> &str { &self.public }

  pub fn action(&self, path: &str) -> Action {
    let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
    if PASSTHROUGH.contains(&first) {
      return Action::Pass;
    }
    if path == self.public {
      Action::Rewrite
    } else if path == INTERNAL_ADMIN || path == LEGACY_ADMIN {
      Action::Redirect
    } else {
      Action::Pass
    }
  }
}

/// Middleware entry point; must wrap the router, not be layered inside it.
pub async fn obscure(
  State(paths): State<Arc<ObscuredPaths>>,
  mut req: Request,
  next: Next,
) -> Response {
  match paths.action(req.uri().path()) {
    Action::Pass => next.run(req).await,
    Action::Redirect => {
      tracing::debug!(path = req.uri().path(), "hidden admin path probed");
      Redirect::temporary("/").into_response()
    }
    Action::Rewrite => {
      let target = match req.uri().query() {
        Some(q) => format!("{INTERNAL_ADMIN}?{q}"),
        None => INTERNAL_ADMIN.to_owned(),
      };
      match target.parse::<Uri>() {
        Ok(uri) => *req.uri_mut() = uri,
        Err(e) => tracing::warn!(error = %e, "could not rewrite admin path"),
      }
      next.run(req).await
    }
  }
}
