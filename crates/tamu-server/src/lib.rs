//! HTTP front for the Tamu visitor log.
//!
//! Assembles the kiosk root, the hidden admin dashboard and the JSON API
//! under `/api`, wrapped in the path obfuscation middleware and request
//! tracing.

pub mod config;
pub mod obscure;

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use tamu_api::{ApiError, ApiState, api_router, stats};
use tamu_core::store::GuestStore;
use tower::Layer as _;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
use obscure::{INTERNAL_ADMIN, ObscuredPaths};

/// Build the complete application router.
pub fn app<S>(state: ApiState<S>, paths: ObscuredPaths) -> Router
where
  S: GuestStore + 'static,
{
  let routes = Router::new()
    .route("/", get(kiosk))
    .route(INTERNAL_ADMIN, get(stats::dashboard::<S>))
    .with_state(state.clone())
    .nest("/api", api_router(state))
    .fallback(not_found);

  // Wrapping the router (rather than `Router::layer`) lets the rewrite take
  // effect before route matching.
  let obscured =
    middleware::from_fn_with_state(Arc::new(paths), obscure::obscure).layer(routes);

  Router::new()
    .fallback_service(obscured)
    .layer(TraceLayer::new_for_http())
}

async fn kiosk() -> &'static str {
  "Buku Tamu Digital KPU. Formulir kunjungan tersedia di /api/guests."
}

async fn not_found() -> ApiError { ApiError::NotFound("no such route".to_owned()) }
