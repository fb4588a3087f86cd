//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use tamu_core::{FlowError, ValidationError};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("admin session required")]
  Unauthorized,

  #[error("invalid keyword")]
  InvalidKeyword,

  #[error("not found: {0}")]
  NotFound(String),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("no guest data to export")]
  NothingToExport,

  #[error("export failed: {0}")]
  Export(String),

  #[error("session token could not be signed: {0}")]
  Session(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    ApiError::Store(Box::new(e))
  }
}

impl<E> From<FlowError<E>> for ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  fn from(e: FlowError<E>) -> Self {
    match e {
      FlowError::Validation(v) => ApiError::Validation(v),
      FlowError::InvalidKeyword => ApiError::InvalidKeyword,
      FlowError::Store(e) => ApiError::store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(e: JsonRejection) -> Self { ApiError::BadRequest(e.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(e: QueryRejection) -> Self { ApiError::BadRequest(e.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(e: PathRejection) -> Self { ApiError::BadRequest(e.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
      ApiError::InvalidKeyword => (StatusCode::FORBIDDEN, self.to_string()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
      ApiError::NothingToExport => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
      ApiError::Export(m) => {
        tracing::error!(error = %m, "export failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "export failed".to_owned())
      }
      ApiError::Session(m) => {
        tracing::error!(error = %m, "session signing failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "repository failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
