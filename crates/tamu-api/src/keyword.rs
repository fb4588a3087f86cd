//! Handlers for `/admin/keyword`.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use tamu_core::{
  keyword::{self, Keyword, KeywordInput},
  store::GuestStore,
};

use crate::{ApiState, error::ApiError, session::AdminSession};

/// `GET /admin/keyword`: the active keyword, or `null`.
pub async fn get_current<S>(
  _: AdminSession,
  State(state): State<ApiState<S>>,
) -> Result<Json<Option<Keyword>>, ApiError>
where
  S: GuestStore + 'static,
{
  let current = keyword::current(state.store.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(current))
}

/// `PUT /admin/keyword`, body: `{"value":"...","officer":"..."}`
pub async fn update<S>(
  _: AdminSession,
  State(state): State<ApiState<S>>,
  body: Result<Json<KeywordInput>, JsonRejection>,
) -> Result<Json<Keyword>, ApiError>
where
  S: GuestStore + 'static,
{
  let Json(input) = body?;
  let updated = keyword::set(state.store.as_ref(), input).await?;
  Ok(Json(updated))
}
