//! Dashboard figures.

use axum::{Json, extract::State};
use serde::Serialize;
use tamu_core::{
  keyword::{self, Keyword},
  report::{self, Statistics},
  store::GuestStore,
};

use crate::{ApiState, error::ApiError, session::AdminSession};

/// `GET /admin/statistics`, computed over every stored record.
pub async fn statistics<S>(
  _: AdminSession,
  State(state): State<ApiState<S>>,
) -> Result<Json<Statistics>, ApiError>
where
  S: GuestStore + 'static,
{
  let records = state.store.list_guests().await.map_err(ApiError::store)?;
  Ok(Json(report::summarize(&records, &state.now())))
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
  pub keyword:    Option<Keyword>,
  pub statistics: Statistics,
}

/// The admin landing view: active keyword plus statistics. Mounted by the
/// server at its internal admin route rather than under `/api`.
pub async fn dashboard<S>(
  _: AdminSession,
  State(state): State<ApiState<S>>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: GuestStore + 'static,
{
  let store = state.store.as_ref();
  let keyword = keyword::current(store).await.map_err(ApiError::store)?;
  let records = store.list_guests().await.map_err(ApiError::store)?;
  Ok(Json(Dashboard {
    keyword,
    statistics: report::summarize(&records, &state.now()),
  }))
}
