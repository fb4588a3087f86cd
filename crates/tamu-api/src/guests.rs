//! Handlers for `/admin/guests` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/admin/guests` | `?filter=all\|today\|week\|month\|custom&start=&end=` |
//! | `GET`    | `/admin/guests/{id}` | 404 if not found |
//! | `DELETE` | `/admin/guests/{id}` | 204, or 404 if not found |
//! | `GET`    | `/admin/guests/{id}/photo` | Image bytes with a content-hash ETag |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{PathRejection, QueryRejection},
  },
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tamu_core::{
  format,
  guest::GuestRecord,
  report::{self, FilterSpec},
  store::GuestStore,
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError, session::AdminSession};

// ─── List ─────────────────────────────────────────────────────────────────────

/// Filter selection shared by listing and export.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub filter: Option<String>,
  pub start:  Option<NaiveDate>,
  pub end:    Option<NaiveDate>,
}

impl ListParams {
  pub fn spec(&self) -> FilterSpec {
    FilterSpec::from_query(self.filter.as_deref(), self.start, self.end)
  }
}

/// A record as shown in the admin table.
#[derive(Debug, Serialize)]
pub struct GuestRow {
  #[serde(flatten)]
  pub record:     GuestRecord,
  /// Local visit time, e.g. `"01 Januari 2025 pukul 10.00"`.
  pub visit_time: String,
}

#[derive(Debug, Serialize)]
pub struct GuestList {
  pub label:  String,
  pub guests: Vec<GuestRow>,
}

/// `GET /admin/guests[?filter=<kind>&start=<date>&end=<date>]`
pub async fn list<S>(
  _: AdminSession,
  State(state): State<ApiState<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<GuestList>, ApiError>
where
  S: GuestStore + 'static,
{
  let Query(params) = params?;
  let spec = params.spec();
  let records = state.store.list_guests().await.map_err(ApiError::store)?;
  let now = state.now();

  let guests = report::filter(&records, &spec, &now)
    .into_iter()
    .map(|r| GuestRow {
      visit_time: format::visit_time(r.timestamp, &state.offset),
      record:     r.clone(),
    })
    .collect();

  Ok(Json(GuestList { label: spec.label(), guests }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /admin/guests/{id}`
pub async fn get_one<S>(
  _: AdminSession,
  State(state): State<ApiState<S>>,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<GuestRecord>, ApiError>
where
  S: GuestStore + 'static,
{
  let Path(id) = id?;
  state
    .store
    .get_guest(id)
    .await
    .map_err(ApiError::store)?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("guest {id}")))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /admin/guests/{id}`
pub async fn delete_one<S>(
  _: AdminSession,
  State(state): State<ApiState<S>>,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: GuestStore + 'static,
{
  let Path(id) = id?;
  if !state.store.delete_guest(id).await.map_err(ApiError::store)? {
    return Err(ApiError::NotFound(format!("guest {id}")));
  }
  tracing::info!(guest_id = %id, "guest deleted");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Photo ────────────────────────────────────────────────────────────────────

/// `GET /admin/guests/{id}/photo`
///
/// Photos never change, so the content hash doubles as a strong ETag.
pub async fn photo<S>(
  _: AdminSession,
  State(state): State<ApiState<S>>,
  id: Result<Path<Uuid>, PathRejection>,
  headers: HeaderMap,
) -> Result<Response, ApiError>
where
  S: GuestStore + 'static,
{
  let Path(id) = id?;
  let guest = state
    .store
    .get_guest(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("guest {id}")))?;

  let etag = format!("\"{}\"", guest.photo.content_hash);
  let cached = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|v| v == etag);
  if cached {
    return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
  }

  let photo = state
    .store
    .get_photo(&guest.photo.content_hash)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("photo for guest {id}")))?;

  Ok(
    (
      [
        (header::CONTENT_TYPE, photo.media_type),
        (header::ETAG, etag),
        (header::CACHE_CONTROL, "private, max-age=86400".to_owned()),
      ],
      photo.data,
    )
      .into_response(),
  )
}
