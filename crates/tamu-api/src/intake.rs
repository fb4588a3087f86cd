//! Public kiosk endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/purposes` | Visit purpose catalog |
//! | `POST` | `/guests` | Body: [`GuestForm`]; 201 with the stored record |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use tamu_core::{
  intake::{self, GuestForm},
  purpose::{self, Purpose},
  store::GuestStore,
};

use crate::{ApiState, error::ApiError};

/// `GET /purposes`
pub async fn purposes() -> Json<&'static [Purpose]> { Json(purpose::CATALOG) }

/// `POST /guests`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  form: Result<Json<GuestForm>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GuestStore + 'static,
{
  let Json(form) = form?;
  let record = intake::submit(state.store.as_ref(), form).await?;
  Ok((StatusCode::CREATED, Json(record)))
}
