//! Admin login and the signed session token that guards admin routes.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/admin/login` | Body: `{"password":"..."}`; sets the session cookie |
//! | `POST` | `/admin/logout` | Clears the session cookie |
//!
//! The session is a stateless HS256 JWT. Handlers opt in by taking an
//! [`AdminSession`] argument, which accepts `Authorization: Bearer <token>`
//! and falls back to the `tamu_session` cookie.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  Json,
  extract::{FromRequestParts, State, rejection::JsonRejection},
  http::{header, request::Parts},
  response::IntoResponse,
};
use axum_extra::{
  TypedHeader,
  headers::{Authorization, Cookie, authorization::Bearer},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tamu_core::store::GuestStore;

use crate::{ApiState, error::ApiError};

pub const COOKIE_NAME: &str = "tamu_session";

const SUBJECT: &str = "admin";

/// Credentials and signing material for admin sessions.
#[derive(Clone)]
pub struct SessionConfig {
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub secret:        String,
  pub ttl:           Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
  pub sub: String,
  pub iat: i64,
  pub exp: i64,
}

impl SessionConfig {
  pub fn verify_password(&self, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
      tracing::error!("configured admin password hash is not a valid PHC string");
      return false;
    };
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .is_ok()
  }

  /// Sign a token valid from `now` for [`SessionConfig::ttl`].
  pub fn issue(&self, now: DateTime<Utc>) -> Result<(String, DateTime<Utc>), ApiError> {
    let expires_at = now + self.ttl;
    let claims = Claims {
      sub: SUBJECT.to_owned(),
      iat: now.timestamp(),
      exp: expires_at.timestamp(),
    };
    let token = encode(
      &Header::default(),
      &claims,
      &EncodingKey::from_secret(self.secret.as_bytes()),
    )
    .map_err(|e| ApiError::Session(e.to_string()))?;
    Ok((token, expires_at))
  }

  /// Check signature, expiry and subject.
  pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
    let data = decode::<Claims>(
      token,
      &DecodingKey::from_secret(self.secret.as_bytes()),
      &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized)?;
    if data.claims.sub != SUBJECT {
      return Err(ApiError::Unauthorized);
    }
    Ok(data.claims)
  }
}

// ─── Extractor ────────────────────────────────────────────────────────────────

/// Present in a handler's arguments means the caller holds a valid session.
#[derive(Debug)]
pub struct AdminSession(pub Claims);

impl<S> FromRequestParts<ApiState<S>> for AdminSession
where
  S: GuestStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &ApiState<S>,
  ) -> Result<Self, Self::Rejection> {
    let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
      .await
      .ok()
      .map(|TypedHeader(auth)| auth.token().to_owned());

    let token = match bearer {
      Some(t) => t,
      None => TypedHeader::<Cookie>::from_request_parts(parts, state)
        .await
        .ok()
        .and_then(|TypedHeader(cookie)| cookie.get(COOKIE_NAME).map(str::to_owned))
        .ok_or(ApiError::Unauthorized)?,
    };

    state.session.verify(&token).map(AdminSession)
  }
}

// ─── Login / logout ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub token:      String,
  pub expires_at: DateTime<Utc>,
}

/// `POST /admin/login`
pub async fn login<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GuestStore + 'static,
{
  let Json(body) = body?;
  if !state.session.verify_password(&body.password) {
    tracing::warn!("admin login rejected");
    return Err(ApiError::Unauthorized);
  }

  let (token, expires_at) = state.session.issue(Utc::now())?;
  let cookie = format!(
    "{COOKIE_NAME}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
    state.session.ttl.num_seconds()
  );
  tracing::info!(%expires_at, "admin session issued");

  Ok((
    [(header::SET_COOKIE, cookie)],
    Json(LoginResponse { token, expires_at }),
  ))
}

/// `POST /admin/logout`
pub async fn logout() -> impl IntoResponse {
  let cookie = format!("{COOKIE_NAME}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0");
  ([(header::SET_COOKIE, cookie)], axum::http::StatusCode::NO_CONTENT)
}
