//! Runtime configuration: an optional TOML file layered under `TAMU_*`
//! environment variables.

use std::path::{Path, PathBuf};

use chrono::{Duration, FixedOffset};
use serde::Deserialize;
use tamu_api::SessionConfig;
use thiserror::Error;

use crate::obscure::ObscuredPaths;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to load configuration: {0}")]
  Load(#[from] config::ConfigError),

  #[error("utc_offset_minutes {0} is out of range")]
  InvalidOffset(i32),

  #[error("session_ttl_minutes must be positive, got {0}")]
  InvalidTtl(i64),

  #[error("session_secret must not be empty")]
  EmptySecret,
}

/// Runtime server configuration.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  #[serde(default = "default_store_path")]
  pub store_path:          PathBuf,
  /// Public path segment that reaches the admin dashboard.
  #[serde(default = "default_admin_path")]
  pub admin_path:          String,
  /// argon2 PHC string; generate with `--hash-password`.
  pub admin_password_hash: String,
  pub session_secret:      String,
  #[serde(default = "default_session_ttl")]
  pub session_ttl_minutes: i64,
  /// Offset of the office's calendar; 420 is WIB (UTC+7).
  #[serde(default = "default_utc_offset")]
  pub utc_offset_minutes:  i32,
}

fn default_host() -> String { "0.0.0.0".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("tamu.db") }
fn default_admin_path() -> String { "admin-kpu-2025".to_owned() }
fn default_session_ttl() -> i64 { 480 }
fn default_utc_offset() -> i32 { 420 }

impl ServerConfig {
  /// Read `path` if it exists, then apply `TAMU_*` overrides.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("TAMU").try_parsing(true))
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
    self
      .utc_offset_minutes
      .checked_mul(60)
      .and_then(FixedOffset::east_opt)
      .ok_or(ConfigError::InvalidOffset(self.utc_offset_minutes))
  }

  pub fn session(&self) -> Result<SessionConfig, ConfigError> {
    if self.session_ttl_minutes <= 0 {
      return Err(ConfigError::InvalidTtl(self.session_ttl_minutes));
    }
    if self.session_secret.is_empty() {
      return Err(ConfigError::EmptySecret);
    }
    Ok(SessionConfig {
      password_hash: self.admin_password_hash.clone(),
      secret:        self.session_secret.clone(),
      ttl:           Duration::minutes(self.session_ttl_minutes),
    })
  }

  pub fn obscured_paths(&self) -> ObscuredPaths { ObscuredPaths::new(&self.admin_path) }
}
