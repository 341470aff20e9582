//! Runtime configuration resolved from environment variables.

use std::env;
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::domain::LocaleCode;

pub const DEFAULT_PORT: u16 = 8084;
pub const DEFAULT_NATS_SUBJECT: &str = "conversions.events";
pub const DEFAULT_LOCALE: &str = "en_US";

#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    #[validate(range(min = 1, max = 100))]
    pub db_max_connections: u32,
    pub nats_url: Option<String>,
    #[validate(length(min = 1))]
    pub nats_subject: String,
    #[validate(length(min = 2))]
    pub default_locale: String,
    #[validate(custom = "validate_pixel_ids")]
    pub pixel_ids: Vec<String>,
    /// Read pixels from the store and let them replace `pixel_ids`.
    pub pixels_from_store: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid { var: "PORT", reason: e.to_string() })?,
            None => DEFAULT_PORT,
        };
        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid { var: "DB_MAX_CONNECTIONS", reason: e.to_string() })?,
            None => 10,
        };
        let pixels_from_store = match lookup("META_PIXELS_FROM_STORE").as_deref() {
            None | Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            Some(other) => return Err(ConfigError::Invalid { var: "META_PIXELS_FROM_STORE", reason: format!("expected true or false, got {other}") }),
        };
        let pixel_ids = lookup("META_PIXEL_IDS")
            .map(|ids| ids.split(',').map(str::trim).filter(|id| !id.is_empty()).map(String::from).collect())
            .unwrap_or_default();

        let config = Self {
            port,
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            db_max_connections,
            nats_url: lookup("NATS_URL").filter(|url| !url.is_empty()),
            nats_subject: lookup("NATS_SUBJECT").unwrap_or_else(|| DEFAULT_NATS_SUBJECT.to_string()),
            default_locale: lookup("DEFAULT_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            pixel_ids,
            pixels_from_store,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn locale(&self) -> LocaleCode { LocaleCode::new(self.default_locale.clone()) }
}

fn validate_pixel_ids(ids: &[String]) -> Result<(), ValidationError> {
    if ids.iter().all(|id| id.chars().all(|c| c.is_ascii_digit())) {
        Ok(())
    } else {
        Err(ValidationError::new("pixel_id_not_numeric"))
    }
}
