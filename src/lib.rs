//! OpenSASE Conversions
//!
//! Storefront behavior tracking for the Meta conversions API.
//!
//! ## Features
//! - Purchase tracking from the order thank-you page
//! - Product detail views
//! - Category views with the visible product codes
//! - Postgres-backed lookups and NATS delivery

pub mod config;
pub mod domain;
pub mod host;
pub mod http;
pub mod infra;
pub mod pixels;
pub mod ports;
pub mod translators;
pub mod wiring;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum TrackingError {
    /// The host raised an event with a subject it never sends for that hook.
    #[error("Expected a {expected} subject, got {found}")]
    UnexpectedSubject { expected: &'static str, found: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

impl From<sqlx::Error> for TrackingError {
    fn from(e: sqlx::Error) -> Self { Self::Storage(e.to_string()) }
}

impl From<serde_json::Error> for TrackingError {
    fn from(e: serde_json::Error) -> Self { Self::Dispatch(e.to_string()) }
}

pub type Result<T> = std::result::Result<T, TrackingError>;
