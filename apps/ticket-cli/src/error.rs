//! # App Error Type
//!
//! Unified error type for the command line front end.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  load config ─── toml / IO / bad value ──► AppError::Config*           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  source.lines() ── IO / bad JSON ────────► AppError::Source            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  strict mode? ──── CoreError::InvalidLine ► AppError::Rejected         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ticket_core::build (never fails)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sink.accept() ─── IO / JSON ─────────────► AppError::Sink             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;
use ticket_core::CoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::config::TicketConfig`].
    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A config value is present but unusable.
    #[error("Invalid config value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },

    /// Purchase lines could not be loaded.
    #[error("Failed to load purchase lines from {source_name}: {reason}")]
    Source { source_name: String, reason: String },

    /// Strict validation rejected the purchase lines.
    #[error("Purchase lines rejected: {0}")]
    Rejected(#[from] CoreError),

    /// The ticket could not be written.
    #[error("Failed to write ticket: {0}")]
    Sink(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Sink(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Sink(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
