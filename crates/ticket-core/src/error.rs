//! # Error Types
//!
//! Domain-specific error types for ticket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ticket-core errors (this file)                                        │
//! │  ├── CoreError        - Which line of a ticket was rejected            │
//! │  └── ValidationError  - Why a single value was rejected                │
//! │                                                                         │
//! │  ticket-cli errors (app)                                               │
//! │  └── AppError         - Config, catalog and output failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → exit status            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing pipeline itself never returns an error. These types are only
//! produced by the opt-in checks in [`crate::validation`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

#[derive(Debug, Error)]
pub enum CoreError {
    /// A purchase line failed strict validation.
    #[error("Line {index} ({name}): {source}")]
    InvalidLine {
        index: usize,
        name: String,
        #[source]
        source: ValidationError,
    },

    /// Validation error not tied to a single line.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Text that is not a plain decimal price.
    #[error("invalid price '{value}'")]
    InvalidPrice { value: String },

    /// Category label outside the known set.
    #[error("unknown tax category '{label}'")]
    UnknownTaxCategory { label: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
