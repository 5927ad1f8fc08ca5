//! # Store Error Types
//!
//! Error types for lookup, service and configuration operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (memobook-core)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds lookup and config context             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller shows "Customer not found", "Please fill all fields", ...      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use memobook_core::{CoreError, ValidationError};
use thiserror::Error;

/// Lookup service errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found by id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// No customer is registered under a mobile number.
    ///
    /// ## When This Occurs
    /// - Customer statement requested for an unknown mobile
    #[error("Customer not found for mobile {mobile}")]
    CustomerNotFound { mobile: String },

    /// An id is already taken.
    #[error("Duplicate {entity}: '{id}' already exists")]
    Duplicate { entity: String, id: String },

    /// A date range whose start is after its end.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Domain error from memobook-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed.
    #[error("Failed to load configuration: {0}")]
    ConfigLoadFailed(String),

    /// Configuration file could not be written.
    #[error("Failed to save configuration: {0}")]
    ConfigSaveFailed(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::Duplicate {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// True for errors caused by what the user typed, as opposed to
    /// missing records or a broken config.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            StoreError::Validation(_)
                | StoreError::InvalidRange { .. }
                | StoreError::Core(CoreError::EmptyMemo)
                | StoreError::Core(CoreError::Validation(_))
                | StoreError::Core(CoreError::AmountOverflow { .. })
        )
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("Memo", "m-1");
        assert_eq!(err.to_string(), "Memo not found: m-1");

        let err = StoreError::CustomerNotFound {
            mobile: "01711223344".into(),
        };
        assert_eq!(err.to_string(), "Customer not found for mobile 01711223344");
    }

    #[test]
    fn test_user_input_classification() {
        assert!(StoreError::from(ValidationError::required("mobile")).is_user_input());
        assert!(StoreError::from(CoreError::EmptyMemo).is_user_input());
        assert!(!StoreError::not_found("Customer", "x").is_user_input());
        assert!(!StoreError::InvalidConfig("bad".into()).is_user_input());
    }
}
