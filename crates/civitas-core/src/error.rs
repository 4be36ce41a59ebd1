//! # Error Types
//!
//! Domain-specific error types for civitas-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  civitas-core errors (this file)                                       │
//! │  ├── CoreError        - Rule violations and storage failures           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  civitas-db errors (separate crate)                                    │
//! │  └── DbError          - Database failures, converted into CoreError    │
//! │                                                                         │
//! │  REST errors (in apps/api)                                             │
//! │  └── ApiError         - Status code + ErrorResponse body               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ← DbError                           │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                          ApiError → HTTP client                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Detail Strings
//! Every rule violation carries a short detail naming the offending input,
//! e.g. `name: Springfield` or `cityId: 7`. The API returns it verbatim in
//! the `details` array of the error body.

use thiserror::Error;

use crate::types::{CityId, StateId};

// =============================================================================
// Core Error
// =============================================================================

/// Errors produced by the rule engines and the persistence ports.
///
/// None of these are retried: each is the terminal outcome of a single
/// operation and is translated to a status code at the boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation (blank name, missing city id, ...).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An id or a foreign-key lookup did not resolve.
    ///
    /// ## When This Occurs
    /// - Updating or deleting a city/state id that doesn't exist
    /// - Creating or moving a state to a city id that doesn't exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness rule would be violated.
    ///
    /// ## When This Occurs
    /// - City name already used (case-insensitive)
    /// - State name already used within the same city (case-insensitive)
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// A delete was blocked because other records still reference the target.
    ///
    /// ## User Workflow
    /// ```text
    /// DELETE /cities/1
    ///      │
    ///      ▼
    /// State "IL" still has city_id = 1
    ///      │
    ///      ▼
    /// ReferentialConflict("cityId: 1") → nothing deleted
    /// ```
    #[error("Referential conflict: {0}")]
    ReferentialConflict(String),

    /// The persistence gateway failed for a reason unrelated to the rules.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// `NotFound` for a city id.
    pub fn city_not_found(id: CityId) -> Self {
        CoreError::NotFound(format!("cityId: {}", id))
    }

    /// `NotFound` for a state id.
    pub fn state_not_found(id: StateId) -> Self {
        CoreError::NotFound(format!("stateId: {}", id))
    }

    /// `AlreadyExists` for a duplicate city name.
    pub fn duplicate_city(name: &str) -> Self {
        CoreError::AlreadyExists(format!("name: {}", name))
    }

    /// `AlreadyExists` for a duplicate (state name, city id) pair.
    pub fn duplicate_state(name: &str, city_id: CityId) -> Self {
        CoreError::AlreadyExists(format!("name: {} cityId: {}", name, city_id))
    }

    /// The human-readable detail carried by this error, without the kind prefix.
    pub fn detail(&self) -> String {
        match self {
            CoreError::Validation(e) => e.to_string(),
            CoreError::NotFound(d)
            | CoreError::AlreadyExists(d)
            | CoreError::ReferentialConflict(d)
            | CoreError::Storage(d) => d.clone(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised before any rule touches storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for validation Results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::duplicate_state("IL", 1);
        assert_eq!(err.to_string(), "Already exists: name: IL cityId: 1");

        let err = CoreError::city_not_found(42);
        assert_eq!(err.to_string(), "Not found: cityId: 42");
    }

    #[test]
    fn test_detail_strips_kind() {
        assert_eq!(CoreError::state_not_found(3).detail(), "stateId: 3");
        assert_eq!(CoreError::duplicate_city("Springfield").detail(), "name: Springfield");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 255,
        };
        assert_eq!(err.to_string(), "name must be at most 255 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "cityId".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.detail(), "cityId is required");
    }
}
