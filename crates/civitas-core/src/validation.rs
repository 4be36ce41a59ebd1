//! # Input Validation
//!
//! Validation rules for request input.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Validation Layers                                    │
//! │                                                                         │
//! │  JSON body ──► CityRequest / StateRequest::validate()  (boundary)      │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  CityService / StateService ──► validate_name()   (rule engine)        │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  Uniqueness + existence checks (need storage)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators never touch storage. Duplicate detection belongs to the
//! rule engines.

use crate::error::{ValidationError, ValidationResult};
use crate::types::CityId;
use crate::MAX_NAME_LENGTH;

/// Validates a city or state name.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - Must be at most [`MAX_NAME_LENGTH`] characters
///
/// The name is checked trimmed but stored exactly as given.
///
/// ## Example
/// ```rust
/// use civitas_core::validation::validate_name;
///
/// assert!(validate_name("Springfield").is_ok());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates that a city reference was supplied.
///
/// Whether the city exists is a storage question answered by the
/// state rule engine, not here.
pub fn validate_city_id(city_id: Option<CityId>) -> ValidationResult<CityId> {
    city_id.ok_or_else(|| ValidationError::Required {
        field: "cityId".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Springfield").is_ok());
        assert!(validate_name("São Paulo").is_ok());
        assert!(validate_name(" padded ").is_ok());

        assert_eq!(
            validate_name(""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(validate_name("   ").is_err());
        assert!(validate_name("\t\n").is_err());
    }

    #[test]
    fn test_validate_name_length_counts_chars() {
        assert!(validate_name(&"a".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(validate_name(&"ü".repeat(MAX_NAME_LENGTH)).is_ok());
        assert_eq!(
            validate_name(&"a".repeat(MAX_NAME_LENGTH + 1)),
            Err(ValidationError::TooLong {
                field: "name".to_string(),
                max: MAX_NAME_LENGTH
            })
        );
    }

    #[test]
    fn test_validate_city_id() {
        assert_eq!(validate_city_id(Some(3)), Ok(3));
        // Existence is not checked here
        assert_eq!(validate_city_id(Some(-1)), Ok(-1));
        assert!(validate_city_id(None).is_err());
    }
}
