//! # Wire Shapes
//!
//! Request and response bodies for the REST API.
//!
//! ## Why DTOs?
//! - Decouples the persisted records from the API contract
//! - Hides timestamps and the raw `city_id` from responses
//! - camelCase field names for JS consumers
//!
//! Every shape here is exported to TypeScript by `ts-rs`
//! (`cargo test` writes the bindings).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationResult;
use crate::types::{City, CityId, StateDetail, StateId};
use crate::validation::{validate_city_id, validate_name};

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /cities` and `PUT /cities/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CityRequest {
    /// A missing field deserializes as empty and fails validation.
    #[serde(default)]
    pub name: String,
}

impl CityRequest {
    /// Checks the request before it reaches the rule engine.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name(&self.name)
    }
}

/// Body of `POST /states` and `PUT /states/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StateRequest {
    #[serde(default)]
    pub name: String,

    #[ts(type = "number | null")]
    pub city_id: Option<CityId>,
}

impl StateRequest {
    /// Checks the request and returns the (required) city id.
    pub fn validate(&self) -> ValidationResult<CityId> {
        validate_name(&self.name)?;
        validate_city_id(self.city_id)
    }
}

// =============================================================================
// Responses
// =============================================================================

/// A city as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CityResponse {
    #[ts(type = "number")]
    pub id: CityId,
    pub name: String,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        CityResponse {
            id: city.id,
            name: city.name,
        }
    }
}

/// A state as returned by the API, with its city's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StateResponse {
    #[ts(type = "number")]
    pub id: StateId,
    pub name: String,
    pub city_name: String,
}

impl From<StateDetail> for StateResponse {
    fn from(state: StateDetail) -> Self {
        StateResponse {
            id: state.id,
            name: state.name,
            city_name: state.city_name,
        }
    }
}

/// Body of every non-2xx response.
///
/// ```json
/// { "message": "Not Found!", "details": ["cityId: 7"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub message: String,
    pub details: Vec<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, detail: impl Into<String>) -> Self {
        ErrorResponse {
            message: message.into(),
            details: vec![detail.into()],
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_state_request_uses_camel_case() {
        let req: StateRequest = serde_json::from_str(r#"{"name":"IL","cityId":4}"#).unwrap();
        assert_eq!(req.name, "IL");
        assert_eq!(req.city_id, Some(4));
        assert_eq!(req.validate(), Ok(4));
    }

    #[test]
    fn test_missing_fields_fail_validation() {
        let req: CityRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());

        let req: StateRequest = serde_json::from_str(r#"{"name":"IL"}"#).unwrap();
        assert_eq!(
            req.validate(),
            Err(ValidationError::Required {
                field: "cityId".to_string()
            })
        );
    }

    #[test]
    fn test_name_is_checked_before_city_id() {
        let req = StateRequest {
            name: " ".to_string(),
            city_id: None,
        };
        assert_eq!(
            req.validate(),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
    }

    #[test]
    fn test_state_response_serializes_city_name() {
        let response = StateResponse::from(StateDetail {
            id: 1,
            name: "IL".to_string(),
            city_id: 1,
            city_name: "Springfield".to_string(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "IL", "cityName": "Springfield"})
        );
    }
}
