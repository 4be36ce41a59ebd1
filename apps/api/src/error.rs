//! # API Error Type
//!
//! Unified error type for REST handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Civitas                                │
//! │                                                                         │
//! │  Handler                                                               │
//! │  Result<T, ApiError>                                                   │
//! │       │                                                                 │
//! │       ├── JsonRejection / PathRejection ─┐                             │
//! │       ├── ValidationError ───────────────┤                             │
//! │       └── CoreError ─────────────────────┴──► ApiError                 │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │                        status code + { "message", "details" }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Mapping
//! | Error                      | Status | message                          |
//! |----------------------------|--------|----------------------------------|
//! | `NotFound`                 | 404    | `Not Found!`                     |
//! | `AlreadyExists`            | 400    | `Already Exist!`                 |
//! | `ReferentialConflict`      | 400    | `This city is used by ...`       |
//! | validation / bad JSON/path | 400    | `Validation Failed!`             |
//! | `Storage`                  | 500    | `Internal Server Error!`         |

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use civitas_core::{CoreError, ErrorResponse, ValidationError};
use tracing::{debug, error};

pub const NOT_FOUND_MESSAGE: &str = "Not Found!";
pub const ALREADY_EXISTS_MESSAGE: &str = "Already Exist!";
pub const REFERENTIAL_CONFLICT_MESSAGE: &str =
    "This city is used by another record. Deletion cannot be performed!";
pub const VALIDATION_MESSAGE: &str = "Validation Failed!";
pub const INTERNAL_MESSAGE: &str = "Internal Server Error!";

/// API error returned from REST handlers.
///
/// ## Serialization
/// ```json
/// {
///   "message": "Not Found!",
///   "details": ["cityId: 7"]
/// }
/// ```
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    /// Creates a new API error with a single detail.
    pub fn new(status: StatusCode, message: &str, detail: impl Into<String>) -> Self {
        ApiError {
            status,
            body: ErrorResponse::new(message, detail),
        }
    }

    /// Creates a 400 validation error.
    pub fn validation(detail: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, VALIDATION_MESSAGE, detail)
    }

    /// Creates a 500 error. The body never carries the cause.
    pub fn internal() -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorResponse {
                message: INTERNAL_MESSAGE.to_string(),
                details: Vec::new(),
            },
        }
    }
}

/// Converts rule-engine errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::from(e),
            CoreError::NotFound(detail) => {
                ApiError::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE, detail)
            }
            CoreError::AlreadyExists(detail) => {
                ApiError::new(StatusCode::BAD_REQUEST, ALREADY_EXISTS_MESSAGE, detail)
            }
            CoreError::ReferentialConflict(detail) => {
                ApiError::new(StatusCode::BAD_REQUEST, REFERENTIAL_CONFLICT_MESSAGE, detail)
            }
            CoreError::Storage(detail) => {
                error!(error = %detail, "Storage failure");
                ApiError::internal()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "Rejected request body");
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!(error = %rejection, "Rejected path parameter");
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API Error {}: {}", self.status.as_u16(), self.body.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(CoreError::city_not_found(7));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.body, ErrorResponse::new("Not Found!", "cityId: 7"));

        let err = ApiError::from(CoreError::duplicate_state("IL", 1));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.message, "Already Exist!");
        assert_eq!(err.body.details, vec!["name: IL cityId: 1".to_string()]);

        let err = ApiError::from(CoreError::ReferentialConflict("cityId: 1".to_string()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.message, REFERENTIAL_CONFLICT_MESSAGE);
    }

    #[test]
    fn test_validation_mapping() {
        let err = ApiError::from(CoreError::from(ValidationError::Required {
            field: "name".to_string(),
        }));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body, ErrorResponse::new("Validation Failed!", "name is required"));
    }

    #[test]
    fn test_storage_detail_is_not_leaked() {
        let err = ApiError::from(CoreError::Storage("disk I/O error".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.message, "Internal Server Error!");
        assert!(err.body.details.is_empty());
    }
}
