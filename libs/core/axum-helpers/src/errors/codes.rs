//! Error codes carried in every `ErrorResponse`.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Machine-readable error kinds.
///
/// Serializes to the same SCREAMING_SNAKE_CASE string as [`ErrorCode::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Body parsed but failed `validator` rules
    ValidationError,
    /// Missing or malformed query string parameter
    InvalidQuery,
    /// Body is not the expected JSON
    JsonExtraction,
    NotFound,
    InternalError,
    BadRequest,
    MethodNotAllowed,
    /// Duplicate resource
    Conflict,
}

impl ErrorCode {
    /// (identifier, numeric code, default message)
    const fn parts(self) -> (&'static str, i32, &'static str) {
        match self {
            Self::ValidationError => ("VALIDATION_ERROR", 1001, "Request validation failed"),
            Self::InvalidQuery => ("INVALID_QUERY", 1002, "Invalid query parameters"),
            Self::JsonExtraction => ("JSON_EXTRACTION", 1003, "Failed to parse request body"),
            Self::NotFound => ("NOT_FOUND", 1004, "Resource not found"),
            Self::InternalError => ("INTERNAL_ERROR", 1005, "An internal server error occurred"),
            Self::BadRequest => ("BAD_REQUEST", 1006, "Bad request"),
            Self::MethodNotAllowed => (
                "METHOD_NOT_ALLOWED",
                1007,
                "The HTTP method is not allowed for this resource",
            ),
            Self::Conflict => ("CONFLICT", 1008, "Resource already exists"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.parts().0
    }

    /// Numeric code for logs and dashboards
    pub fn code(&self) -> i32 {
        self.parts().1
    }

    /// Message used when the error carries no more specific text
    pub fn default_message(&self) -> &'static str {
        self.parts().2
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
