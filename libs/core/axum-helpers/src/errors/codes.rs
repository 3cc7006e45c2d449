//! Type-safe error codes for API responses.
//!
//! Each error code carries:
//! - String representation for client consumption (e.g., "NOT_FOUND")
//! - Integer code for logging and monitoring (e.g., 1004)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidJson;
//! assert_eq!(code.as_str(), "INVALID_JSON");
//! assert_eq!(code.code(), 1010);
//! assert_eq!(code.default_message(), "Invalid JSON format");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Query string could not be deserialized
    InvalidQuery,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Invalid JSON format in request body
    InvalidJson,

    /// HTTP method is not supported by the route
    MethodNotAllowed,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    // Storage errors (2000-2999)
    /// The persistence backend failed
    StorageError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier that clients can match on.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidQuery => "INVALID_QUERY",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidJson => "INVALID_JSON",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::StorageError => "STORAGE_ERROR",
        }
    }

    /// Integer code for logging and monitoring.
    ///
    /// Ranges:
    /// - 1000-1999: Client and generic server errors
    /// - 2000-2999: Storage errors
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidQuery => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::InvalidJson => 1010,
            Self::MethodNotAllowed => 1012,

            Self::StorageError => 2001,
        }
    }

    /// Default user-facing message. Handlers may override it.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidQuery => "Invalid query parameters",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::InvalidJson => "Invalid JSON format",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::StorageError => "Storage backend error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
