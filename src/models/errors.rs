//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so logs and API responses can be
//! matched up.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - PRICING_xxx: Price calculation errors
//! - API_xxx: Request/response errors
//! - STORE_xxx: Document store errors
//! - CFG_xxx: Configuration errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Pricing Errors (1xx)
    // ============================================
    /// Service key not present in the rate table
    PricingUnknownService,

    // ============================================
    // API Errors (3xx)
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Request body failed record validation
    ApiValidation,
    /// Resource not found
    ApiNotFound,

    // ============================================
    // Store Errors (6xx)
    // ============================================
    /// No document store configured / reachable
    StoreUnavailable,
    /// Document could not be written
    StoreWriteFailed,
    /// Collection could not be queried
    StoreQueryFailed,

    // ============================================
    // Configuration Errors (4xx)
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
    /// Unsupported DATABASE_URL scheme
    ConfigUnsupportedStore,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PricingUnknownService => "PRICING_UNKNOWN_SERVICE",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiValidation => "API_VALIDATION",
            Self::ApiNotFound => "API_NOT_FOUND",

            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StoreWriteFailed => "STORE_WRITE_FAILED",
            Self::StoreQueryFailed => "STORE_QUERY_FAILED",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::ConfigUnsupportedStore => "CFG_UNSUPPORTED_STORE",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::PricingUnknownService | Self::ApiBadRequest => 400,
            Self::ApiNotFound => 404,
            Self::ApiValidation => 422,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Service key not in the rate table
    pub fn unknown_service() -> Self {
        Self::new(ErrorCode::PricingUnknownService, "Unknown service")
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// Record failed validation
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiValidation, msg)
    }

    /// Store not configured or not reachable
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, msg)
    }

    /// Store write failed
    pub fn store_write_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreWriteFailed, msg)
    }

    /// Store query failed
    pub fn store_query_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreQueryFailed, msg)
    }

    /// DATABASE_URL scheme not supported by this build
    pub fn unsupported_store(url_scheme: &str) -> Self {
        Self::new(
            ErrorCode::ConfigUnsupportedStore,
            format!("Unsupported database url scheme: {}", url_scheme),
        )
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// HTTP rendering
// ============================================

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            detail: self.message,
            code: self.code.as_str(),
        };
        (status, Json(body)).into_response()
    }
}

// ============================================
// Conversion from common error types
// ============================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ApiValidation, err.to_string(), err)
    }
}
