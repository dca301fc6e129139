/// Shared error types for the MANA Gaming services
///
/// Design:
/// - Standardized error codes for consistent handling across the gateway
///   and its clients
/// - Categorized by error domain (Validation, Network, Internal, ...)
/// - Category determines HTTP status code and logging severity
/// - Distinguished business errors (insufficient credits, version conflict)
///   carry structured details so callers can branch without string matching
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Credits, ValidationError};

/// Error categories that map to HTTP status codes and logging severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Validation errors (400 Bad Request)
    /// Client provided invalid input, including expected business
    /// failures such as an insufficient balance
    Validation,

    /// Authentication errors (401)
    /// Bad credentials, missing or expired session
    Unauthorized,

    /// Authorization errors (403)
    /// Authenticated operator lacks the required permission
    Forbidden,

    /// Resource not found (404 Not Found)
    NotFound,

    /// Optimistic-concurrency failure (409 Conflict)
    /// The profile document changed under a read-modify-write
    Conflict,

    /// Hosted-backend errors (503 Service Unavailable)
    /// The identity provider or document store is unreachable
    Network,

    /// Internal service errors (500 Internal Server Error)
    /// Unexpected failures, serialization issues, misconfiguration
    Internal,
}

impl ErrorCategory {
    /// Map error category to HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorCategory::Validation => 400,
            ErrorCategory::Unauthorized => 401,
            ErrorCategory::Forbidden => 403,
            ErrorCategory::NotFound => 404,
            ErrorCategory::Conflict => 409,
            ErrorCategory::Network => 503,
            ErrorCategory::Internal => 500,
        }
    }

    /// Map error category to log level
    pub fn log_level(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "warn",
            ErrorCategory::Unauthorized => "warn",
            ErrorCategory::Forbidden => "warn",
            ErrorCategory::NotFound => "info",
            ErrorCategory::Conflict => "warn",
            ErrorCategory::Network => "error",
            ErrorCategory::Internal => "error",
        }
    }
}

/// Standard error codes used across the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    // Validation errors
    pub const VALIDATION_INVALID_AMOUNT: ErrorCode = ErrorCode("VALIDATION_INVALID_AMOUNT");
    pub const VALIDATION_INVALID_USERNAME: ErrorCode = ErrorCode("VALIDATION_INVALID_USERNAME");
    pub const VALIDATION_INVALID_SELECTION: ErrorCode = ErrorCode("VALIDATION_INVALID_SELECTION");
    pub const VALIDATION_INVALID_INPUT: ErrorCode = ErrorCode("VALIDATION_INVALID_INPUT");
    pub const WALLET_INSUFFICIENT_CREDITS: ErrorCode = ErrorCode("WALLET_INSUFFICIENT_CREDITS");

    // Authentication / authorization errors
    pub const AUTH_INVALID_CREDENTIALS: ErrorCode = ErrorCode("AUTH_INVALID_CREDENTIALS");
    pub const AUTH_NOT_AUTHENTICATED: ErrorCode = ErrorCode("AUTH_NOT_AUTHENTICATED");
    pub const AUTH_ACCOUNT_EXISTS: ErrorCode = ErrorCode("AUTH_ACCOUNT_EXISTS");
    pub const ADMIN_UNKNOWN_OPERATOR: ErrorCode = ErrorCode("ADMIN_UNKNOWN_OPERATOR");
    pub const ADMIN_PERMISSION_DENIED: ErrorCode = ErrorCode("ADMIN_PERMISSION_DENIED");

    // Resource errors
    pub const NOT_FOUND_PROFILE: ErrorCode = ErrorCode("NOT_FOUND_PROFILE");
    pub const NOT_FOUND_USER: ErrorCode = ErrorCode("NOT_FOUND_USER");

    // Concurrency errors
    pub const CONFLICT_VERSION_MISMATCH: ErrorCode = ErrorCode("CONFLICT_VERSION_MISMATCH");
    pub const CONFLICT_DOCUMENT_EXISTS: ErrorCode = ErrorCode("CONFLICT_DOCUMENT_EXISTS");

    // Network errors
    pub const NETWORK_BACKEND_UNAVAILABLE: ErrorCode = ErrorCode("NETWORK_BACKEND_UNAVAILABLE");

    // Internal errors
    pub const INTERNAL_UNEXPECTED: ErrorCode = ErrorCode("INTERNAL_UNEXPECTED");
    pub const INTERNAL_SERIALIZATION: ErrorCode = ErrorCode("INTERNAL_SERIALIZATION");
    pub const INTERNAL_CONFIGURATION: ErrorCode = ErrorCode("INTERNAL_CONFIGURATION");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Standardized error structure used across the platform
///
/// Carries a category (status/severity), a structured code, a
/// human-readable message and optional machine-readable details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceError {
    /// Error category (determines status code and log level)
    pub category: ErrorCategory,

    /// Structured error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context for logs (field names, ids)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Optional machine-readable details surfaced to clients
    /// (e.g. the shortfall on an insufficient-credits failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServiceError {
    /// Create a new ServiceError
    pub fn new(category: ErrorCategory, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            category,
            code: code.as_str().to_string(),
            message: message.into(),
            context: None,
            details: None,
        }
    }

    /// Add context to an error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach client-visible details
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_conflict(&self) -> bool {
        self.category == ErrorCategory::Conflict
    }

    pub fn is_not_found(&self) -> bool {
        self.category == ErrorCategory::NotFound
    }

    // Validation error constructors
    pub fn invalid_amount(reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_INVALID_AMOUNT,
            format!("Invalid amount: {}", reason),
        )
    }

    pub fn invalid_selection(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_INVALID_SELECTION,
            reason,
        )
    }

    pub fn insufficient_credits(required: Credits, available: Credits) -> Self {
        let shortfall = required.as_u64().saturating_sub(available.as_u64());
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::WALLET_INSUFFICIENT_CREDITS,
            "Insufficient credits",
        )
        .with_details(serde_json::json!({
            "required": required.as_u64(),
            "available": available.as_u64(),
            "shortfall": shortfall,
        }))
    }

    // Authentication error constructors
    pub fn invalid_credentials() -> Self {
        Self::new(
            ErrorCategory::Unauthorized,
            ErrorCode::AUTH_INVALID_CREDENTIALS,
            "Invalid email or password",
        )
    }

    pub fn not_authenticated() -> Self {
        Self::new(
            ErrorCategory::Unauthorized,
            ErrorCode::AUTH_NOT_AUTHENTICATED,
            "No active session",
        )
    }

    pub fn account_exists(email: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::AUTH_ACCOUNT_EXISTS,
            "An account with this email already exists",
        )
        .with_context(email.to_string())
    }

    pub fn unknown_operator(username: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Unauthorized,
            ErrorCode::ADMIN_UNKNOWN_OPERATOR,
            "Unknown operator or bad key",
        )
        .with_context(username.to_string())
    }

    pub fn permission_denied(permission: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Forbidden,
            ErrorCode::ADMIN_PERMISSION_DENIED,
            format!("Operator lacks permission: {}", permission),
        )
    }

    // Resource error constructors
    pub fn profile_not_found(account_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::NotFound,
            ErrorCode::NOT_FOUND_PROFILE,
            format!("Profile not found for account {}", account_id),
        )
    }

    pub fn user_not_found(id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::NotFound,
            ErrorCode::NOT_FOUND_USER,
            format!("User not found: {}", id),
        )
    }

    // Concurrency error constructors
    pub fn version_conflict(account_id: impl fmt::Display, expected: u64) -> Self {
        Self::new(
            ErrorCategory::Conflict,
            ErrorCode::CONFLICT_VERSION_MISMATCH,
            "Profile was modified concurrently",
        )
        .with_context(format!("account: {}, expected version: {}", account_id, expected))
    }

    pub fn document_exists(account_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Conflict,
            ErrorCode::CONFLICT_DOCUMENT_EXISTS,
            format!("Profile document already exists for account {}", account_id),
        )
    }

    // Network error constructors
    pub fn backend_unavailable(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Network,
            ErrorCode::NETWORK_BACKEND_UNAVAILABLE,
            "Hosted backend unavailable",
        )
        .with_context(error.to_string())
    }

    // Internal error constructors
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCategory::Internal,
            ErrorCode::INTERNAL_UNEXPECTED,
            message,
        )
    }

    pub fn serialization_error(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Internal,
            ErrorCode::INTERNAL_SERIALIZATION,
            "Serialization error",
        )
        .with_context(error.to_string())
    }

    pub fn configuration_missing(what: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Internal,
            ErrorCode::INTERNAL_CONFIGURATION,
            "Hosted backend is not configured",
        )
        .with_context(what.to_string())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "[{}] {}: {}", self.code, self.message, context)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        let is_username_error = matches!(
            err,
            ValidationError::UsernameLength { .. } | ValidationError::InvalidUsernameFormat(_)
        );
        if is_username_error {
            ServiceError::new(
                ErrorCategory::Validation,
                ErrorCode::VALIDATION_INVALID_USERNAME,
                err.to_string(),
            )
        } else {
            ServiceError::invalid_amount(err)
        }
    }
}

// Convenience type alias
pub type Result<T> = std::result::Result<T, ServiceError>;
