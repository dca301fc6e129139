use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shared::errors::{ErrorCategory, ErrorCode, ServiceError};

use crate::registration::WizardError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<shared::types::ValidationError> for AppError {
    fn from(err: shared::types::ValidationError) -> Self {
        AppError::Service(err.into())
    }
}

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        AppError::Service(ServiceError::invalid_selection(err.to_string()))
    }
}

/// Render an error as the standardized response body:
/// `{"error": {"code", "message", "category", "details"?}}`
fn error_body(
    code: &str,
    message: &str,
    category: ErrorCategory,
    details: Option<serde_json::Value>,
) -> Json<serde_json::Value> {
    let mut error = json!({
        "code": code,
        "message": message,
        "category": category,
    });
    if let Some(details) = details {
        error["details"] = details;
    }
    Json(json!({ "error": error }))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Service(err) => {
                let status = StatusCode::from_u16(err.category.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                match err.category.log_level() {
                    "error" => tracing::error!(code = %err.code, context = ?err.context, "{}", err.message),
                    "warn" => tracing::warn!(code = %err.code, context = ?err.context, "{}", err.message),
                    _ => tracing::info!(code = %err.code, context = ?err.context, "{}", err.message),
                }
                metrics::counter!(
                    "gateway_errors_total",
                    "code" => err.code.clone()
                )
                .increment(1);
                (
                    status,
                    error_body(&err.code, &err.message, err.category, err.details),
                )
            }
            AppError::InvalidInput(message) => (
                StatusCode::BAD_REQUEST,
                error_body(
                    ErrorCode::VALIDATION_INVALID_INPUT.as_str(),
                    &message,
                    ErrorCategory::Validation,
                    None,
                ),
            ),
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body(
                        ErrorCode::INTERNAL_UNEXPECTED.as_str(),
                        "Internal server error",
                        ErrorCategory::Internal,
                        None,
                    ),
                )
            }
        };

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
