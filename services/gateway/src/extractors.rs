use axum::{
    async_trait,
    extract::{FromRef, FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use shared::errors::ServiceError;

use crate::directory::{AdminIdentity, Permission};
use crate::errors::AppError;
use crate::state::AppState;

/// JSON extractor that runs declarative validation and formats both
/// deserialization and validation failures as standardized error
/// responses instead of plain text.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let original = rejection.to_string();
                let message = if let Some(field) = original
                    .split("missing field `")
                    .nth(1)
                    .and_then(|s| s.split('`').next())
                {
                    format!("Missing required field: {}", field)
                } else if original.contains("Failed to deserialize") {
                    original
                        .split("Failed to deserialize the JSON body into the target type:")
                        .nth(1)
                        .map(|s| s.trim().to_string())
                        .unwrap_or_else(|| "Invalid request body".to_string())
                } else {
                    "Invalid request body".to_string()
                };

                tracing::warn!(
                    error = %original,
                    "Request body failed to deserialize"
                );
                AppError::InvalidInput(message)
            })?;

        value.validate().map_err(|errors| {
            tracing::warn!(error = %errors, "Request body failed validation");
            AppError::InvalidInput(format_validation_errors(&errors))
        })?;

        Ok(ValidatedJson(value))
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    if fields.is_empty() {
        "Invalid request body".to_string()
    } else {
        format!("Invalid fields: {}", fields.join(", "))
    }
}

/// Bearer session token; its absence is an authentication failure
pub struct SessionToken(pub String);

/// Bearer session token, tolerated to be absent (session checks)
pub struct OptionalSessionToken(pub Option<String>);

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_token(parts)
            .map(SessionToken)
            .ok_or_else(|| AppError::Service(ServiceError::not_authenticated()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalSessionToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalSessionToken(bearer_token(parts)))
    }
}

/// Operator credentials checked against the injected directory on every
/// admin request; no identity-provider dependency
pub struct AdminAuth(pub AdminIdentity);

impl AdminAuth {
    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.0.role.allows(permission) {
            Ok(())
        } else {
            Err(AppError::Service(ServiceError::permission_denied(
                permission,
            )))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let username = parts
            .headers
            .get("x-admin-username")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let key = parts
            .headers
            .get("x-admin-key")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        state
            .config
            .admin
            .authenticate(username, key)
            .map(AdminAuth)
            .ok_or_else(|| AppError::Service(ServiceError::unknown_operator(username)))
    }
}
