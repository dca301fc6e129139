use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared::types::Username;

use crate::domain::{AuthResponse, LoginRequest, RegisterRequest, SessionResponse};
use crate::errors::Result;
use crate::extractors::{OptionalSessionToken, SessionToken, ValidatedJson};
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let span = tracing::info_span!("register", email = %req.email);
    let _enter = span.enter();

    let username = Username::try_from(req.username)?;
    let (token, user) = state
        .auth
        .register(&req.email, &req.password, &req.name, username)
        .await?;

    tracing::info!(
        account_id = %user.account.id,
        degraded = user.profile.is_none(),
        "Registration completed"
    );

    Ok(Json(AuthResponse { token, user }))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let span = tracing::info_span!("login", email = %req.email);
    let _enter = span.enter();

    let (token, user) = state.auth.login(&req.email, &req.password).await?;

    tracing::debug!(account_id = %user.account.id, "Login completed");
    Ok(Json(AuthResponse { token, user }))
}

pub async fn logout(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<Value>> {
    state.auth.logout(&token).await;
    Ok(Json(json!({ "success": true })))
}

/// Session check: misconfiguration or an invalid token both surface as
/// "not authenticated" so the UI renders logged out instead of erroring
pub async fn session(
    State(state): State<AppState>,
    OptionalSessionToken(token): OptionalSessionToken,
) -> Result<Json<SessionResponse>> {
    let user = match token {
        Some(token) => state.auth.restore_session(&token).await?,
        None => None,
    };

    Ok(Json(SessionResponse {
        authenticated: user.is_some(),
        user,
    }))
}
