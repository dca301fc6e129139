use axum::{extract::State, Json};

use shared::errors::ServiceError;
use shared::profile::{Transaction, UserProfile, Wallet};

use crate::domain::PurchaseCreditsRequest;
use crate::errors::{AppError, Result};
use crate::extractors::{SessionToken, ValidatedJson};
use crate::services::AuthUser;
use crate::state::AppState;

/// Wallet operations need the backing document; a degraded session gets
/// a clean not-found instead of a panic or a silent default
fn profile_of(user: &AuthUser) -> Result<&UserProfile> {
    user.profile
        .as_ref()
        .ok_or_else(|| AppError::Service(ServiceError::profile_not_found(&user.account.id)))
}

pub async fn get_wallet(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<Wallet>> {
    let user = state.auth.session_user(&token).await?;
    Ok(Json(profile_of(&user)?.wallet.clone()))
}

/// The embedded ledger, newest first, exactly as stored
pub async fn list_transactions(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<Vec<Transaction>>> {
    let user = state.auth.session_user(&token).await?;
    Ok(Json(profile_of(&user)?.wallet.transactions.clone()))
}

/// Buy-credits placeholder: credits the wallet directly, no payment
/// integration behind it
pub async fn purchase_credits(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    ValidatedJson(req): ValidatedJson<PurchaseCreditsRequest>,
) -> Result<Json<Wallet>> {
    let description = req
        .description
        .unwrap_or_else(|| "Credits purchase".to_string());

    let user = state
        .auth
        .add_credits(&token, req.amount, &description)
        .await?;

    tracing::info!(
        account_id = %user.account.id,
        amount = req.amount.as_u64(),
        "Credits purchased"
    );

    Ok(Json(profile_of(&user)?.wallet.clone()))
}
