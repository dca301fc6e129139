use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared::profile::{Transaction, UserProfile};

use crate::anticheat::{self, PlayerBehaviorReport};
use crate::directory::Permission;
use crate::domain::{AdminCreditRequest, AdminLoginRequest, ListUsersQuery, RefundRequest};
use crate::errors::{AppError, Result};
use crate::extractors::{AdminAuth, ValidatedJson};
use crate::repository::ProfileRecord;
use crate::state::AppState;

use shared::errors::ServiceError;

/// Operator login: validated purely against the injected directory, no
/// identity-provider call, so it works with the hosted backend down
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AdminLoginRequest>,
) -> Result<Json<Value>> {
    let identity = state
        .config
        .admin
        .authenticate(&req.username, &req.key)
        .ok_or_else(|| AppError::Service(ServiceError::unknown_operator(&req.username)))?;

    tracing::info!(operator = %identity.username, role = ?identity.role, "Operator signed in");

    Ok(Json(json!({
        "username": identity.username,
        "role": identity.role,
        "permissions": identity.role.permissions(),
    })))
}

pub async fn list_users(
    State(state): State<AppState>,
    admin: AdminAuth,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<ProfileRecord>>> {
    admin.require(Permission::ManageUsers)?;

    let limit = query.limit.unwrap_or(25).min(100);
    let offset = query.offset.unwrap_or(0);

    let records = state.profiles.list(limit, offset).await?;
    tracing::debug!(count = records.len(), "Listed user profiles");
    Ok(Json(records))
}

pub async fn get_user(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(account_id): Path<String>,
) -> Result<Json<UserProfile>> {
    admin.require(Permission::ManageUsers)?;

    let profile = state
        .profiles
        .find_by_account(&account_id)
        .await?
        .ok_or_else(|| AppError::Service(ServiceError::user_not_found(&account_id)))?;

    Ok(Json(profile))
}

pub async fn user_transactions(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(account_id): Path<String>,
) -> Result<Json<Vec<Transaction>>> {
    admin.require(Permission::ViewTransactions)?;

    let profile = state
        .profiles
        .find_by_account(&account_id)
        .await?
        .ok_or_else(|| AppError::Service(ServiceError::user_not_found(&account_id)))?;

    Ok(Json(profile.wallet.transactions))
}

/// Manual credit adjustment, recorded with the acting operator's id
pub async fn adjust_credits(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(account_id): Path<String>,
    ValidatedJson(req): ValidatedJson<AdminCreditRequest>,
) -> Result<Json<UserProfile>> {
    admin.require(Permission::AdjustCredits)?;

    let profile = state
        .auth
        .admin_credit(
            &account_id,
            req.amount,
            &req.description,
            None,
            &admin.0.username,
        )
        .await?;

    tracing::info!(
        operator = %admin.0.username,
        account_id = %account_id,
        amount = req.amount.as_u64(),
        "Credit adjustment applied"
    );

    Ok(Json(profile))
}

/// Investment-protection refund: a credit that references the match it
/// compensates
pub async fn refund(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(account_id): Path<String>,
    ValidatedJson(req): ValidatedJson<RefundRequest>,
) -> Result<Json<UserProfile>> {
    admin.require(Permission::ProcessRefunds)?;

    let description = format!("Refund: {}", req.reason);
    let profile = state
        .auth
        .admin_credit(
            &account_id,
            req.amount,
            &description,
            req.match_id,
            &admin.0.username,
        )
        .await?;

    tracing::info!(
        operator = %admin.0.username,
        account_id = %account_id,
        amount = req.amount.as_u64(),
        "Refund processed"
    );

    Ok(Json(profile))
}

/// The simulated anti-cheat dashboard, highest suspicion first
pub async fn anticheat_reports(admin: AdminAuth) -> Result<Json<Vec<PlayerBehaviorReport>>> {
    admin.require(Permission::ViewAntiCheat)?;
    Ok(Json(anticheat::risk_reports()))
}
