/// Integration tests for the admin surface: operator login, permission
/// gating, adjustments/refunds and the anti-cheat dashboard
mod common;

use axum::http::{HeaderName, HeaderValue};
use common::{parse_error, register_user, spawn_app, spawn_degraded_app, stored_profile};
use serde_json::{json, Value};

use shared::profile::TransactionType;

fn header(value: &str) -> HeaderValue {
    value.parse().expect("invalid header value")
}

fn user_header() -> HeaderName {
    HeaderName::from_static("x-admin-username")
}

fn key_header() -> HeaderName {
    HeaderName::from_static("x-admin-key")
}

#[tokio::test]
async fn test_operator_login() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/admin/login")
        .json(&json!({ "username": "root", "key": "rootkey" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["role"], "super_admin");
    assert_eq!(body["permissions"].as_array().unwrap().len(), 5);

    let response = app
        .server
        .post("/api/admin/login")
        .json(&json!({ "username": "root", "key": "wrong" }))
        .await;
    assert_eq!(response.status_code(), 401);
    let (code, _, _) = parse_error(&response.json());
    assert_eq!(code, "ADMIN_UNKNOWN_OPERATOR");
}

#[tokio::test]
async fn test_operator_login_works_without_hosted_backend() {
    // The operator directory is injected configuration; a misconfigured
    // hosted backend must not lock operators out.
    let server = spawn_degraded_app();

    let response = server
        .post("/api/admin/login")
        .json(&json!({ "username": "helpdesk", "key": "deskkey" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["role"], "support");
}

#[tokio::test]
async fn test_user_listing_requires_permission() {
    let app = spawn_app();
    register_user(&app.server, "listed@example.com", "listed_player").await;

    // No credentials.
    let response = app.server.get("/api/admin/users").await;
    assert_eq!(response.status_code(), 401);

    // Support lacks manage_users.
    let response = app
        .server
        .get("/api/admin/users")
        .add_header(user_header(), header("helpdesk"))
        .add_header(key_header(), header("deskkey"))
        .await;
    assert_eq!(response.status_code(), 403);
    let (code, _, category) = parse_error(&response.json());
    assert_eq!(code, "ADMIN_PERMISSION_DENIED");
    assert_eq!(category, "FORBIDDEN");

    // Moderator can list.
    let response = app
        .server
        .get("/api/admin/users")
        .add_header(user_header(), header("mod_anna"))
        .add_header(key_header(), header("modkey"))
        .await;
    assert_eq!(response.status_code(), 200);
    let records: Vec<Value> = response.json();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["profile"]["username"], "listed_player");
}

#[tokio::test]
async fn test_user_inspection() {
    let app = spawn_app();
    let (_, account_id) = register_user(&app.server, "seen@example.com", "seen_player").await;

    let response = app
        .server
        .get(&format!("/api/admin/users/{}", account_id))
        .add_header(user_header(), header("root"))
        .add_header(key_header(), header("rootkey"))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["username"], "seen_player");

    let response = app
        .server
        .get("/api/admin/users/acct-does-not-exist")
        .add_header(user_header(), header("root"))
        .add_header(key_header(), header("rootkey"))
        .await;
    assert_eq!(response.status_code(), 404);

    // Support may read the ledger even without manage_users.
    let response = app
        .server
        .get(&format!("/api/admin/users/{}/transactions", account_id))
        .add_header(user_header(), header("helpdesk"))
        .add_header(key_header(), header("deskkey"))
        .await;
    assert_eq!(response.status_code(), 200);
    let transactions: Vec<Value> = response.json();
    assert_eq!(transactions.len(), 1);
}

#[tokio::test]
async fn test_credit_adjustment() {
    let app = spawn_app();
    let (_, account_id) = register_user(&app.server, "adj@example.com", "adj_player").await;

    // Support cannot adjust.
    let response = app
        .server
        .post(&format!("/api/admin/users/{}/adjustments", account_id))
        .add_header(user_header(), header("helpdesk"))
        .add_header(key_header(), header("deskkey"))
        .json(&json!({ "amount": 500, "description": "Goodwill" }))
        .await;
    assert_eq!(response.status_code(), 403);

    let response = app
        .server
        .post(&format!("/api/admin/users/{}/adjustments", account_id))
        .add_header(user_header(), header("root"))
        .add_header(key_header(), header("rootkey"))
        .json(&json!({ "amount": 500, "description": "Goodwill" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["wallet"]["balance"], 1_500);

    let stored = stored_profile(&app.profiles, &account_id).await;
    let adjustment = &stored.wallet.transactions[0];
    assert_eq!(adjustment.kind, TransactionType::AdminAdjustment);
    assert_eq!(adjustment.admin_id.as_deref(), Some("root"));
    assert_eq!(stored.wallet.total_earnings.as_u64(), 1_500);
}

#[tokio::test]
async fn test_refund_workflow() {
    let app = spawn_app();
    let (_, account_id) = register_user(&app.server, "ref@example.com", "ref_player").await;

    let response = app
        .server
        .post(&format!("/api/admin/users/{}/refunds", account_id))
        .add_header(user_header(), header("helpdesk"))
        .add_header(key_header(), header("deskkey"))
        .json(&json!({
            "amount": 50,
            "reason": "Server crash during match",
            "match_id": "match-xyz",
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let stored = stored_profile(&app.profiles, &account_id).await;
    let refund = &stored.wallet.transactions[0];
    assert_eq!(refund.kind, TransactionType::AdminAdjustment);
    assert_eq!(refund.description, "Refund: Server crash during match");
    assert_eq!(refund.match_id.as_deref(), Some("match-xyz"));
    assert_eq!(refund.admin_id.as_deref(), Some("helpdesk"));
    assert_eq!(stored.wallet.balance.as_u64(), 1_050);
}

#[tokio::test]
async fn test_anticheat_dashboard() {
    let app = spawn_app();

    // Support lacks view_anti_cheat.
    let response = app
        .server
        .get("/api/admin/anticheat")
        .add_header(user_header(), header("helpdesk"))
        .add_header(key_header(), header("deskkey"))
        .await;
    assert_eq!(response.status_code(), 403);

    let response = app
        .server
        .get("/api/admin/anticheat")
        .add_header(user_header(), header("mod_anna"))
        .add_header(key_header(), header("modkey"))
        .await;
    assert_eq!(response.status_code(), 200);

    let reports: Vec<Value> = response.json();
    assert!(!reports.is_empty());

    let scores: Vec<u64> = reports
        .iter()
        .map(|r| r["risk_score"].as_u64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|score| *score <= 100));
    assert_eq!(reports[0]["risk_level"], "critical");
}
