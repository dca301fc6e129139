/// Common test utilities and fixtures for integration tests
///
/// Mounts the full router in-process over the in-memory identity provider
/// and profile store, so the suites run hermetically.
use axum_test::TestServer;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header, HeaderValue};

use gateway::config::Config;
use gateway::directory::{AdminDirectory, AdminOperator, AdminRole};
use gateway::identity::InMemoryIdentity;
use gateway::repository::{
    DisabledProfileRepository, InMemoryProfileRepository, ProfileRepository,
};
use gateway::services::AuthService;
use gateway::state::AppState;

use shared::profile::UserProfile;
use shared::types::Credits;

pub struct TestApp {
    pub server: TestServer,
    pub profiles: Arc<InMemoryProfileRepository>,
}

pub fn test_config() -> Config {
    let mut operators = HashMap::new();
    operators.insert(
        "root".to_string(),
        AdminOperator {
            key: "rootkey".to_string(),
            role: AdminRole::SuperAdmin,
        },
    );
    operators.insert(
        "mod_anna".to_string(),
        AdminOperator {
            key: "modkey".to_string(),
            role: AdminRole::Moderator,
        },
    );
    operators.insert(
        "helpdesk".to_string(),
        AdminOperator {
            key: "deskkey".to_string(),
            role: AdminRole::Support,
        },
    );

    Config {
        api_port: 0,
        metrics_port: 0,
        backend: None,
        admin: AdminDirectory::new(operators),
    }
}

/// Full app over in-memory identity + store
pub fn spawn_app() -> TestApp {
    let identity = Arc::new(InMemoryIdentity::new());
    let profiles = Arc::new(InMemoryProfileRepository::new());

    let auth = Arc::new(AuthService::new(identity, profiles.clone()));
    let state = AppState::new(test_config(), auth, profiles.clone(), None);

    let server = TestServer::new(gateway::build_router(state)).expect("Failed to mount router");
    TestApp { server, profiles }
}

/// App whose profile store fails closed: identity works, documents do not
pub fn spawn_degraded_app() -> TestServer {
    let identity = Arc::new(InMemoryIdentity::new());
    let profiles = Arc::new(DisabledProfileRepository);

    let auth = Arc::new(AuthService::new(identity, profiles.clone()));
    let state = AppState::new(test_config(), auth, profiles, None);

    TestServer::new(gateway::build_router(state)).expect("Failed to mount router")
}

pub fn bearer(token: &str) -> HeaderValue {
    format!("Bearer {}", token)
        .parse()
        .expect("invalid header value")
}

/// Register a user and return (session token, account id)
pub async fn register_user(server: &TestServer, email: &str, username: &str) -> (String, String) {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": email,
            "password": "hunter22secret",
            "name": "Test Player",
            "username": username,
        }))
        .await;

    assert_eq!(response.status_code(), 200, "registration failed");
    let body: Value = response.json();
    let token = body["token"].as_str().expect("token missing").to_string();
    let account_id = body["user"]["account"]["id"]
        .as_str()
        .expect("account id missing")
        .to_string();
    (token, account_id)
}

/// Force a stored wallet balance through the repository (totals untouched)
pub async fn set_balance(profiles: &InMemoryProfileRepository, account_id: &str, balance: u64) {
    let profile = stored_profile(profiles, account_id).await;
    let mut next = profile.clone();
    next.wallet.balance = Credits::new(balance);
    profiles
        .update(account_id, profile.version, &next)
        .await
        .expect("failed to set balance");
}

pub async fn stored_profile(
    profiles: &InMemoryProfileRepository,
    account_id: &str,
) -> UserProfile {
    profiles
        .find_by_account(account_id)
        .await
        .expect("store error")
        .expect("profile missing")
}

pub async fn update_stored_profile(
    profiles: &InMemoryProfileRepository,
    account_id: &str,
    mutate: impl FnOnce(&mut UserProfile),
) {
    let profile = stored_profile(profiles, account_id).await;
    let mut next = profile.clone();
    mutate(&mut next);
    profiles
        .update(account_id, profile.version, &next)
        .await
        .expect("failed to update stored profile");
}

/// Helper function to parse error responses:
/// `{"error": {"code", "message", "category", "details"?}}`
pub fn parse_error(body: &Value) -> (String, String, String) {
    let error = body.get("error").expect("no error object");
    (
        error["code"].as_str().expect("no code").to_string(),
        error["message"].as_str().expect("no message").to_string(),
        error["category"].as_str().expect("no category").to_string(),
    )
}

pub use header::AUTHORIZATION;
