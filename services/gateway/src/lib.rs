// Library interface for the gateway - exposes modules for testing

pub mod anticheat;
pub mod appwrite;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod domain;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod identity;
pub mod registration;
pub mod repository;
pub mod services;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
        // Auth/session
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/session", get(handlers::auth::session))
        // Profile
        .route(
            "/api/profile",
            get(handlers::profile::get_profile).patch(handlers::profile::update_profile),
        )
        // Wallet
        .route("/api/wallet", get(handlers::wallet::get_wallet))
        .route(
            "/api/wallet/transactions",
            get(handlers::wallet::list_transactions),
        )
        .route(
            "/api/wallet/credits",
            post(handlers::wallet::purchase_credits),
        )
        // Match registration
        .route("/api/matches/catalog", get(handlers::matches::get_catalog))
        .route("/api/matches/slots", get(handlers::matches::get_slots))
        .route(
            "/api/matches/register",
            post(handlers::matches::register_match),
        )
        .route(
            "/api/matches/:match_id/result",
            post(handlers::matches::report_result),
        )
        // Admin surface
        .route("/api/admin/login", post(handlers::admin::login))
        .route("/api/admin/users", get(handlers::admin::list_users))
        .route("/api/admin/users/:account_id", get(handlers::admin::get_user))
        .route(
            "/api/admin/users/:account_id/transactions",
            get(handlers::admin::user_transactions),
        )
        .route(
            "/api/admin/users/:account_id/adjustments",
            post(handlers::admin::adjust_credits),
        )
        .route(
            "/api/admin/users/:account_id/refunds",
            post(handlers::admin::refund),
        )
        .route(
            "/api/admin/anticheat",
            get(handlers::admin::anticheat_reports),
        )
        // Metrics
        .route("/metrics", get(handlers::metrics::metrics_handler))
        // State
        .with_state(state)
        // Middleware
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
