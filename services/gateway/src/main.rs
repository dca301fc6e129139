use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway::appwrite::AppwriteClient;
use gateway::config::Config;
use gateway::identity::{AppwriteIdentity, DisabledIdentity, IdentityProvider};
use gateway::repository::{
    AppwriteProfileRepository, DisabledProfileRepository, ProfileRepository,
};
use gateway::services::AuthService;
use gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with JSON formatting (configurable via env)
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string())
        .eq_ignore_ascii_case("json");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gateway=info,tower_http=info".into());

    if use_json {
        // JSON structured logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Human-readable logging for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        service = "gateway",
        version = env!("CARGO_PKG_VERSION"),
        log_format = if use_json { "json" } else { "text" },
        "Starting gateway service"
    );

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        backend_configured = config.backend.is_some(),
        admin_operators = !config.admin.is_empty(),
        "Configuration loaded"
    );

    // Wire the hosted backend, or fail-closed stand-ins in degraded mode
    let (identity, profiles, appwrite): (
        Arc<dyn IdentityProvider>,
        Arc<dyn ProfileRepository>,
        Option<Arc<AppwriteClient>>,
    ) = match &config.backend {
        Some(backend) => {
            let client = Arc::new(AppwriteClient::new(
                backend.endpoint.clone(),
                backend.project_id.clone(),
                backend.api_key.clone(),
            ));
            (
                Arc::new(AppwriteIdentity::new(client.clone())),
                Arc::new(AppwriteProfileRepository::new(client.clone(), backend)),
                Some(client),
            )
        }
        None => {
            tracing::warn!(
                "Hosted backend not configured; auth and wallet operations fail closed"
            );
            (
                Arc::new(DisabledIdentity),
                Arc::new(DisabledProfileRepository),
                None,
            )
        }
    };

    let auth = Arc::new(AuthService::new(identity, profiles.clone()));
    let app_state = AppState::new(config.clone(), auth, profiles, appwrite);

    // Build router
    let app = gateway::build_router(app_state);

    // Start metrics server
    let metrics_handle = tokio::spawn(start_metrics_server(config.metrics_port));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
    tracing::info!("Gateway API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    metrics_handle.await??;

    Ok(())
}

async fn start_metrics_server(port: u16) -> anyhow::Result<()> {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let handle = builder.install_recorder()?;

    let app = Router::new().route(
        "/metrics",
        get(|| async move { handle.render() }),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Metrics server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
