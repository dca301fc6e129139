use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn detailed_health(State(state): State<AppState>) -> Json<Value> {
    let backend = match &state.appwrite {
        None => "unconfigured",
        Some(client) => match client.health().await {
            Ok(()) => "healthy",
            Err(e) => {
                tracing::warn!(error = %e, "Hosted backend health check failed");
                "unreachable"
            }
        },
    };

    Json(json!({
        "status": if backend == "healthy" { "healthy" } else { "degraded" },
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "components": {
            "hosted_backend": backend,
            "admin_directory": if state.config.admin.is_empty() { "empty" } else { "configured" },
        }
    }))
}
