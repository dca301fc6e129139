use serde::Deserialize;
use std::collections::HashMap;
use std::env;

use crate::directory::{AdminDirectory, AdminOperator};

#[derive(Debug, Clone)]
pub struct Config {
    pub api_port: u16,
    pub metrics_port: u16,
    /// Hosted-backend settings; `None` puts the gateway in degraded mode
    /// (auth fails closed, health reports it, process keeps serving)
    pub backend: Option<BackendConfig>,
    pub admin: AdminDirectory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub users_collection_id: String,
    pub storage_bucket_id: String,
}

impl BackendConfig {
    /// Read the hosted-backend settings, returning `None` when any are
    /// missing. Absence is a degraded mode, not a startup failure.
    fn from_env() -> Option<Self> {
        let required = [
            "APPWRITE_ENDPOINT",
            "APPWRITE_PROJECT_ID",
            "APPWRITE_API_KEY",
            "APPWRITE_DATABASE_ID",
            "APPWRITE_USERS_COLLECTION_ID",
            "APPWRITE_BUCKET_ID",
        ];

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|var| env::var(var).map(|v| v.trim().is_empty()).unwrap_or(true))
            .collect();

        if !missing.is_empty() {
            tracing::warn!(
                missing = ?missing,
                "Hosted backend not configured; starting in degraded mode"
            );
            return None;
        }

        Some(Self {
            endpoint: env::var("APPWRITE_ENDPOINT").ok()?,
            project_id: env::var("APPWRITE_PROJECT_ID").ok()?,
            api_key: env::var("APPWRITE_API_KEY").ok()?,
            database_id: env::var("APPWRITE_DATABASE_ID").ok()?,
            users_collection_id: env::var("APPWRITE_USERS_COLLECTION_ID").ok()?,
            storage_bucket_id: env::var("APPWRITE_BUCKET_ID").ok()?,
        })
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let admin = match env::var("ADMIN_OPERATORS") {
            Ok(raw) if !raw.trim().is_empty() => AdminDirectory::new(parse_operators(&raw)?),
            _ => {
                tracing::info!("No admin operators configured; admin login disabled");
                AdminDirectory::default()
            }
        };

        Ok(Config {
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            metrics_port: env::var("METRICS_PORT")
                .unwrap_or_else(|_| "9090".to_string())
                .parse()?,
            backend: BackendConfig::from_env(),
            admin,
        })
    }
}

/// Parse the injected operator map:
/// `{"root": {"key": "...", "role": "super_admin"}, ...}`
fn parse_operators(raw: &str) -> anyhow::Result<HashMap<String, AdminOperator>> {
    serde_json::from_str(raw)
        .map_err(|e| anyhow::anyhow!("Invalid ADMIN_OPERATORS value: {}", e))
}
