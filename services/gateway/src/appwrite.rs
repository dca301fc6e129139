//! HTTP client for the hosted backend (Appwrite-style REST API)
//!
//! Wraps the identity endpoints (accounts/sessions) and the document
//! endpoints (profile collection) behind typed calls with explicit
//! status-code mapping. Document updates carry a version precondition;
//! the store answers 409 when the precondition fails.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use shared::errors::{ErrorCategory, ErrorCode, ServiceError};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Header carrying the expected document version on conditional updates
pub const DOCUMENT_VERSION_HEADER: &str = "X-Document-Version";

#[derive(Debug, thiserror::Error)]
pub enum AppwriteError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<AppwriteError> for ServiceError {
    fn from(err: AppwriteError) -> Self {
        match err {
            AppwriteError::Unauthorized(m) => {
                ServiceError::not_authenticated().with_context(m)
            }
            AppwriteError::NotFound(m) => ServiceError::new(
                ErrorCategory::NotFound,
                ErrorCode::NOT_FOUND_PROFILE,
                "Document not found",
            )
            .with_context(m),
            AppwriteError::Conflict(m) => ServiceError::new(
                ErrorCategory::Conflict,
                ErrorCode::CONFLICT_VERSION_MISMATCH,
                "Document was modified concurrently",
            )
            .with_context(m),
            AppwriteError::Api { status, message } if status >= 500 => {
                ServiceError::backend_unavailable(format!("{}: {}", status, message))
            }
            AppwriteError::Api { status, message } => {
                ServiceError::internal(format!("Backend rejected request ({})", status))
                    .with_context(message)
            }
            AppwriteError::Transport(e) => ServiceError::backend_unavailable(e),
        }
    }
}

/// An identity-provider account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    pub email: String,
    pub name: String,
}

/// An identity-provider session; `secret` is only present when the
/// session was just created with a server key
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub secret: Option<String>,
}

impl Session {
    /// The token a client presents on subsequent requests
    pub fn token(&self) -> String {
        match &self.secret {
            Some(secret) if !secret.is_empty() => secret.clone(),
            _ => self.id.clone(),
        }
    }
}

/// Stored-document envelope: system fields plus the flattened payload
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<Document<T>>,
}

#[derive(Clone)]
pub struct AppwriteClient {
    http_client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
}

impl AppwriteClient {
    pub fn new(endpoint: String, project_id: String, api_key: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id,
            api_key,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, format!("{}{}", self.endpoint, path))
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
    }

    /// Create an account, then the caller signs in separately
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, AppwriteError> {
        let response = self
            .request(reqwest::Method::POST, "/account")
            .json(&json!({
                "userId": "unique()",
                "email": email,
                "password": password,
                "name": name,
            }))
            .send()
            .await?;

        let account: Account = check(response).await?.json().await?;
        debug!(account_id = %account.id, "Account created");
        Ok(account)
    }

    pub async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AppwriteError> {
        let response = self
            .request(reqwest::Method::POST, "/account/sessions/email")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let session: Session = check(response).await?.json().await?;
        debug!(session_id = %session.id, "Session created");
        Ok(session)
    }

    pub async fn get_account(&self, session_token: &str) -> Result<Account, AppwriteError> {
        let response = self
            .request(reqwest::Method::GET, "/account")
            .header("X-Appwrite-Session", session_token)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    pub async fn delete_current_session(
        &self,
        session_token: &str,
    ) -> Result<(), AppwriteError> {
        let response = self
            .request(reqwest::Method::DELETE, "/account/sessions/current")
            .header("X-Appwrite-Session", session_token)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    pub async fn create_document<T: Serialize + DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &T,
    ) -> Result<Document<T>, AppwriteError> {
        let path = format!(
            "/databases/{}/collections/{}/documents",
            database_id, collection_id
        );
        let response = self
            .request(reqwest::Method::POST, &path)
            .json(&json!({ "documentId": document_id, "data": data }))
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    pub async fn get_document<T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Document<T>, AppwriteError> {
        let path = format!(
            "/databases/{}/collections/{}/documents/{}",
            database_id, collection_id, document_id
        );
        let response = self.request(reqwest::Method::GET, &path).send().await?;

        Ok(check(response).await?.json().await?)
    }

    /// Conditional update: the store rejects the write with 409 when the
    /// stored version differs from `expected_version`
    pub async fn update_document<T: Serialize + DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &T,
        expected_version: u64,
    ) -> Result<Document<T>, AppwriteError> {
        let path = format!(
            "/databases/{}/collections/{}/documents/{}",
            database_id, collection_id, document_id
        );
        let response = self
            .request(reqwest::Method::PATCH, &path)
            .header(DOCUMENT_VERSION_HEADER, expected_version)
            .json(&json!({ "data": data }))
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[String],
    ) -> Result<DocumentList<T>, AppwriteError> {
        let path = format!(
            "/databases/{}/collections/{}/documents",
            database_id, collection_id
        );
        let pairs: Vec<(&str, &str)> = queries
            .iter()
            .map(|q| ("queries[]", q.as_str()))
            .collect();
        let response = self
            .request(reqwest::Method::GET, &path)
            .query(&pairs)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    pub async fn health(&self) -> Result<(), AppwriteError> {
        let response = self.request(reqwest::Method::GET, "/health").send().await?;
        check(response).await?;
        Ok(())
    }
}

/// Equality query in the backend's wire syntax
pub fn equal_query(attribute: &str, value: &str) -> String {
    json!({ "method": "equal", "attribute": attribute, "values": [value] }).to_string()
}

pub fn limit_query(limit: u64) -> String {
    json!({ "method": "limit", "values": [limit] }).to_string()
}

pub fn offset_query(offset: u64) -> String {
    json!({ "method": "offset", "values": [offset] }).to_string()
}

/// Map non-success statuses into typed errors, extracting the backend's
/// error message when one is present
async fn check(response: reqwest::Response) -> Result<reqwest::Response, AppwriteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => "unknown error".to_string(),
    };

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppwriteError::Unauthorized(message),
        StatusCode::NOT_FOUND => AppwriteError::NotFound(message),
        StatusCode::CONFLICT => AppwriteError::Conflict(message),
        _ => AppwriteError::Api {
            status: status.as_u16(),
            message,
        },
    })
}
