//! Identity-provider seam
//!
//! The gateway talks to the hosted identity service through this trait so
//! the session facade can be exercised against an in-memory provider in
//! tests, and wired with a fail-closed provider when the hosted backend is
//! not configured.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::errors::{Result, ServiceError};

use crate::appwrite::{AppwriteClient, AppwriteError};

/// An authenticated identity, decoupled from the provider's wire format
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account; does not sign in
    async fn create_account(&self, email: &str, password: &str, name: &str) -> Result<Account>;

    /// Create a session, returning the token the client presents later
    async fn create_session(&self, email: &str, password: &str) -> Result<String>;

    /// Resolve the account behind a session token
    async fn current_account(&self, session_token: &str) -> Result<Account>;

    /// Destroy the session behind a token
    async fn delete_session(&self, session_token: &str) -> Result<()>;
}

/// Hosted-backend implementation
pub struct AppwriteIdentity {
    client: Arc<AppwriteClient>,
}

impl AppwriteIdentity {
    pub fn new(client: Arc<AppwriteClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityProvider for AppwriteIdentity {
    async fn create_account(&self, email: &str, password: &str, name: &str) -> Result<Account> {
        let account = self
            .client
            .create_account(email, password, name)
            .await
            .map_err(|e| match e {
                AppwriteError::Conflict(_) => ServiceError::account_exists(email),
                other => other.into(),
            })?;

        Ok(Account {
            id: account.id,
            email: account.email,
            name: account.name,
        })
    }

    async fn create_session(&self, email: &str, password: &str) -> Result<String> {
        let session = self
            .client
            .create_email_session(email, password)
            .await
            .map_err(|e| match e {
                AppwriteError::Unauthorized(_) => ServiceError::invalid_credentials(),
                other => other.into(),
            })?;

        Ok(session.token())
    }

    async fn current_account(&self, session_token: &str) -> Result<Account> {
        let account = self.client.get_account(session_token).await?;
        Ok(Account {
            id: account.id,
            email: account.email,
            name: account.name,
        })
    }

    async fn delete_session(&self, session_token: &str) -> Result<()> {
        Ok(self.client.delete_current_session(session_token).await?)
    }
}

/// Fail-closed implementation wired when the hosted backend is not
/// configured: every call reports the configuration error instead of
/// crashing the process
pub struct DisabledIdentity;

impl DisabledIdentity {
    fn unavailable() -> ServiceError {
        tracing::warn!("Identity call rejected: hosted backend not configured");
        ServiceError::configuration_missing("identity provider")
    }
}

#[async_trait]
impl IdentityProvider for DisabledIdentity {
    async fn create_account(&self, _email: &str, _password: &str, _name: &str) -> Result<Account> {
        Err(Self::unavailable())
    }

    async fn create_session(&self, _email: &str, _password: &str) -> Result<String> {
        Err(Self::unavailable())
    }

    async fn current_account(&self, _session_token: &str) -> Result<Account> {
        Err(Self::unavailable())
    }

    async fn delete_session(&self, _session_token: &str) -> Result<()> {
        Err(Self::unavailable())
    }
}

struct StoredAccount {
    account: Account,
    password: String,
}

/// In-memory provider backing the integration tests
#[derive(Default)]
pub struct InMemoryIdentity {
    accounts: RwLock<HashMap<String, StoredAccount>>,
    sessions: RwLock<HashMap<String, String>>,
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentity {
    async fn create_account(&self, email: &str, password: &str, name: &str) -> Result<Account> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(ServiceError::account_exists(email));
        }

        let account = Account {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
        };
        accounts.insert(
            email.to_string(),
            StoredAccount {
                account: account.clone(),
                password: password.to_string(),
            },
        );
        Ok(account)
    }

    async fn create_session(&self, email: &str, password: &str) -> Result<String> {
        let accounts = self.accounts.read().await;
        let stored = accounts
            .get(email)
            .filter(|stored| stored.password == password)
            .ok_or_else(ServiceError::invalid_credentials)?;

        let token = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(token.clone(), stored.account.id.clone());
        Ok(token)
    }

    async fn current_account(&self, session_token: &str) -> Result<Account> {
        let sessions = self.sessions.read().await;
        let account_id = sessions
            .get(session_token)
            .ok_or_else(ServiceError::not_authenticated)?;

        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|stored| &stored.account.id == account_id)
            .map(|stored| stored.account.clone())
            .ok_or_else(ServiceError::not_authenticated)
    }

    async fn delete_session(&self, session_token: &str) -> Result<()> {
        self.sessions.write().await.remove(session_token);
        Ok(())
    }
}
