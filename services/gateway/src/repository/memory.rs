//! In-memory profile store
//!
//! Backs the integration tests and gives the compare-and-set contract a
//! reference implementation: the version check and the write happen under
//! one lock, so a stale writer always observes the conflict.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use shared::errors::{Result, ServiceError};
use shared::profile::UserProfile;

use super::profile_repository::{ProfileRecord, ProfileRepository};

#[derive(Default)]
pub struct InMemoryProfileRepository {
    documents: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, account_id: &str, profile: &UserProfile) -> Result<UserProfile> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(account_id) {
            return Err(ServiceError::document_exists(account_id));
        }

        let mut stored = profile.clone();
        stored.version = 0;
        documents.insert(account_id.to_string(), stored.clone());
        Ok(stored)
    }

    async fn find_by_account(&self, account_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.documents.read().await.get(account_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<ProfileRecord>> {
        Ok(self
            .documents
            .read()
            .await
            .iter()
            .find(|(_, profile)| profile.username.as_str() == username)
            .map(|(account_id, profile)| ProfileRecord {
                account_id: account_id.clone(),
                profile: profile.clone(),
            }))
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<ProfileRecord>> {
        let documents = self.documents.read().await;
        let mut records: Vec<ProfileRecord> = documents
            .iter()
            .map(|(account_id, profile)| ProfileRecord {
                account_id: account_id.clone(),
                profile: profile.clone(),
            })
            .collect();

        // Stable listing order: oldest accounts first.
        records.sort_by(|a, b| {
            a.profile
                .created_at
                .cmp(&b.profile.created_at)
                .then_with(|| a.account_id.cmp(&b.account_id))
        });

        Ok(records
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn update(
        &self,
        account_id: &str,
        expected_version: u64,
        profile: &UserProfile,
    ) -> Result<UserProfile> {
        let mut documents = self.documents.write().await;
        let stored = documents
            .get_mut(account_id)
            .ok_or_else(|| ServiceError::profile_not_found(account_id))?;

        if stored.version != expected_version {
            return Err(ServiceError::version_conflict(account_id, expected_version));
        }

        let mut next = profile.clone();
        next.version = expected_version + 1;
        *stored = next.clone();
        Ok(next)
    }
}
