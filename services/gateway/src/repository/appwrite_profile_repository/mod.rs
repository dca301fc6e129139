//! Hosted-backend implementation of the profile store
//!
//! Documents live in a single users collection, keyed by the identity
//! provider's account id. Updates send the expected version as a
//! precondition; a 409 from the store surfaces as a conflict error the
//! facade retries against the fresh document.

mod documents;

use async_trait::async_trait;
use std::sync::Arc;

use shared::errors::{Result, ServiceError};
use shared::profile::UserProfile;

use crate::appwrite::{equal_query, limit_query, offset_query, AppwriteClient, AppwriteError};
use crate::config::BackendConfig;

use super::profile_repository::{ProfileRecord, ProfileRepository};

pub use documents::record_from_document;

pub struct AppwriteProfileRepository {
    client: Arc<AppwriteClient>,
    database_id: String,
    collection_id: String,
}

impl AppwriteProfileRepository {
    pub fn new(client: Arc<AppwriteClient>, config: &BackendConfig) -> Self {
        Self {
            client,
            database_id: config.database_id.clone(),
            collection_id: config.users_collection_id.clone(),
        }
    }
}

#[async_trait]
impl ProfileRepository for AppwriteProfileRepository {
    async fn create(&self, account_id: &str, profile: &UserProfile) -> Result<UserProfile> {
        let mut seed = profile.clone();
        seed.version = 0;

        let document = self
            .client
            .create_document(&self.database_id, &self.collection_id, account_id, &seed)
            .await
            .map_err(|e| match e {
                AppwriteError::Conflict(_) => ServiceError::document_exists(account_id),
                other => other.into(),
            })?;

        Ok(document.data)
    }

    async fn find_by_account(&self, account_id: &str) -> Result<Option<UserProfile>> {
        match self
            .client
            .get_document::<UserProfile>(&self.database_id, &self.collection_id, account_id)
            .await
        {
            Ok(document) => Ok(Some(document.data)),
            Err(AppwriteError::NotFound(_)) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<ProfileRecord>> {
        let list = self
            .client
            .list_documents::<UserProfile>(
                &self.database_id,
                &self.collection_id,
                &[equal_query("username", username), limit_query(1)],
            )
            .await
            .map_err(ServiceError::from)?;

        Ok(list.documents.into_iter().next().map(record_from_document))
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<ProfileRecord>> {
        let list = self
            .client
            .list_documents::<UserProfile>(
                &self.database_id,
                &self.collection_id,
                &[limit_query(limit), offset_query(offset)],
            )
            .await
            .map_err(ServiceError::from)?;

        Ok(list
            .documents
            .into_iter()
            .map(record_from_document)
            .collect())
    }

    async fn update(
        &self,
        account_id: &str,
        expected_version: u64,
        profile: &UserProfile,
    ) -> Result<UserProfile> {
        let mut next = profile.clone();
        next.version = expected_version + 1;

        let document = self
            .client
            .update_document(
                &self.database_id,
                &self.collection_id,
                account_id,
                &next,
                expected_version,
            )
            .await
            .map_err(|e| match e {
                AppwriteError::Conflict(_) => {
                    ServiceError::version_conflict(account_id, expected_version)
                }
                AppwriteError::NotFound(_) => ServiceError::profile_not_found(account_id),
                other => other.into(),
            })?;

        Ok(document.data)
    }
}
