use async_trait::async_trait;
use serde::Serialize;

use shared::errors::{Result, ServiceError};
use shared::profile::UserProfile;

/// A stored profile together with its owning account id (the document id)
#[derive(Debug, Clone, Serialize)]
pub struct ProfileRecord {
    pub account_id: String,
    pub profile: UserProfile,
}

/// Access to the per-user profile documents
///
/// `update` is a compare-and-set: the write is accepted only when the
/// stored version equals `expected_version`, and the stored copy comes
/// back with the version bumped. Callers re-fetch and re-apply their
/// transform on a conflict.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, account_id: &str, profile: &UserProfile) -> Result<UserProfile>;

    async fn find_by_account(&self, account_id: &str) -> Result<Option<UserProfile>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<ProfileRecord>>;

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<ProfileRecord>>;

    async fn update(
        &self,
        account_id: &str,
        expected_version: u64,
        profile: &UserProfile,
    ) -> Result<UserProfile>;
}

/// Fail-closed store wired when the hosted backend is not configured
pub struct DisabledProfileRepository;

impl DisabledProfileRepository {
    fn unavailable() -> ServiceError {
        tracing::warn!("Profile-store call rejected: hosted backend not configured");
        ServiceError::configuration_missing("document store")
    }
}

#[async_trait]
impl ProfileRepository for DisabledProfileRepository {
    async fn create(&self, _account_id: &str, _profile: &UserProfile) -> Result<UserProfile> {
        Err(Self::unavailable())
    }

    async fn find_by_account(&self, _account_id: &str) -> Result<Option<UserProfile>> {
        Err(Self::unavailable())
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<ProfileRecord>> {
        Err(Self::unavailable())
    }

    async fn list(&self, _limit: u64, _offset: u64) -> Result<Vec<ProfileRecord>> {
        Err(Self::unavailable())
    }

    async fn update(
        &self,
        _account_id: &str,
        _expected_version: u64,
        _profile: &UserProfile,
    ) -> Result<UserProfile> {
        Err(Self::unavailable())
    }
}

#[cfg(test)]
#[path = "profile_repository_tests.rs"]
mod profile_repository_tests;
