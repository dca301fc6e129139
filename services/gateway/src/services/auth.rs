//! Auth/session facade
//!
//! Ties each authenticated session to its backing profile document and
//! exposes the `AuthUser` aggregate to the handlers. Sessions move
//! Unauthenticated -> Authenticating -> Authenticated, and fall back to
//! Unauthenticated on logout or a failed session check.
//!
//! All profile mutation funnels through one version-checked
//! read-modify-write: fetch the freshest document, apply the pure
//! transform, persist against the fetched version, and only then replace
//! the cached aggregate. A concurrent writer surfaces as a version
//! conflict; the transform is re-applied against the fresh document a
//! bounded number of times before the conflict reaches the caller.

use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use shared::constants::CONFLICT_RETRY_LIMIT;
use shared::errors::{ErrorCategory, ErrorCode, Result, ServiceError};
use shared::profile::{TransactionType, UserProfile};
use shared::stats::{apply_match_result, MatchResult};
use shared::types::{Credits, Username};
use shared::wallet;

use crate::identity::{Account, IdentityProvider};
use crate::repository::ProfileRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Unauthenticated,
    Authenticating,
    Authenticated,
}

/// Identity account plus the attached profile document
///
/// `profile` is `None` in degraded mode: authentication succeeded but the
/// document is unavailable. Consumers must treat it as optional.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub account: Account,
    pub profile: Option<UserProfile>,
}

struct SessionEntry {
    status: SessionStatus,
    user: Option<AuthUser>,
}

/// Fields a profile update may change
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub username: Option<Username>,
}

pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl AuthService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            identity,
            profiles,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create the account, sign in, then attempt to create the backing
    /// profile document. Document creation failing is the deliberate
    /// degraded mode: the registration still succeeds, with no profile
    /// attached.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        username: Username,
    ) -> Result<(String, AuthUser)> {
        // Best-effort availability check; a store failure here must not
        // block account creation.
        match self.profiles.find_by_username(username.as_str()).await {
            Ok(Some(_)) => {
                return Err(ServiceError::new(
                    ErrorCategory::Validation,
                    ErrorCode::VALIDATION_INVALID_USERNAME,
                    "Username is already taken",
                ));
            }
            Ok(None) => {}
            Err(e) => {
                debug!(error = %e, "Username availability check skipped");
            }
        }

        let account = self.identity.create_account(email, password, name).await?;
        let token = self.identity.create_session(email, password).await?;
        self.set_status(&token, SessionStatus::Authenticating).await;

        let seed = UserProfile::register(name, email, username);
        let profile = match self.profiles.create(&account.id, &seed).await {
            Ok(stored) => Some(stored),
            Err(e) => {
                warn!(
                    account_id = %account.id,
                    error = %e,
                    "Profile document creation failed; account continues without profile"
                );
                metrics::counter!("degraded_sessions_total").increment(1);
                None
            }
        };

        let user = AuthUser { account, profile };
        self.cache_user(&token, user.clone()).await;
        metrics::counter!("registrations_total").increment(1);
        info!(account_id = %user.account.id, "Account registered");

        Ok((token, user))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(String, AuthUser)> {
        let token = self.identity.create_session(email, password).await?;
        self.set_status(&token, SessionStatus::Authenticating).await;

        let account = match self.identity.current_account(&token).await {
            Ok(account) => account,
            Err(e) => {
                self.sessions.write().await.remove(&token);
                return Err(e);
            }
        };

        let user = AuthUser {
            profile: self.load_profile(&account.id).await,
            account,
        };
        self.cache_user(&token, user.clone()).await;
        metrics::counter!("logins_total").increment(1);

        Ok((token, user))
    }

    /// Destroy the remote session and drop the cached aggregate. A failed
    /// remote delete is logged and swallowed; the local session is gone
    /// either way.
    pub async fn logout(&self, token: &str) {
        if let Err(e) = self.identity.delete_session(token).await {
            warn!(error = %e, "Remote session delete failed during logout");
        }
        self.sessions.write().await.remove(token);
    }

    /// Check for an existing valid session. `Ok(None)` means
    /// unauthenticated; that is a state, not an error.
    pub async fn restore_session(&self, token: &str) -> Result<Option<AuthUser>> {
        if let Some(user) = self.cached_user(token).await {
            return Ok(Some(user));
        }

        self.set_status(token, SessionStatus::Authenticating).await;
        let account = match self.identity.current_account(token).await {
            Ok(account) => account,
            Err(e) => {
                debug!(error = %e, "Session check failed; treating as unauthenticated");
                self.sessions.write().await.remove(token);
                return Ok(None);
            }
        };

        let user = AuthUser {
            profile: self.load_profile(&account.id).await,
            account,
        };
        self.cache_user(token, user.clone()).await;
        Ok(Some(user))
    }

    /// The current user, required: unauthenticated is an error here
    pub async fn session_user(&self, token: &str) -> Result<AuthUser> {
        self.restore_session(token)
            .await?
            .ok_or_else(ServiceError::not_authenticated)
    }

    pub async fn session_status(&self, token: &str) -> SessionStatus {
        self.sessions
            .read()
            .await
            .get(token)
            .map(|entry| entry.status)
            .unwrap_or(SessionStatus::Unauthenticated)
    }

    pub async fn update_profile(&self, token: &str, update: ProfileUpdate) -> Result<AuthUser> {
        self.read_modify_write(token, move |profile| {
            let mut next = profile.clone();
            if let Some(name) = &update.name {
                next.name = name.clone();
            }
            if let Some(username) = &update.username {
                next.username = username.clone();
            }
            Ok(next)
        })
        .await
    }

    /// Apply a match result to the stats, and on a win credit the posted
    /// reward as a `match_reward` transaction.
    pub async fn record_match_result(
        &self,
        token: &str,
        match_id: &str,
        result: MatchResult,
        reward: Option<Credits>,
    ) -> Result<AuthUser> {
        if reward.is_some() && result == MatchResult::Loss {
            return Err(ServiceError::invalid_amount("a reward requires a win"));
        }

        let match_id = match_id.to_string();
        self.read_modify_write(token, move |profile| {
            let mut next = profile.clone();
            next.game_stats = apply_match_result(&profile.game_stats, result);
            if let Some(reward) = reward {
                next.wallet = wallet::credit(
                    &next.wallet,
                    reward,
                    "Match reward",
                    TransactionType::MatchReward,
                    Some(match_id.clone()),
                    None,
                )?;
            }
            Ok(next)
        })
        .await
    }

    /// Charge a match entry fee. `InsufficientCredits` is checked against
    /// the freshest fetched wallet and propagates to the caller unmodified.
    pub async fn deduct_match_entry(
        &self,
        token: &str,
        fee: Credits,
        description: &str,
        match_id: &str,
    ) -> Result<AuthUser> {
        let description = description.to_string();
        let match_id = match_id.to_string();
        let user = self
            .read_modify_write(token, move |profile| {
                let mut next = profile.clone();
                next.wallet = wallet::debit(&profile.wallet, fee, &description, &match_id)?;
                Ok(next)
            })
            .await?;

        metrics::counter!("match_entries_total").increment(1);
        metrics::counter!("credits_spent_total").increment(fee.as_u64());
        Ok(user)
    }

    /// Add credits to the current user's wallet (purchase placeholder)
    pub async fn add_credits(
        &self,
        token: &str,
        amount: Credits,
        description: &str,
    ) -> Result<AuthUser> {
        let description = description.to_string();
        self.read_modify_write(token, move |profile| {
            let mut next = profile.clone();
            next.wallet = wallet::credit(
                &profile.wallet,
                amount,
                &description,
                TransactionType::Credit,
                None,
                None,
            )?;
            Ok(next)
        })
        .await
    }

    /// Operator-driven credit (adjustment or refund) against an arbitrary
    /// account. Does not touch session caches; the owner sees the change
    /// on their next fetch.
    pub async fn admin_credit(
        &self,
        account_id: &str,
        amount: Credits,
        description: &str,
        match_id: Option<String>,
        admin_id: &str,
    ) -> Result<UserProfile> {
        let description = description.to_string();
        let admin_id = admin_id.to_string();
        let profile = self
            .write_profile(account_id, move |profile| {
                let mut next = profile.clone();
                next.wallet = wallet::credit(
                    &profile.wallet,
                    amount,
                    &description,
                    TransactionType::AdminAdjustment,
                    match_id.clone(),
                    Some(admin_id.clone()),
                )?;
                Ok(next)
            })
            .await?;

        metrics::counter!("admin_adjustments_total").increment(1);
        Ok(profile)
    }

    async fn load_profile(&self, account_id: &str) -> Option<UserProfile> {
        match self.profiles.find_by_account(account_id).await {
            Ok(Some(profile)) => Some(profile),
            Ok(None) => {
                warn!(account_id, "No profile document; session is degraded");
                metrics::counter!("degraded_sessions_total").increment(1);
                None
            }
            Err(e) => {
                warn!(account_id, error = %e, "Profile fetch failed; session is degraded");
                metrics::counter!("degraded_sessions_total").increment(1);
                None
            }
        }
    }

    async fn read_modify_write<F>(&self, token: &str, transform: F) -> Result<AuthUser>
    where
        F: Fn(&UserProfile) -> Result<UserProfile> + Send + Sync,
    {
        let user = self.session_user(token).await?;
        let stored = self.write_profile(&user.account.id, transform).await?;

        let user = AuthUser {
            account: user.account,
            profile: Some(stored),
        };
        self.cache_user(token, user.clone()).await;
        Ok(user)
    }

    /// The version-checked persist loop shared by every mutation
    async fn write_profile<F>(&self, account_id: &str, transform: F) -> Result<UserProfile>
    where
        F: Fn(&UserProfile) -> Result<UserProfile> + Send + Sync,
    {
        for attempt in 1..=CONFLICT_RETRY_LIMIT {
            let current = self
                .profiles
                .find_by_account(account_id)
                .await?
                .ok_or_else(|| ServiceError::profile_not_found(account_id))?;

            let mut next = transform(&current)?;
            next.updated_at = Utc::now();

            match self
                .profiles
                .update(account_id, current.version, &next)
                .await
            {
                Ok(stored) => return Ok(stored),
                Err(e) if e.is_conflict() && attempt < CONFLICT_RETRY_LIMIT => {
                    warn!(
                        account_id,
                        attempt,
                        "Concurrent profile write detected; re-applying against fresh document"
                    );
                    metrics::counter!("profile_write_conflicts_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        unreachable!()
    }

    async fn set_status(&self, token: &str, status: SessionStatus) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            token.to_string(),
            SessionEntry { status, user: None },
        );
    }

    async fn cache_user(&self, token: &str, user: AuthUser) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            token.to_string(),
            SessionEntry {
                status: SessionStatus::Authenticated,
                user: Some(user),
            },
        );
        metrics::gauge!("active_sessions").set(sessions.len() as f64);
    }

    async fn cached_user(&self, token: &str) -> Option<AuthUser> {
        self.sessions
            .read()
            .await
            .get(token)
            .filter(|entry| entry.status == SessionStatus::Authenticated)
            .and_then(|entry| entry.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::identity::InMemoryIdentity;
    use crate::repository::{
        DisabledProfileRepository, InMemoryProfileRepository, ProfileRecord,
    };

    /// Delegating store that reports a version conflict on the first N
    /// update calls, simulating a concurrent writer.
    struct ConflictingRepository {
        inner: InMemoryProfileRepository,
        conflicts_left: AtomicU32,
    }

    impl ConflictingRepository {
        fn new(conflicts: u32) -> Self {
            Self {
                inner: InMemoryProfileRepository::new(),
                conflicts_left: AtomicU32::new(conflicts),
            }
        }
    }

    #[async_trait]
    impl ProfileRepository for ConflictingRepository {
        async fn create(&self, account_id: &str, profile: &UserProfile) -> Result<UserProfile> {
            self.inner.create(account_id, profile).await
        }

        async fn find_by_account(&self, account_id: &str) -> Result<Option<UserProfile>> {
            self.inner.find_by_account(account_id).await
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<ProfileRecord>> {
            self.inner.find_by_username(username).await
        }

        async fn list(&self, limit: u64, offset: u64) -> Result<Vec<ProfileRecord>> {
            self.inner.list(limit, offset).await
        }

        async fn update(
            &self,
            account_id: &str,
            expected_version: u64,
            profile: &UserProfile,
        ) -> Result<UserProfile> {
            let left = self.conflicts_left.load(Ordering::SeqCst);
            if left > 0 {
                self.conflicts_left.store(left - 1, Ordering::SeqCst);
                return Err(ServiceError::version_conflict(account_id, expected_version));
            }
            self.inner.update(account_id, expected_version, profile).await
        }
    }

    fn service_with(profiles: Arc<dyn ProfileRepository>) -> AuthService {
        AuthService::new(Arc::new(InMemoryIdentity::new()), profiles)
    }

    async fn registered(service: &AuthService) -> String {
        let (token, _) = service
            .register(
                "p@example.com",
                "hunter22secret",
                "Player",
                Username::try_from("player_one").unwrap(),
            )
            .await
            .unwrap();
        token
    }

    #[tokio::test]
    async fn test_session_state_machine() {
        let service = service_with(Arc::new(InMemoryProfileRepository::new()));
        let token = registered(&service).await;
        assert_eq!(
            service.session_status(&token).await,
            SessionStatus::Authenticated
        );

        service.logout(&token).await;
        assert_eq!(
            service.session_status(&token).await,
            SessionStatus::Unauthenticated
        );
        assert!(service.restore_session(&token).await.unwrap().is_none());

        assert_eq!(
            service.session_status("made-up-token").await,
            SessionStatus::Unauthenticated
        );
    }

    #[tokio::test]
    async fn test_degraded_registration_still_authenticates() {
        let service = service_with(Arc::new(DisabledProfileRepository));
        let (token, user) = service
            .register(
                "p@example.com",
                "hunter22secret",
                "Player",
                Username::try_from("player_one").unwrap(),
            )
            .await
            .unwrap();

        assert!(user.profile.is_none());
        assert_eq!(
            service.session_status(&token).await,
            SessionStatus::Authenticated
        );

        // Wallet operations need the document and fail cleanly.
        let err = service
            .deduct_match_entry(&token, Credits::new(50), "Match entry", "m-1")
            .await
            .unwrap_err();
        assert_eq!(err.code, "INTERNAL_CONFIGURATION");
    }

    #[tokio::test]
    async fn test_write_retries_through_a_conflict() {
        let service = service_with(Arc::new(ConflictingRepository::new(1)));
        let token = registered(&service).await;

        let user = service
            .deduct_match_entry(&token, Credits::new(50), "Match entry", "m-1")
            .await
            .unwrap();
        let wallet = &user.profile.unwrap().wallet;
        assert_eq!(wallet.balance.as_u64(), 950);
        assert_eq!(wallet.transactions[0].kind, TransactionType::MatchEntry);
    }

    #[tokio::test]
    async fn test_persistent_conflict_surfaces() {
        let service = service_with(Arc::new(ConflictingRepository::new(
            CONFLICT_RETRY_LIMIT + 2,
        )));
        let token = registered(&service).await;

        let err = service
            .deduct_match_entry(&token, Credits::new(50), "Match entry", "m-1")
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_insufficient_credits_propagates_unmodified() {
        let service = service_with(Arc::new(InMemoryProfileRepository::new()));
        let token = registered(&service).await;

        let err = service
            .deduct_match_entry(&token, Credits::new(5_000), "Match entry", "m-1")
            .await
            .unwrap_err();
        assert_eq!(err.code, "WALLET_INSUFFICIENT_CREDITS");
        let details = err.details.unwrap();
        assert_eq!(details["available"], 1_000);
        assert_eq!(details["shortfall"], 4_000);
    }

    #[tokio::test]
    async fn test_reward_requires_win() {
        let service = service_with(Arc::new(InMemoryProfileRepository::new()));
        let token = registered(&service).await;

        let err = service
            .record_match_result(&token, "m-1", MatchResult::Loss, Some(Credits::new(100)))
            .await
            .unwrap_err();
        assert_eq!(err.code, "VALIDATION_INVALID_AMOUNT");

        let user = service
            .record_match_result(&token, "m-1", MatchResult::Win, Some(Credits::new(100)))
            .await
            .unwrap();
        let profile = user.profile.unwrap();
        assert_eq!(profile.game_stats.wins, 1);
        assert_eq!(profile.wallet.balance.as_u64(), 1_100);
        assert_eq!(
            profile.wallet.transactions[0].kind,
            TransactionType::MatchReward
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let service = service_with(Arc::new(InMemoryProfileRepository::new()));
        registered(&service).await;

        let err = service
            .register(
                "other@example.com",
                "hunter22secret",
                "Other",
                Username::try_from("player_one").unwrap(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, "VALIDATION_INVALID_USERNAME");
    }
}
