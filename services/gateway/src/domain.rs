use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::profile::Wallet;
use shared::stats::MatchResult;
use shared::types::Credits;

use crate::catalog::{EntryTier, GameMode, SlotTime, TeamSize, TierId};
use crate::services::AuthUser;

// Custom deserializer enforcing the per-operation amount rules during
// request parsing
fn deserialize_credits<'de, D>(deserializer: D) -> Result<Credits, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let amount = u64::deserialize(deserializer)?;
    Credits::operation_amount(amount)
        .map_err(|e| serde::de::Error::custom(format!("Invalid credit amount: {}", e)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    pub username: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PurchaseCreditsRequest {
    #[serde(deserialize_with = "deserialize_credits")]
    pub amount: Credits,
    #[validate(length(max = 200))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterMatchRequest {
    pub mode: GameMode,
    pub team_size: TeamSize,
    pub slot: SlotTime,
    pub tier: TierId,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MatchResultRequest {
    pub result: MatchResult,
    /// Credits awarded on a win; bounds-checked in the handler
    pub reward: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct MatchRegistrationResponse {
    pub match_id: String,
    pub mode: GameMode,
    pub team_size: TeamSize,
    pub slot: SlotTime,
    pub tier: TierId,
    pub entry_fee: Credits,
    pub max_players: u32,
    pub wallet: Wallet,
}

#[derive(Debug, Serialize)]
pub struct TeamSizeOption {
    pub team_size: TeamSize,
    pub max_players: u32,
}

#[derive(Debug, Serialize)]
pub struct CatalogMode {
    pub mode: GameMode,
    pub label: &'static str,
    pub team_sizes: Vec<TeamSizeOption>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub modes: Vec<CatalogMode>,
    pub tiers: Vec<EntryTier>,
}

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub mode: GameMode,
    pub team_size: TeamSize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub key: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdminCreditRequest {
    #[serde(deserialize_with = "deserialize_credits")]
    pub amount: Credits,
    #[validate(length(min = 1, max = 200))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefundRequest {
    #[serde(deserialize_with = "deserialize_credits")]
    pub amount: Credits,
    #[validate(length(min = 1, max = 200))]
    pub reason: String,
    pub match_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}
