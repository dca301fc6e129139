/// Player profile document model
///
/// One document per account, keyed by the identity provider's account id.
/// The wire format is camelCase to match the stored documents; the embedded
/// wallet carries the bounded transaction history.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::*;
use crate::types::{Credits, Username};

/// Ledger entry kind; amounts are positive, sign is implied by the type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Credit,
    Debit,
    MatchEntry,
    MatchReward,
    AdminAdjustment,
}

impl TransactionType {
    /// Whether this kind increases the balance
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            TransactionType::Credit
                | TransactionType::MatchReward
                | TransactionType::AdminAdjustment
        )
    }
}

/// One immutable ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Credits,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<String>,
}

impl Transaction {
    pub fn new(kind: TransactionType, amount: Credits, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            description: description.into(),
            date: Utc::now(),
            match_id: None,
            admin_id: None,
        }
    }

    pub fn with_match_id(mut self, match_id: impl Into<String>) -> Self {
        self.match_id = Some(match_id.into());
        self
    }

    pub fn with_admin_id(mut self, admin_id: impl Into<String>) -> Self {
        self.admin_id = Some(admin_id.into());
        self
    }
}

/// Balance/earnings/spend aggregate with the embedded ledger
///
/// `transactions` is newest-first and truncated to
/// `MAX_TRANSACTION_HISTORY` entries after every append; consumers must
/// never re-sort it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub balance: Credits,
    pub total_earnings: Credits,
    pub total_spent: Credits,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Player rank, derived from lifetime experience
///
/// Declaration order matches the breakpoint order so ranks compare by
/// progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
}

impl Rank {
    /// Derive the rank for a lifetime experience total
    pub fn for_experience(experience: u32) -> Self {
        if experience >= RANK_MASTER_XP {
            Rank::Master
        } else if experience >= RANK_EXPERT_XP {
            Rank::Expert
        } else if experience >= RANK_ADVANCED_XP {
            Rank::Advanced
        } else if experience >= RANK_INTERMEDIATE_XP {
            Rank::Intermediate
        } else {
            Rank::Beginner
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Rank::Beginner => "Beginner",
            Rank::Intermediate => "Intermediate",
            Rank::Advanced => "Advanced",
            Rank::Expert => "Expert",
            Rank::Master => "Master",
        };
        write!(f, "{}", label)
    }
}

/// Lifetime gameplay statistics
///
/// `win_rate` is always derived from the raw counters and `rank` from
/// `experience`; neither is ever edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub rank: Rank,
    pub experience: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            games_played: 0,
            wins: 0,
            losses: 0,
            win_rate: 0.0,
            rank: Rank::Beginner,
            experience: 0,
        }
    }
}

/// The per-user profile document
///
/// `version` is the optimistic-concurrency token: the store bumps it on
/// every accepted write and rejects writes against a stale version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub username: Username,
    pub game_stats: GameStats,
    pub wallet: Wallet,
    #[serde(default)]
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Build the seed document for a newly registered account:
    /// zeroed stats and a wallet pre-credited with the welcome bonus.
    pub fn register(
        name: impl Into<String>,
        email: impl Into<String>,
        username: Username,
    ) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            email: email.into(),
            username,
            game_stats: GameStats::default(),
            wallet: crate::wallet::welcome_wallet(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
