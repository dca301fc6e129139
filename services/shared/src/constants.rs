/// Shared constants for the MANA Gaming platform
///
/// This module centralizes all magic numbers and product rules
/// to prevent inconsistencies between the gateway and its tests.

/// Credits granted to every new account (one-time welcome bonus)
///
/// Recorded as a single `credit` transaction at registration so the
/// ledger always explains the opening balance.
pub const WELCOME_BONUS_CREDITS: u64 = 1_000;

/// Description attached to the welcome-bonus transaction
pub const WELCOME_BONUS_DESCRIPTION: &str = "Welcome bonus - thanks for joining MANA Gaming!";

/// Maximum number of transactions kept in a wallet's embedded history
///
/// The list is truncated to the newest entries after every append; the
/// profile document is the durability boundary, so the history must
/// stay bounded.
pub const MAX_TRANSACTION_HISTORY: usize = 50;

/// Largest amount a single wallet operation may carry (100k credits)
///
/// Caps fat-fingered admin adjustments and purchase requests. Balances
/// may exceed this through accumulation; only per-operation amounts are
/// limited.
pub const MAX_OPERATION_CREDITS: u64 = 100_000;

/// Experience awarded for a match win
pub const EXPERIENCE_PER_WIN: u32 = 10;

/// Experience awarded for a match loss
pub const EXPERIENCE_PER_LOSS: u32 = 5;

/// Rank breakpoints over lifetime experience, ascending
///
/// Below the first breakpoint a player is Beginner; experience is
/// monotonic non-decreasing, so rank never moves down.
pub const RANK_INTERMEDIATE_XP: u32 = 50;
pub const RANK_ADVANCED_XP: u32 = 200;
pub const RANK_EXPERT_XP: u32 = 500;
pub const RANK_MASTER_XP: u32 = 1_000;

/// First match slot of the day (10:00)
pub const SLOT_FIRST_HOUR: u16 = 10;

/// End of the slot window, exclusive (22:00)
pub const SLOT_LAST_HOUR: u16 = 22;

/// Minutes between consecutive match slots (3 slots per hour)
pub const SLOT_INTERVAL_MINUTES: u16 = 20;

/// Maximum attempts for a version-checked profile write
///
/// A conflicting writer bumps the document version; the mutation is
/// re-applied against the fresh document at most this many times before
/// the conflict is surfaced to the caller.
pub const CONFLICT_RETRY_LIMIT: u32 = 3;

/// Username length bounds (inclusive)
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 20;
