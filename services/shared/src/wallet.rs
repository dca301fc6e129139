/// Wallet ledger operations
///
/// Pure transforms over a `Wallet` value: each operation computes the next
/// wallet state and appends to the bounded, newest-first transaction
/// history. No I/O happens here; the caller persists the result and must
/// discard it if the persist fails.
use thiserror::Error;

use crate::constants::*;
use crate::errors::ServiceError;
use crate::profile::{Transaction, TransactionType, Wallet};
use crate::types::Credits;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Insufficient credits: required {required}, available {available}")]
    InsufficientCredits {
        required: Credits,
        available: Credits,
    },

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Wallet totals overflow")]
    Overflow,

    #[error("Transaction type {0:?} is not a credit")]
    NotACreditKind(TransactionType),
}

impl From<WalletError> for ServiceError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::InsufficientCredits {
                required,
                available,
            } => ServiceError::insufficient_credits(required, available),
            other => ServiceError::invalid_amount(other),
        }
    }
}

/// Deduct a match entry fee
///
/// Fails without touching the wallet when the balance cannot cover the
/// fee; on success the new state carries a prepended `match_entry`
/// transaction referencing the match.
pub fn debit(
    wallet: &Wallet,
    amount: Credits,
    description: &str,
    match_id: &str,
) -> Result<Wallet, WalletError> {
    if amount.is_zero() {
        return Err(WalletError::ZeroAmount);
    }
    if wallet.balance < amount {
        return Err(WalletError::InsufficientCredits {
            required: amount,
            available: wallet.balance,
        });
    }

    let balance = wallet
        .balance
        .checked_sub(amount)
        .map_err(|_| WalletError::Overflow)?;
    let total_spent = wallet
        .total_spent
        .checked_add(amount)
        .map_err(|_| WalletError::Overflow)?;

    let entry = Transaction::new(TransactionType::MatchEntry, amount, description)
        .with_match_id(match_id);

    Ok(Wallet {
        balance,
        total_earnings: wallet.total_earnings,
        total_spent,
        transactions: prepend(&wallet.transactions, entry),
    })
}

/// Add credits to a wallet
///
/// Credits always succeed; `kind` must be one of the credit-direction
/// transaction types (`credit`, `match_reward`, `admin_adjustment`).
pub fn credit(
    wallet: &Wallet,
    amount: Credits,
    description: &str,
    kind: TransactionType,
    match_id: Option<String>,
    admin_id: Option<String>,
) -> Result<Wallet, WalletError> {
    if amount.is_zero() {
        return Err(WalletError::ZeroAmount);
    }
    if !kind.is_credit() {
        return Err(WalletError::NotACreditKind(kind));
    }

    let balance = wallet
        .balance
        .checked_add(amount)
        .map_err(|_| WalletError::Overflow)?;
    let total_earnings = wallet
        .total_earnings
        .checked_add(amount)
        .map_err(|_| WalletError::Overflow)?;

    let mut entry = Transaction::new(kind, amount, description);
    entry.match_id = match_id;
    entry.admin_id = admin_id;

    Ok(Wallet {
        balance,
        total_earnings,
        total_spent: wallet.total_spent,
        transactions: prepend(&wallet.transactions, entry),
    })
}

/// The wallet every new account starts with: the welcome bonus, explained
/// by a single `credit` transaction.
pub fn welcome_wallet() -> Wallet {
    let bonus = Credits::new(WELCOME_BONUS_CREDITS);
    Wallet {
        balance: bonus,
        total_earnings: bonus,
        total_spent: Credits::ZERO,
        transactions: vec![Transaction::new(
            TransactionType::Credit,
            bonus,
            WELCOME_BONUS_DESCRIPTION,
        )],
    }
}

/// Prepend an entry and truncate to the history cap (oldest dropped)
fn prepend(transactions: &[Transaction], entry: Transaction) -> Vec<Transaction> {
    let mut next = Vec::with_capacity((transactions.len() + 1).min(MAX_TRANSACTION_HISTORY));
    next.push(entry);
    next.extend(
        transactions
            .iter()
            .take(MAX_TRANSACTION_HISTORY - 1)
            .cloned(),
    );
    next
}
