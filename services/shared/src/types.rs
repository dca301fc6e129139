/// Type-safe wrappers for domain primitives
///
/// These types prevent common errors by enforcing validation at construction
/// time and providing checked arithmetic operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Amount out of range: {amount} (max {max})")]
    AmountTooLarge { amount: u64, max: u64 },

    #[error("Credits overflow in operation")]
    CreditsOverflow,

    #[error("Username length {length} out of range ({min}-{max})")]
    UsernameLength {
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("Invalid username format: {0}")]
    InvalidUsernameFormat(String),
}

/// Integer credit amount with overflow protection
///
/// Credits are the platform's single currency unit; amounts are always
/// non-negative, sign is implied by the transaction type. Arithmetic is
/// checked so a corrupted document can never wrap a balance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Credits(u64);

impl Credits {
    pub const ZERO: Credits = Credits(0);

    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Validate an amount carried by a single wallet operation
    ///
    /// Operation amounts must be positive and below the per-operation cap;
    /// balances themselves are unconstrained.
    pub fn operation_amount(amount: u64) -> Result<Self, ValidationError> {
        if amount == 0 {
            return Err(ValidationError::ZeroAmount);
        }
        if amount > MAX_OPERATION_CREDITS {
            return Err(ValidationError::AmountTooLarge {
                amount,
                max: MAX_OPERATION_CREDITS,
            });
        }
        Ok(Self(amount))
    }

    /// Get the raw credit value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition
    pub fn checked_add(&self, other: Credits) -> Result<Self, ValidationError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(ValidationError::CreditsOverflow)
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: Credits) -> Result<Self, ValidationError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(ValidationError::CreditsOverflow)
    }
}

impl From<Credits> for u64 {
    fn from(amount: Credits) -> Self {
        amount.0
    }
}

impl std::fmt::Display for Credits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} credits", self.0)
    }
}

/// Validated player username
///
/// Usernames are 3-20 characters, lowercase ASCII letters, digits and
/// underscore. They are unique per player and used for profile lookup, so
/// the format is enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();

        if normalized.len() < MIN_USERNAME_LENGTH || normalized.len() > MAX_USERNAME_LENGTH {
            return Err(ValidationError::UsernameLength {
                length: normalized.len(),
                min: MIN_USERNAME_LENGTH,
                max: MAX_USERNAME_LENGTH,
            });
        }

        if !normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(ValidationError::InvalidUsernameFormat(value));
        }

        Ok(Self(normalized))
    }
}

impl TryFrom<&str> for Username {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_string())
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_amount_bounds() {
        assert_eq!(Credits::operation_amount(50).unwrap().as_u64(), 50);
        assert!(matches!(
            Credits::operation_amount(0),
            Err(ValidationError::ZeroAmount)
        ));
        assert!(matches!(
            Credits::operation_amount(MAX_OPERATION_CREDITS + 1),
            Err(ValidationError::AmountTooLarge { .. })
        ));
    }

    #[test]
    fn test_credits_arithmetic() {
        let a = Credits::new(100);
        let b = Credits::new(40);

        assert_eq!(a.checked_add(b).unwrap().as_u64(), 140);
        assert_eq!(a.checked_sub(b).unwrap().as_u64(), 60);
    }

    #[test]
    fn test_credits_overflow() {
        let a = Credits::new(u64::MAX);
        assert!(a.checked_add(Credits::new(1)).is_err());
        assert!(Credits::new(0).checked_sub(Credits::new(1)).is_err());
    }

    #[test]
    fn test_username_normalization() {
        let name = Username::try_from("  ProPlayer_99 ").unwrap();
        assert_eq!(name.as_str(), "proplayer_99");
    }

    #[test]
    fn test_username_length() {
        assert!(matches!(
            Username::try_from("ab"),
            Err(ValidationError::UsernameLength { .. })
        ));
        let long = "a".repeat(MAX_USERNAME_LENGTH + 1);
        assert!(matches!(
            Username::try_from(long),
            Err(ValidationError::UsernameLength { .. })
        ));
    }

    #[test]
    fn test_username_format() {
        assert!(matches!(
            Username::try_from("bad name"),
            Err(ValidationError::InvalidUsernameFormat(_))
        ));
        assert!(matches!(
            Username::try_from("émile"),
            Err(ValidationError::InvalidUsernameFormat(_))
        ));
    }

    #[test]
    fn test_credits_serialize_as_number() {
        let json = serde_json::to_string(&Credits::new(75)).unwrap();
        assert_eq!(json, "75");
        let back: Credits = serde_json::from_str("75").unwrap();
        assert_eq!(back, Credits::new(75));
    }
}
