// Token payments and issuance parameters for ESDT transactions
use crate::error::{Result, WalletError};
use num_bigint::BigUint;

pub const MAX_TOKEN_DECIMALS: u32 = 18;
const TOKEN_NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=20;
const TICKER_LENGTH: std::ops::RangeInclusive<usize> = 3..=10;

/// An amount of a token moved by a transfer.
///
/// A nonce of zero means a fungible token; semi-fungible and non-fungible
/// tokens carry the nonce of the specific token instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayment {
    pub token_identifier: String,
    pub nonce: u64,
    pub amount: BigUint,
}

impl TokenPayment {
    pub fn fungible(token_identifier: &str, amount: BigUint) -> Self {
        Self {
            token_identifier: token_identifier.to_string(),
            nonce: 0,
            amount,
        }
    }

    /// Semi-fungible or non-fungible instance
    pub fn non_fungible(token_identifier: &str, nonce: u64, amount: BigUint) -> Self {
        Self {
            token_identifier: token_identifier.to_string(),
            nonce,
            amount,
        }
    }

    pub fn is_fungible(&self) -> bool {
        self.nonce == 0
    }

    pub fn validate(&self) -> Result<()> {
        if self.token_identifier.trim().is_empty() {
            return Err(WalletError::Transaction(
                "Token identifier must not be empty".to_string(),
            ));
        }
        if self.amount == BigUint::from(0u8) {
            return Err(WalletError::Transaction(
                "Token amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Feature flags set when a token is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EsdtProperties {
    pub can_freeze: bool,
    pub can_wipe: bool,
    pub can_pause: bool,
    pub can_mint: bool,
    pub can_burn: bool,
    pub can_change_owner: bool,
    pub can_upgrade: bool,
    pub can_add_special_roles: bool,
}

impl Default for EsdtProperties {
    fn default() -> Self {
        Self {
            can_freeze: false,
            can_wipe: false,
            can_pause: false,
            can_mint: false,
            can_burn: false,
            can_change_owner: false,
            can_upgrade: true,
            can_add_special_roles: true,
        }
    }
}

impl EsdtProperties {
    /// Property names and values in the order the issue call expects them
    pub fn as_pairs(&self) -> [(&'static str, bool); 8] {
        [
            ("canFreeze", self.can_freeze),
            ("canWipe", self.can_wipe),
            ("canPause", self.can_pause),
            ("canMint", self.can_mint),
            ("canBurn", self.can_burn),
            ("canChangeOwner", self.can_change_owner),
            ("canUpgrade", self.can_upgrade),
            ("canAddSpecialRoles", self.can_add_special_roles),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueEsdtParams {
    pub token_name: String,
    pub ticker: String,
    pub initial_supply: BigUint,
    pub num_decimals: u32,
    pub properties: EsdtProperties,
}

impl IssueEsdtParams {
    pub fn validate(&self) -> Result<()> {
        let name = &self.token_name;
        if !TOKEN_NAME_LENGTH.contains(&name.len())
            || !name.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(WalletError::Transaction(format!(
                "Token name '{name}' must be 3-20 alphanumeric characters"
            )));
        }

        let ticker = &self.ticker;
        if !TICKER_LENGTH.contains(&ticker.len())
            || !ticker
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(WalletError::Transaction(format!(
                "Ticker '{ticker}' must be 3-10 upper-case alphanumeric characters"
            )));
        }

        if self.num_decimals > MAX_TOKEN_DECIMALS {
            return Err(WalletError::Transaction(format!(
                "Token decimals must be at most {MAX_TOKEN_DECIMALS}, got {}",
                self.num_decimals
            )));
        }
        Ok(())
    }
}
