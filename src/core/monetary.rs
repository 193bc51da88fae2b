/// Network monetary constants
///
/// Values are carried in the smallest denomination: one EGLD is 10^18 units.
/// Transaction records, token amounts and the issuance cost all use that unit.
use num_bigint::BigUint;

/// Number of decimals of the native currency
pub const EGLD_DECIMALS: u32 = 18;

/// Smallest units in one EGLD
pub const ONE_EGLD: u128 = 1_000_000_000_000_000_000;

/// Fee the ESDT system smart contract charges for issuing a token (0.05 EGLD)
pub const ESDT_ISSUE_COST: u128 = ONE_EGLD / 20;

/// Minimum gas price accepted by the network
pub const MIN_GAS_PRICE: u64 = 1_000_000_000;

/// Gas consumed by a transfer without data
pub const MIN_GAS_LIMIT: u64 = 50_000;

/// Extra gas charged for every byte of the data field
pub const GAS_PER_DATA_BYTE: u64 = 1_500;

/// Transaction format version
pub const TRANSACTION_VERSION: u32 = 1;

pub fn esdt_issue_cost() -> BigUint {
    BigUint::from(ESDT_ISSUE_COST)
}

/// Utility functions for monetary conversions
pub mod conversions {
    use super::*;
    use crate::error::{Result, WalletError};

    /// Convert a decimal EGLD amount such as "1.5" into smallest units
    ///
    /// # Examples
    /// ```
    /// use erd_wallet::core::monetary::conversions::egld_to_denominated;
    /// assert_eq!(egld_to_denominated("0.05").unwrap().to_string(), "50000000000000000");
    /// ```
    pub fn egld_to_denominated(amount: &str) -> Result<BigUint> {
        let amount = amount.trim();
        let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(WalletError::Transaction("Empty amount".to_string()));
        }
        if fraction.len() > EGLD_DECIMALS as usize {
            return Err(WalletError::Transaction(format!(
                "Amount {amount} has more than {EGLD_DECIMALS} decimals"
            )));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(WalletError::Transaction(format!("Invalid amount: {amount}")));
        }

        let digits = format!(
            "{}{fraction:0<width$}",
            if whole.is_empty() { "0" } else { whole },
            width = EGLD_DECIMALS as usize
        );
        digits
            .parse::<BigUint>()
            .map_err(|e| WalletError::Transaction(format!("Invalid amount {amount}: {e}")))
    }

    /// Render smallest units as a decimal EGLD amount, trailing zeros trimmed
    ///
    /// # Examples
    /// ```
    /// use erd_wallet::core::monetary::conversions::denominated_to_egld;
    /// use num_bigint::BigUint;
    /// assert_eq!(denominated_to_egld(&BigUint::from(1_500_000_000_000_000_000u128)), "1.5");
    /// ```
    pub fn denominated_to_egld(value: &BigUint) -> String {
        let unit = BigUint::from(ONE_EGLD);
        let whole = value / &unit;
        let fraction = value % &unit;
        if fraction == BigUint::from(0u8) {
            return whole.to_string();
        }
        let fraction = format!(
            "{:0>width$}",
            fraction.to_string(),
            width = EGLD_DECIMALS as usize
        );
        format!("{whole}.{}", fraction.trim_end_matches('0'))
    }
}
