//! # Ledger Configuration

use crate::domain::Amount;

/// Whole tokens minted to the owner at genesis, before scaling by
/// `10^decimals`.
pub const DEFAULT_INITIAL_MINT_AMOUNT: u64 = 1_000_000_000;

/// Largest accepted `decimals` value (ERC-20 decimals are a `uint8`; 18 is
/// the customary maximum).
pub const DEFAULT_MAX_DECIMALS: u8 = 18;

/// Core ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Whole tokens minted to the owner by genesis `Init`.
    pub initial_mint_amount: Amount,
    /// Upper bound on the genesis `decimals` value.
    pub max_decimals: u8,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_mint_amount: Amount::from(DEFAULT_INITIAL_MINT_AMOUNT),
            max_decimals: DEFAULT_MAX_DECIMALS,
        }
    }
}

impl LedgerConfig {
    /// Base units minted at genesis: `initial_mint_amount * 10^decimals`.
    #[must_use]
    pub fn genesis_supply(&self, decimals: u8) -> Amount {
        &self.initial_mint_amount * &Amount::pow10(u32::from(decimals))
    }
}
