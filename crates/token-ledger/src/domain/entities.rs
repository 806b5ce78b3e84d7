//! # Domain Entities
//!
//! Token metadata and the genesis payload it is decoded from.

use super::errors::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};

/// Immutable token metadata, written once at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable token name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Number of decimal places of the display unit.
    pub decimals: u8,
}

/// Genesis payload as supplied to the first `Init` call:
/// `{"name": "...", "symbol": "...", "decimals": "18"}`.
///
/// `decimals` travels as a base-10 string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: String,
}

impl GenesisConfig {
    /// Decodes the JSON payload.
    pub fn from_json(raw: &str) -> LedgerResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| LedgerError::ParseError(format!("invalid token configuration: {e}")))
    }

    /// Validates the payload into metadata.
    ///
    /// `decimals` must be a base-10 integer no larger than `max_decimals`.
    pub fn into_metadata(self, max_decimals: u8) -> LedgerResult<TokenMetadata> {
        let decimals: u8 = self.decimals.parse().map_err(|_| {
            LedgerError::ParseError(format!(
                "decimals {:?} is not an integer between 0 and {max_decimals}",
                self.decimals
            ))
        })?;

        if decimals > max_decimals {
            return Err(LedgerError::ParseError(format!(
                "decimals {decimals} exceeds the maximum of {max_decimals}"
            )));
        }

        Ok(TokenMetadata {
            name: self.name,
            symbol: self.symbol,
            decimals,
        })
    }
}
