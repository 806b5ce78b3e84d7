//! # Domain Invariants
//!
//! Ledger-wide properties that every committed state must satisfy.
//!
//! - Supply conservation: the balances sum to `totalSupply`.
//! - Burn bound: no burn exceeds the current `totalSupply`.
//!
//! Conservation is maintained by construction (every operation moves or
//! creates/destroys the same amount on both sides); the audit below is for
//! tests and offline checks over a full state dump.

use super::amount::Amount;
use super::errors::{LedgerError, LedgerResult};
use super::identity::AccountKey;
use super::keys;

/// Violation found by an audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Balances do not add up to the recorded supply.
    SupplyMismatch {
        /// Sum over every balance key.
        balances: Amount,
        /// Recorded `totalSupply`.
        total_supply: Amount,
    },
    /// A stored amount could not be decoded.
    Undecodable {
        /// Offending key.
        key: String,
    },
}

/// Fails with [`LedgerError::InvariantViolation`] if burning `amount` would
/// drive the supply below zero.
pub fn check_burn_within_supply(amount: &Amount, total_supply: &Amount) -> LedgerResult<Amount> {
    total_supply.checked_sub(amount).ok_or_else(|| {
        LedgerError::InvariantViolation(format!(
            "burn amount {amount} exceeds total supply {total_supply}"
        ))
    })
}

/// Returns true if `key` holds a balance.
#[must_use]
pub fn is_balance_key(key: &str) -> bool {
    !keys::is_reserved(key) && AccountKey::parse(key).is_ok()
}

/// Audits a full dump of `(key, value)` pairs for supply conservation.
pub fn audit_supply<'a, I>(entries: I) -> Result<Amount, InvariantViolation>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut balances = Amount::zero();
    let mut total_supply = Amount::zero();

    for (key, value) in entries {
        if key == keys::TOTAL_SUPPLY_KEY {
            total_supply = decode(key, value)?;
        } else if is_balance_key(key) {
            balances = &balances + &decode(key, value)?;
        }
    }

    if balances == total_supply {
        Ok(total_supply)
    } else {
        Err(InvariantViolation::SupplyMismatch {
            balances,
            total_supply,
        })
    }
}

fn decode(key: &str, value: &[u8]) -> Result<Amount, InvariantViolation> {
    if value.is_empty() {
        return Ok(Amount::zero());
    }
    Amount::from_bytes(value).map_err(|_| InvariantViolation::Undecodable {
        key: key.to_string(),
    })
}
