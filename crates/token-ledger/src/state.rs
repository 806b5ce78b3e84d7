//! # Ledger State
//!
//! Typed accessors over the world state store, one pair per stored entity.
//!
//! Absent balances, allowances and supply read as zero; an absent pause flag
//! reads as `false`. Every write goes straight to the store. Values that are
//! present but undecodable surface as [`LedgerError::CorruptState`].

use crate::domain::keys::{
    self, DECIMALS_KEY, NAME_KEY, OWNER_KEY, PAUSED_KEY, SYMBOL_KEY, TOTAL_SUPPLY_KEY,
};
use crate::domain::{AccountKey, Amount, LedgerError, LedgerResult, TokenMetadata};
use crate::ports::LedgerStore;
use std::sync::Arc;
use tracing::debug;

/// Typed view over a [`LedgerStore`].
pub struct LedgerState<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> Clone for LedgerState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore> LedgerState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // =========================================================================
    // AMOUNTS
    // =========================================================================

    pub fn balance(&self, account: &AccountKey) -> LedgerResult<Amount> {
        self.read_amount(&keys::balance_key(account))
    }

    pub fn set_balance(&self, account: &AccountKey, amount: &Amount) -> LedgerResult<()> {
        self.write(&keys::balance_key(account), amount.to_bytes())
    }

    pub fn allowance(&self, owner: &AccountKey, spender: &AccountKey) -> LedgerResult<Amount> {
        self.read_amount(&keys::allowance_key(owner, spender))
    }

    pub fn set_allowance(
        &self,
        owner: &AccountKey,
        spender: &AccountKey,
        amount: &Amount,
    ) -> LedgerResult<()> {
        self.write(&keys::allowance_key(owner, spender), amount.to_bytes())
    }

    pub fn total_supply(&self) -> LedgerResult<Amount> {
        self.read_amount(TOTAL_SUPPLY_KEY)
    }

    pub fn set_total_supply(&self, amount: &Amount) -> LedgerResult<()> {
        self.write(TOTAL_SUPPLY_KEY, amount.to_bytes())
    }

    // =========================================================================
    // OWNER & METADATA
    // =========================================================================

    /// Current owner, `None` before genesis.
    pub fn owner(&self) -> LedgerResult<Option<AccountKey>> {
        match self.read_string(OWNER_KEY)? {
            None => Ok(None),
            Some(raw) => AccountKey::parse(&raw)
                .map(Some)
                .map_err(|e| corrupt(OWNER_KEY, e)),
        }
    }

    pub fn set_owner(&self, owner: &AccountKey) -> LedgerResult<()> {
        self.write(OWNER_KEY, owner.as_str().as_bytes().to_vec())
    }

    /// True once genesis has written the metadata.
    pub fn is_initialized(&self) -> LedgerResult<bool> {
        Ok(self.store.get_state(NAME_KEY)?.is_some())
    }

    /// Name as configured at genesis, possibly empty.
    pub fn name(&self) -> LedgerResult<Option<String>> {
        self.read_text(NAME_KEY)
    }

    /// Symbol as configured at genesis, possibly empty.
    pub fn symbol(&self) -> LedgerResult<Option<String>> {
        self.read_text(SYMBOL_KEY)
    }

    pub fn decimals(&self) -> LedgerResult<Option<u8>> {
        match self.read_string(DECIMALS_KEY)? {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|e| corrupt(DECIMALS_KEY, e)),
        }
    }

    /// Present, non-empty UTF-8 value.
    fn read_string(&self, key: &str) -> LedgerResult<Option<String>> {
        match self.store.get_state(key)? {
            None => Ok(None),
            Some(bytes) if bytes.is_empty() => Ok(None),
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| corrupt(key, e)),
        }
    }

    /// Present UTF-8 value, empty included.
    fn read_text(&self, key: &str) -> LedgerResult<Option<String>> {
        self.store
            .get_state(key)?
            .map(|bytes| String::from_utf8(bytes).map_err(|e| corrupt(key, e)))
            .transpose()
    }

    fn write(&self, key: &str, value: Vec<u8>) -> LedgerResult<()> {
        debug!(key = %key.escape_debug(), bytes = value.len(), "put_state");
        self.store.put_state(key, value)?;
        Ok(())
    }
}

fn corrupt(key: &str, reason: impl ToString) -> LedgerError {
    LedgerError::CorruptState {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
