//! # Inbound Ports (Driving Side)
//!
//! The token's public surface, split into small capability facets. The
//! [`Token`](crate::token::Token) façade holds one implementation of each;
//! tests can swap any facet out independently.
//!
//! Every call takes the invocation [`Context`]; the acting identity is
//! always `ctx.caller()`. Mutating calls return the notification they
//! produced, if any.

use crate::context::Context;
use crate::domain::{AccountKey, Amount, LedgerResult, TokenMetadata};
use crate::events::TokenEvent;

/// Balances, supply, allowances and the moves between them.
pub trait BasicToken: Send + Sync {
    fn get_balance_of(&self, ctx: &Context, account: &AccountKey) -> LedgerResult<Amount>;

    fn get_total_supply(&self, ctx: &Context) -> LedgerResult<Amount>;

    fn get_allowance(
        &self,
        ctx: &Context,
        owner: &AccountKey,
        spender: &AccountKey,
    ) -> LedgerResult<Amount>;

    /// Moves `amount` from the caller to `receiver`.
    fn transfer(&self, ctx: &Context, receiver: &AccountKey, amount: &str)
        -> LedgerResult<TokenEvent>;

    /// Moves `amount` from `owner` to `receiver` against the caller's
    /// allowance, decrementing it.
    fn transfer_from(
        &self,
        ctx: &Context,
        owner: &AccountKey,
        receiver: &AccountKey,
        amount: &str,
    ) -> LedgerResult<TokenEvent>;

    /// Overwrites the caller's allowance for `spender`.
    fn update_approval(
        &self,
        ctx: &Context,
        spender: &AccountKey,
        allowance: &str,
    ) -> LedgerResult<TokenEvent>;
}

/// Single-owner administration.
pub trait OwnableToken: Send + Sync {
    fn get_owner(&self, ctx: &Context) -> LedgerResult<AccountKey>;

    fn transfer_ownership(&self, ctx: &Context, new_owner: &AccountKey) -> LedgerResult<()>;
}

/// Immutable metadata.
pub trait DetailedToken: Send + Sync {
    fn name(&self, ctx: &Context) -> LedgerResult<String>;

    fn symbol(&self, ctx: &Context) -> LedgerResult<String>;

    fn decimals(&self, ctx: &Context) -> LedgerResult<u8>;
}

pub trait MintableToken: Send + Sync {
    /// Owner-only supply increase credited to `minter`.
    fn mint(&self, ctx: &Context, minter: &AccountKey, amount: &str) -> LedgerResult<TokenEvent>;
}

pub trait BurnableToken: Send + Sync {
    /// Destroys `amount` of the caller's own tokens.
    fn burn(&self, ctx: &Context, amount: &str) -> LedgerResult<TokenEvent>;

    /// Destroys `amount` of `burnee`'s tokens against the caller's allowance.
    fn burn_from(&self, ctx: &Context, burnee: &AccountKey, amount: &str)
        -> LedgerResult<TokenEvent>;
}

pub trait PausableToken: Send + Sync {
    fn is_paused(&self, ctx: &Context) -> LedgerResult<bool>;

    fn pause(&self, ctx: &Context) -> LedgerResult<()>;

    fn unpause(&self, ctx: &Context) -> LedgerResult<()>;
}

/// Read side of transfer memos.
pub trait MemoQueries: Send + Sync {
    /// Latest memo attached to a transfer received by `account`.
    fn get_memo(&self, ctx: &Context, account: &AccountKey) -> LedgerResult<String>;
}

/// Transfers that attach a memo to the receiver once they succeed.
pub trait MemoToken: MemoQueries {
    fn transfer_with_memo(
        &self,
        ctx: &Context,
        receiver: &AccountKey,
        amount: &str,
        memo: &str,
    ) -> LedgerResult<TokenEvent>;

    fn transfer_from_with_memo(
        &self,
        ctx: &Context,
        owner: &AccountKey,
        receiver: &AccountKey,
        amount: &str,
        memo: &str,
    ) -> LedgerResult<TokenEvent>;
}

/// One-time ledger setup.
pub trait GenesisToken: Send + Sync {
    /// True once metadata has been written.
    fn is_initialized(&self, ctx: &Context) -> LedgerResult<bool>;

    /// Writes metadata, makes the caller the owner and clears the pause flag.
    fn initialize(&self, ctx: &Context, metadata: &TokenMetadata) -> LedgerResult<()>;
}
