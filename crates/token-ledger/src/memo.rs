//! # Memo Extension
//!
//! Decorates a [`BasicToken`] so transfers can carry a free-text note. Once
//! the wrapped transfer has succeeded the note is stored for the receiver,
//! replacing the previous one. A failed transfer stores nothing.

use crate::context::Context;
use crate::domain::{AccountKey, Amount, LedgerError, LedgerResult};
use crate::events::TokenEvent;
use crate::ports::{BasicToken, LedgerStore, MemoQueries, MemoToken};
use crate::state::LedgerState;
use std::sync::Arc;
use tracing::debug;

/// Memo-capable wrapper around another basic token.
pub struct MemoExtension<S: LedgerStore> {
    inner: Arc<dyn BasicToken>,
    state: LedgerState<S>,
}

impl<S: LedgerStore> MemoExtension<S> {
    pub fn new(inner: Arc<dyn BasicToken>, state: LedgerState<S>) -> Self {
        Self { inner, state }
    }

    fn attach(&self, receiver: &AccountKey, memo: &str) -> LedgerResult<()> {
        self.state.set_memo(receiver, memo)?;
        debug!(receiver = %receiver, len = memo.len(), "Memo attached");
        Ok(())
    }
}

impl<S: LedgerStore> BasicToken for MemoExtension<S> {
    fn get_balance_of(&self, ctx: &Context, account: &AccountKey) -> LedgerResult<Amount> {
        self.inner.get_balance_of(ctx, account)
    }

    fn get_total_supply(&self, ctx: &Context) -> LedgerResult<Amount> {
        self.inner.get_total_supply(ctx)
    }

    fn get_allowance(
        &self,
        ctx: &Context,
        owner: &AccountKey,
        spender: &AccountKey,
    ) -> LedgerResult<Amount> {
        self.inner.get_allowance(ctx, owner, spender)
    }

    fn transfer(
        &self,
        ctx: &Context,
        receiver: &AccountKey,
        amount: &str,
    ) -> LedgerResult<TokenEvent> {
        self.inner.transfer(ctx, receiver, amount)
    }

    fn transfer_from(
        &self,
        ctx: &Context,
        owner: &AccountKey,
        receiver: &AccountKey,
        amount: &str,
    ) -> LedgerResult<TokenEvent> {
        self.inner.transfer_from(ctx, owner, receiver, amount)
    }

    fn update_approval(
        &self,
        ctx: &Context,
        spender: &AccountKey,
        allowance: &str,
    ) -> LedgerResult<TokenEvent> {
        self.inner.update_approval(ctx, spender, allowance)
    }
}

impl<S: LedgerStore> MemoQueries for MemoExtension<S> {
    fn get_memo(&self, _ctx: &Context, account: &AccountKey) -> LedgerResult<String> {
        self.state
            .memo(account)?
            .ok_or_else(|| LedgerError::NotFound(format!("memo for {account}")))
    }
}

impl<S: LedgerStore> MemoToken for MemoExtension<S> {
    fn transfer_with_memo(
        &self,
        ctx: &Context,
        receiver: &AccountKey,
        amount: &str,
        memo: &str,
    ) -> LedgerResult<TokenEvent> {
        let event = self.inner.transfer(ctx, receiver, amount)?;
        self.attach(receiver, memo)?;
        Ok(event)
    }

    fn transfer_from_with_memo(
        &self,
        ctx: &Context,
        owner: &AccountKey,
        receiver: &AccountKey,
        amount: &str,
        memo: &str,
    ) -> LedgerResult<TokenEvent> {
        let event = self.inner.transfer_from(ctx, owner, receiver, amount)?;
        self.attach(receiver, memo)?;
        Ok(event)
    }
}
