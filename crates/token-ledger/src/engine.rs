//! # Token Engine
//!
//! The token state machine. Implements every capability facet on top of a
//! [`LedgerState`] and owns all invariant enforcement.
//!
//! ## Operation shape
//!
//! Each mutating operation runs in three phases, in this order:
//!
//! 1. Parse the amount and authorize the caller.
//! 2. Read every value it needs and validate against them.
//! 3. Write.
//!
//! A failure in phase 1 or 2 therefore leaves the store untouched, whatever
//! the substrate's rollback behavior.
//!
//! ## Conservation
//!
//! Transfers debit and credit the same amount; mint and burn adjust the
//! supply by exactly the amount they credit or debit. A transfer whose
//! sender and receiver coincide writes nothing.

use crate::context::Context;
use crate::domain::{
    check_allowance, check_burn_within_supply, debit_balance, ensure_caller_is_owner, AccountKey,
    Amount, LedgerError, LedgerResult, TokenMetadata,
};
use crate::events::TokenEvent;
use crate::ports::{
    BasicToken, BurnableToken, DetailedToken, GenesisToken, LedgerStore, MemoQueries,
    MintableToken, OwnableToken, PausableToken,
};
use crate::state::LedgerState;
use std::sync::Arc;
use tracing::{info, instrument};

/// Token state machine over a ledger store.
pub struct TokenEngine<S: LedgerStore> {
    state: LedgerState<S>,
}

impl<S: LedgerStore> TokenEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            state: LedgerState::new(store),
        }
    }

    /// Typed state the engine operates on.
    pub fn state(&self) -> &LedgerState<S> {
        &self.state
    }

    fn ensure_owner(&self, ctx: &Context) -> LedgerResult<()> {
        let owner = self.state.owner()?;
        ensure_caller_is_owner(ctx.caller(), owner.as_ref())
    }

    /// Credits `amount` to `to` and stores `remaining` as the balance of
    /// `from`, which has already been debited.
    fn apply_move(
        &self,
        from: &AccountKey,
        to: &AccountKey,
        remaining: Amount,
        amount: &Amount,
    ) -> LedgerResult<()> {
        if from == to {
            return Ok(());
        }
        let to_balance = self.state.balance(to)?;
        self.state.set_balance(from, &remaining)?;
        self.state.set_balance(to, &(&to_balance + amount))
    }
}

// =============================================================================
// BASIC TOKEN
// =============================================================================

impl<S: LedgerStore> BasicToken for TokenEngine<S> {
    fn get_balance_of(&self, _ctx: &Context, account: &AccountKey) -> LedgerResult<Amount> {
        self.state.balance(account)
    }

    fn get_total_supply(&self, _ctx: &Context) -> LedgerResult<Amount> {
        self.state.total_supply()
    }

    fn get_allowance(
        &self,
        _ctx: &Context,
        owner: &AccountKey,
        spender: &AccountKey,
    ) -> LedgerResult<Amount> {
        self.state.allowance(owner, spender)
    }

    #[instrument(parent = ctx.span(), skip_all, fields(receiver = %receiver, amount = %amount))]
    fn transfer(
        &self,
        ctx: &Context,
        receiver: &AccountKey,
        amount: &str,
    ) -> LedgerResult<TokenEvent> {
        let amount = Amount::parse(amount)?;
        let sender = ctx.caller();

        let sender_balance = self.state.balance(sender)?;
        let remaining = debit_balance(sender, &sender_balance, &amount)?;

        self.apply_move(sender, receiver, remaining, &amount)?;

        info!(from = %sender, to = %receiver, amount = %amount, "Transfer applied");
        Ok(TokenEvent::transfer(
            sender.as_str(),
            sender.as_str(),
            receiver.as_str(),
            amount,
        ))
    }

    #[instrument(
        parent = ctx.span(),
        skip_all,
        fields(owner = %owner, receiver = %receiver, amount = %amount)
    )]
    fn transfer_from(
        &self,
        ctx: &Context,
        owner: &AccountKey,
        receiver: &AccountKey,
        amount: &str,
    ) -> LedgerResult<TokenEvent> {
        let amount = Amount::parse(amount)?;
        let spender = ctx.caller();

        let allowance = self.state.allowance(owner, spender)?;
        check_allowance(owner, spender, &allowance, &amount)?;

        let owner_balance = self.state.balance(owner)?;
        let remaining = debit_balance(owner, &owner_balance, &amount)?;

        let new_allowance = allowance.checked_sub(&amount).ok_or_else(|| {
            LedgerError::InvariantViolation(format!(
                "allowance {allowance} below checked amount {amount}"
            ))
        })?;

        self.apply_move(owner, receiver, remaining, &amount)?;
        self.state.set_allowance(owner, spender, &new_allowance)?;

        info!(
            spender = %spender,
            from = %owner,
            to = %receiver,
            amount = %amount,
            allowance = %new_allowance,
            "Delegated transfer applied"
        );
        Ok(TokenEvent::transfer(
            spender.as_str(),
            owner.as_str(),
            receiver.as_str(),
            amount,
        ))
    }

    #[instrument(parent = ctx.span(), skip_all, fields(spender = %spender, allowance = %allowance))]
    fn update_approval(
        &self,
        ctx: &Context,
        spender: &AccountKey,
        allowance: &str,
    ) -> LedgerResult<TokenEvent> {
        let allowance = Amount::parse(allowance)?;
        let owner = ctx.caller();

        self.state.set_allowance(owner, spender, &allowance)?;

        info!(owner = %owner, spender = %spender, allowance = %allowance, "Allowance set");
        Ok(TokenEvent::approval(
            owner.as_str(),
            owner.as_str(),
            spender.as_str(),
            allowance,
        ))
    }
}

// =============================================================================
// OWNERSHIP & METADATA
// =============================================================================

impl<S: LedgerStore> OwnableToken for TokenEngine<S> {
    fn get_owner(&self, _ctx: &Context) -> LedgerResult<AccountKey> {
        self.state
            .owner()?
            .ok_or_else(|| LedgerError::NotFound("owner".to_string()))
    }

    #[instrument(parent = ctx.span(), skip_all, fields(new_owner = %new_owner))]
    fn transfer_ownership(&self, ctx: &Context, new_owner: &AccountKey) -> LedgerResult<()> {
        self.ensure_owner(ctx)?;
        self.state.set_owner(new_owner)?;
        info!(from = %ctx.caller(), to = %new_owner, "Ownership transferred");
        Ok(())
    }
}

impl<S: LedgerStore> DetailedToken for TokenEngine<S> {
    fn name(&self, _ctx: &Context) -> LedgerResult<String> {
        self.state
            .name()?
            .ok_or_else(|| LedgerError::NotFound("token name".to_string()))
    }

    fn symbol(&self, _ctx: &Context) -> LedgerResult<String> {
        self.state
            .symbol()?
            .ok_or_else(|| LedgerError::NotFound("token symbol".to_string()))
    }

    fn decimals(&self, _ctx: &Context) -> LedgerResult<u8> {
        self.state
            .decimals()?
            .ok_or_else(|| LedgerError::NotFound("token decimals".to_string()))
    }
}

// =============================================================================
// SUPPLY
// =============================================================================

impl<S: LedgerStore> MintableToken for TokenEngine<S> {
    #[instrument(parent = ctx.span(), skip_all, fields(minter = %minter, amount = %amount))]
    fn mint(&self, ctx: &Context, minter: &AccountKey, amount: &str) -> LedgerResult<TokenEvent> {
        self.ensure_owner(ctx)?;
        let amount = Amount::parse(amount)?;

        let supply = self.state.total_supply()?;
        let balance = self.state.balance(minter)?;

        self.state.set_total_supply(&(&supply + &amount))?;
        self.state.set_balance(minter, &(&balance + &amount))?;

        info!(to = %minter, amount = %amount, "Tokens minted");
        Ok(TokenEvent::transfer(
            ctx.caller().as_str(),
            "",
            minter.as_str(),
            amount,
        ))
    }
}

impl<S: LedgerStore> BurnableToken for TokenEngine<S> {
    #[instrument(parent = ctx.span(), skip_all, fields(amount = %amount))]
    fn burn(&self, ctx: &Context, amount: &str) -> LedgerResult<TokenEvent> {
        let amount = Amount::parse(amount)?;
        let burner = ctx.caller();

        let balance = self.state.balance(burner)?;
        let remaining = debit_balance(burner, &balance, &amount)?;
        let supply = self.state.total_supply()?;
        let new_supply = check_burn_within_supply(&amount, &supply)?;

        self.state.set_balance(burner, &remaining)?;
        self.state.set_total_supply(&new_supply)?;

        info!(from = %burner, amount = %amount, "Tokens burned");
        Ok(TokenEvent::transfer(
            burner.as_str(),
            burner.as_str(),
            "",
            amount,
        ))
    }

    /// The allowance is checked but left as is.
    #[instrument(parent = ctx.span(), skip_all, fields(burnee = %burnee, amount = %amount))]
    fn burn_from(
        &self,
        ctx: &Context,
        burnee: &AccountKey,
        amount: &str,
    ) -> LedgerResult<TokenEvent> {
        let amount = Amount::parse(amount)?;
        let burner = ctx.caller();

        let allowance = self.state.allowance(burnee, burner)?;
        check_allowance(burnee, burner, &allowance, &amount)?;

        let balance = self.state.balance(burnee)?;
        let remaining = debit_balance(burnee, &balance, &amount)?;
        let supply = self.state.total_supply()?;
        let new_supply = check_burn_within_supply(&amount, &supply)?;

        self.state.set_balance(burnee, &remaining)?;
        self.state.set_total_supply(&new_supply)?;

        info!(burner = %burner, from = %burnee, amount = %amount, "Tokens burned by spender");
        Ok(TokenEvent::transfer(
            burner.as_str(),
            burnee.as_str(),
            "",
            amount,
        ))
    }
}

// =============================================================================
// PAUSE, MEMO, GENESIS
// =============================================================================

impl<S: LedgerStore> PausableToken for TokenEngine<S> {
    fn is_paused(&self, _ctx: &Context) -> LedgerResult<bool> {
        self.state.is_paused()
    }

    #[instrument(parent = ctx.span(), skip_all)]
    fn pause(&self, ctx: &Context) -> LedgerResult<()> {
        self.ensure_owner(ctx)?;
        self.state.set_paused(true)?;
        info!("Token paused");
        Ok(())
    }

    #[instrument(parent = ctx.span(), skip_all)]
    fn unpause(&self, ctx: &Context) -> LedgerResult<()> {
        self.ensure_owner(ctx)?;
        self.state.set_paused(false)?;
        info!("Token unpaused");
        Ok(())
    }
}

impl<S: LedgerStore> MemoQueries for TokenEngine<S> {
    fn get_memo(&self, _ctx: &Context, account: &AccountKey) -> LedgerResult<String> {
        self.state
            .memo(account)?
            .ok_or_else(|| LedgerError::NotFound(format!("memo for {account}")))
    }
}

impl<S: LedgerStore> GenesisToken for TokenEngine<S> {
    fn is_initialized(&self, _ctx: &Context) -> LedgerResult<bool> {
        self.state.is_initialized()
    }

    #[instrument(parent = ctx.span(), skip_all, fields(name = %metadata.name, symbol = %metadata.symbol))]
    fn initialize(&self, ctx: &Context, metadata: &TokenMetadata) -> LedgerResult<()> {
        if self.state.is_initialized()? {
            return Err(LedgerError::InvariantViolation(
                "token metadata is already set".to_string(),
            ));
        }

        self.state.set_metadata(metadata)?;
        self.state.set_owner(ctx.caller())?;
        self.state.set_paused(false)?;

        info!(owner = %ctx.caller(), decimals = metadata.decimals, "Token initialized");
        Ok(())
    }
}
