//! # Dispatcher
//!
//! Entry point of the token. Maps an operation name and its string
//! arguments to a facet call and wraps the outcome in a [`Response`].
//!
//! ## Invocation flow
//!
//! ```text
//! Invocation ──→ resolve caller ──→ pause gate ──→ facet call
//!                                                      │
//!                     Response ←── forward event ←─────┘
//! ```
//!
//! ## Pause gate
//!
//! While the token is paused only `Transfer`, `TransferFrom` and
//! `UpdateApproval` are rejected. Supply, pause and ownership operations stay
//! available so the owner can still act on a paused token.

use crate::config::LedgerConfig;
use crate::context::Context;
use crate::domain::{
    ensure_arg_count, ensure_arg_count_with_optional, ensure_caller_is_owner, AccountKey,
    ErrorKind, GenesisConfig, LedgerError, LedgerResult,
};
use crate::events::TokenEvent;
use crate::ports::{EventSink, IdentityResolver};
use crate::token::Token;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, BytesOrString};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

// =============================================================================
// ENVELOPES
// =============================================================================

/// One call into the token.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Transaction id assigned by the substrate.
    pub tx_id: String,
    /// Operation name, e.g. `"Transfer"`.
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Opaque credential handed to the identity resolver.
    #[serde_as(as = "BytesOrString")]
    pub creator: Vec<u8>,
}

impl Invocation {
    pub fn new(
        tx_id: impl Into<String>,
        function: impl Into<String>,
        args: Vec<String>,
        creator: Vec<u8>,
    ) -> Self {
        Self {
            tx_id: tx_id.into(),
            function: function.into(),
            args,
            creator,
        }
    }
}

pub const STATUS_OK: u16 = 200;
pub const STATUS_ERROR: u16 = 500;

/// Outcome envelope returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// `200` on success, `500` on any error.
    pub status: u16,
    /// Error message; empty on success.
    #[serde(default)]
    pub message: String,
    /// Query result as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl Response {
    #[must_use]
    pub fn success(payload: Option<String>) -> Self {
        Self {
            status: STATUS_OK,
            message: String::new(),
            payload,
            error: None,
        }
    }

    #[must_use]
    pub fn failure(err: &LedgerError) -> Self {
        Self {
            status: STATUS_ERROR,
            message: err.to_string(),
            payload: None,
            error: Some(err.kind()),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Every operation the dispatcher knows, keyed by its external name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetBalanceOf,
    GetTotalSupply,
    GetAllowance,
    GetOwner,
    TransferOwnership,
    GetName,
    GetSymbol,
    GetDecimals,
    Mint,
    Burn,
    BurnFrom,
    Transfer,
    TransferFrom,
    UpdateApproval,
    Pause,
    Unpause,
    GetMemo,
}

impl Operation {
    pub fn from_name(name: &str) -> LedgerResult<Self> {
        Ok(match name {
            "GetBalanceOf" => Self::GetBalanceOf,
            "GetTotalSupply" => Self::GetTotalSupply,
            "GetAllowance" => Self::GetAllowance,
            "GetOwner" => Self::GetOwner,
            "TransferOwnership" => Self::TransferOwnership,
            "GetName" => Self::GetName,
            "GetSymbol" => Self::GetSymbol,
            "GetDecimals" => Self::GetDecimals,
            "Mint" => Self::Mint,
            "Burn" => Self::Burn,
            "BurnFrom" => Self::BurnFrom,
            "Transfer" => Self::Transfer,
            "TransferFrom" => Self::TransferFrom,
            "UpdateApproval" => Self::UpdateApproval,
            "Pause" => Self::Pause,
            "Unpause" => Self::Unpause,
            "GetMemo" => Self::GetMemo,
            other => return Err(LedgerError::UnknownFunction(other.to_string())),
        })
    }

    /// Operations rejected while the token is paused.
    #[must_use]
    pub fn is_pause_gated(&self) -> bool {
        matches!(self, Self::Transfer | Self::TransferFrom | Self::UpdateApproval)
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters of dispatched invocations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatcherStats {
    /// Invocations received, `Init` included.
    pub invocations: u64,
    pub successes: u64,
    pub failures: u64,
    /// Failures caused by the pause gate.
    pub paused_rejections: u64,
    /// Notifications forwarded to the event sink.
    pub events_emitted: u64,
}

impl DispatcherStats {
    /// Adds `other`'s counters to these.
    pub fn merge(&mut self, other: &DispatcherStats) {
        self.invocations += other.invocations;
        self.successes += other.successes;
        self.failures += other.failures;
        self.paused_rejections += other.paused_rejections;
        self.events_emitted += other.events_emitted;
    }
}

// =============================================================================
// DISPATCHER
// =============================================================================

/// Result of a successful facet call.
#[derive(Default)]
struct Outcome {
    payload: Option<String>,
    event: Option<TokenEvent>,
}

impl Outcome {
    fn payload(value: impl ToString) -> Self {
        Self {
            payload: Some(value.to_string()),
            event: None,
        }
    }

    fn event(event: TokenEvent) -> Self {
        Self {
            payload: None,
            event: Some(event),
        }
    }
}

/// Routes invocations to the token.
pub struct Dispatcher {
    token: Token,
    identity: Arc<dyn IdentityResolver>,
    events: Arc<dyn EventSink>,
    config: LedgerConfig,
    stats: Mutex<DispatcherStats>,
}

impl Dispatcher {
    pub fn new(
        token: Token,
        identity: Arc<dyn IdentityResolver>,
        events: Arc<dyn EventSink>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            token,
            identity,
            events,
            config,
            stats: Mutex::new(DispatcherStats::default()),
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn stats(&self) -> DispatcherStats {
        self.stats.lock().clone()
    }

    /// Genesis or upgrade.
    ///
    /// The first call takes one argument, the JSON token configuration,
    /// makes the caller the owner and mints
    /// `initial_mint_amount * 10^decimals` to it. Later calls are upgrades:
    /// they only check that the caller is the owner.
    pub fn init(&self, invocation: &Invocation) -> Response {
        let result = self.context(invocation, "Init").and_then(|ctx| {
            let span = ctx.span().clone();
            span.in_scope(|| self.run_init(&ctx, &invocation.args))
        });
        self.finish(&invocation.function, result)
    }

    /// Executes one named operation.
    pub fn invoke(&self, invocation: &Invocation) -> Response {
        let result = self
            .context(invocation, &invocation.function)
            .and_then(|ctx| {
                let span = ctx.span().clone();
                span.in_scope(|| self.run(&ctx, &invocation.function, &invocation.args))
            });
        self.finish(&invocation.function, result)
    }

    fn context(&self, invocation: &Invocation, function: &str) -> LedgerResult<Context> {
        let attributes = self.identity.resolve(&invocation.creator)?;
        let caller = AccountKey::from_attributes(&attributes)?;
        Ok(Context::new(caller, invocation.tx_id.clone(), function))
    }

    fn run_init(&self, ctx: &Context, args: &[String]) -> LedgerResult<Outcome> {
        if self.token.genesis.is_initialized(ctx)? {
            info!(caller = %ctx.caller(), "Upgrading token");
            let owner = self.token.ownable.get_owner(ctx)?;
            ensure_caller_is_owner(ctx.caller(), Some(&owner))?;
            return Ok(Outcome::default());
        }

        info!(caller = %ctx.caller(), "Initializing token");
        ensure_arg_count(args, 1)?;
        let metadata = GenesisConfig::from_json(&args[0])?.into_metadata(self.config.max_decimals)?;
        self.token.genesis.initialize(ctx, &metadata)?;

        let supply = self.config.genesis_supply(metadata.decimals);
        let event = self
            .token
            .mintable
            .mint(ctx, ctx.caller(), &supply.to_string())?;
        self.emit(ctx, &event)?;
        Ok(Outcome::default())
    }

    fn run(&self, ctx: &Context, function: &str, args: &[String]) -> LedgerResult<Outcome> {
        let operation = Operation::from_name(function)?;

        if operation.is_pause_gated() && self.token.pausable.is_paused(ctx)? {
            self.stats.lock().paused_rejections += 1;
            return Err(LedgerError::OperationPaused {
                function: function.to_string(),
            });
        }

        debug!(?operation, args = args.len(), "Dispatching");
        let outcome = self.execute(ctx, operation, args)?;
        if let Some(event) = &outcome.event {
            self.emit(ctx, event)?;
        }
        Ok(outcome)
    }

    fn execute(&self, ctx: &Context, operation: Operation, args: &[String]) -> LedgerResult<Outcome> {
        let t = &self.token;
        match operation {
            Operation::GetBalanceOf => {
                ensure_arg_count(args, 1)?;
                let account = account_arg(&args[0])?;
                Ok(Outcome::payload(t.basic.get_balance_of(ctx, &account)?))
            }
            Operation::GetTotalSupply => {
                ensure_arg_count(args, 0)?;
                Ok(Outcome::payload(t.basic.get_total_supply(ctx)?))
            }
            Operation::GetAllowance => {
                ensure_arg_count(args, 2)?;
                let owner = account_arg(&args[0])?;
                let spender = account_arg(&args[1])?;
                Ok(Outcome::payload(t.basic.get_allowance(ctx, &owner, &spender)?))
            }
            Operation::GetOwner => {
                ensure_arg_count(args, 0)?;
                Ok(Outcome::payload(t.ownable.get_owner(ctx)?))
            }
            Operation::TransferOwnership => {
                ensure_arg_count(args, 1)?;
                let new_owner = account_arg(&args[0])?;
                t.ownable.transfer_ownership(ctx, &new_owner)?;
                Ok(Outcome::default())
            }
            Operation::GetName => {
                ensure_arg_count(args, 0)?;
                Ok(Outcome::payload(t.detailed.name(ctx)?))
            }
            Operation::GetSymbol => {
                ensure_arg_count(args, 0)?;
                Ok(Outcome::payload(t.detailed.symbol(ctx)?))
            }
            Operation::GetDecimals => {
                ensure_arg_count(args, 0)?;
                Ok(Outcome::payload(t.detailed.decimals(ctx)?))
            }
            Operation::Mint => {
                ensure_arg_count(args, 2)?;
                let minter = account_arg(&args[0])?;
                Ok(Outcome::event(t.mintable.mint(ctx, &minter, &args[1])?))
            }
            Operation::Burn => {
                ensure_arg_count(args, 1)?;
                Ok(Outcome::event(t.burnable.burn(ctx, &args[0])?))
            }
            Operation::BurnFrom => {
                ensure_arg_count(args, 2)?;
                let burnee = account_arg(&args[0])?;
                Ok(Outcome::event(t.burnable.burn_from(ctx, &burnee, &args[1])?))
            }
            Operation::Transfer => {
                let with_memo = ensure_arg_count_with_optional(args, 2)?;
                let receiver = account_arg(&args[0])?;
                let event = if with_memo {
                    t.memo.transfer_with_memo(ctx, &receiver, &args[1], &args[2])?
                } else {
                    t.basic.transfer(ctx, &receiver, &args[1])?
                };
                Ok(Outcome::event(event))
            }
            Operation::TransferFrom => {
                let with_memo = ensure_arg_count_with_optional(args, 3)?;
                let owner = account_arg(&args[0])?;
                let receiver = account_arg(&args[1])?;
                let event = if with_memo {
                    t.memo
                        .transfer_from_with_memo(ctx, &owner, &receiver, &args[2], &args[3])?
                } else {
                    t.basic.transfer_from(ctx, &owner, &receiver, &args[2])?
                };
                Ok(Outcome::event(event))
            }
            Operation::UpdateApproval => {
                ensure_arg_count(args, 2)?;
                let spender = account_arg(&args[0])?;
                Ok(Outcome::event(t.basic.update_approval(ctx, &spender, &args[1])?))
            }
            Operation::Pause => {
                ensure_arg_count(args, 0)?;
                t.pausable.pause(ctx)?;
                Ok(Outcome::default())
            }
            Operation::Unpause => {
                ensure_arg_count(args, 0)?;
                t.pausable.unpause(ctx)?;
                Ok(Outcome::default())
            }
            Operation::GetMemo => {
                ensure_arg_count(args, 1)?;
                let account = account_arg(&args[0])?;
                Ok(Outcome::payload(t.memo.get_memo(ctx, &account)?))
            }
        }
    }

    fn emit(&self, ctx: &Context, event: &TokenEvent) -> LedgerResult<()> {
        self.events.set_event(event.name(), event.to_json()?)?;
        self.stats.lock().events_emitted += 1;
        debug!(tx_id = ctx.tx_id(), event = event.name(), "Event emitted");
        Ok(())
    }

    fn finish(&self, function: &str, result: LedgerResult<Outcome>) -> Response {
        let mut stats = self.stats.lock();
        stats.invocations += 1;
        match result {
            Ok(outcome) => {
                stats.successes += 1;
                Response::success(outcome.payload)
            }
            Err(err) => {
                stats.failures += 1;
                match err.kind() {
                    ErrorKind::CorruptState | ErrorKind::Storage | ErrorKind::InvariantViolation => {
                        error!(function, error = %err, "Invocation failed")
                    }
                    _ => warn!(function, error = %err, "Invocation rejected"),
                }
                Response::failure(&err)
            }
        }
    }
}

fn account_arg(raw: &str) -> LedgerResult<AccountKey> {
    AccountKey::parse(raw)
}
