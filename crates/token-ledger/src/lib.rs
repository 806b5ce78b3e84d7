//! # token-ledger
//!
//! Fungible-token ledger state machine executed as a smart contract on a
//! permissioned, multi-organization ledger.
//!
//! ## Role in System
//!
//! - **State machine**: per-identity balances, total supply, allowances,
//!   owner, pause flag and per-recipient transfer memos
//! - **Exact arithmetic**: every quantity is an arbitrary-precision integer
//! - **Host-agnostic**: world state, identity resolution and event delivery
//!   are ports implemented by the hosting substrate
//!
//! ## Architecture
//!
//! ```text
//!   Invocation ──→ [Dispatcher] ──→ [Token façade]
//!                       │              │ basic (MemoExtension ─→ TokenEngine)
//!                       │              │ ownable / detailed / mintable /
//!                       │              │ burnable / pausable / genesis ─→ TokenEngine
//!                       ↓              ↓
//!              IdentityResolver   [LedgerState] ──→ LedgerStore
//!              EventSink
//! ```
//!
//! ## Persisted key layout
//!
//! See [`domain::keys`].

pub mod adapters;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod domain;
pub mod engine;
pub mod events;
pub mod memo;
pub mod ports;
pub mod state;
pub mod token;

pub use config::LedgerConfig;
pub use context::Context;
pub use dispatcher::{Dispatcher, DispatcherStats, Invocation, Operation, Response};
pub use domain::{
    AccountKey, Amount, AmountError, ErrorKind, GenesisConfig, IdentityAttributes, LedgerError,
    LedgerResult, StoreError, TokenMetadata,
};
pub use engine::TokenEngine;
pub use events::{EventKind, EventPayload, TokenEvent};
pub use memo::MemoExtension;
pub use state::LedgerState;
pub use token::Token;

/// Common imports for hosts and tests.
pub mod prelude {
    pub use crate::adapters::{
        InMemoryLedgerStore, JsonIdentityResolver, RecordingEventSink, StaticIdentityResolver,
        WriteSetStore,
    };
    pub use crate::ports::*;
    pub use crate::{
        AccountKey, Amount, Context, Dispatcher, DispatcherStats, ErrorKind, IdentityAttributes,
        Invocation, LedgerConfig, LedgerError, Response, Token, TokenEngine, TokenEvent,
    };
}
