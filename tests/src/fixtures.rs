//! # Test Fixtures
//!
//! A ledger wired end to end (dispatcher, façade, engine, in-memory store)
//! and driven the way a client would: operation names, string arguments
//! and a creator credential.

use std::sync::Arc;
use token_ledger::domain::audit_supply;
use token_ledger::prelude::*;

/// MSP id shared by every test identity.
pub const MSP_ID: &str = "Org1MSP";
/// Issuer common name shared by every test identity.
pub const ISSUER_CN: &str = "ca.org1.example.com";

/// Account key of the test identity `subject`.
pub fn account(subject: &str) -> String {
    format!("{MSP_ID},{ISSUER_CN},{subject}")
}

/// Creator credential of the test identity `subject`.
pub fn creator(subject: &str) -> Vec<u8> {
    serde_json::to_vec(&IdentityAttributes::new(MSP_ID, ISSUER_CN, subject))
        .unwrap_or_default()
}

/// Genesis payload for a token with `decimals` decimals.
pub fn genesis_config(decimals: u8) -> String {
    format!(r#"{{"name":"Test Token","symbol":"TT","decimals":"{decimals}"}}"#)
}

/// Ledger harness.
pub struct TestLedger {
    pub store: Arc<InMemoryLedgerStore>,
    pub events: Arc<RecordingEventSink>,
    pub dispatcher: Dispatcher,
    next_tx: parking_lot::Mutex<u64>,
}

impl TestLedger {
    /// Uninitialized ledger.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        let store = Arc::new(InMemoryLedgerStore::new());
        let events = Arc::new(RecordingEventSink::new());
        let dispatcher = Dispatcher::new(
            Token::for_store(Arc::clone(&store)),
            Arc::new(JsonIdentityResolver),
            Arc::clone(&events) as Arc<dyn EventSink>,
            config,
        );
        Self {
            store,
            events,
            dispatcher,
            next_tx: parking_lot::Mutex::new(0),
        }
    }

    /// Ledger initialized by `owner` with `decimals` decimals.
    pub fn genesis(owner: &str, decimals: u8) -> Self {
        let ledger = Self::new();
        let response = ledger.init(owner, &[&genesis_config(decimals)]);
        assert!(response.is_ok(), "genesis failed: {response:?}");
        ledger
    }

    fn invocation(&self, function: &str, args: &[&str], creator: Vec<u8>) -> Invocation {
        let mut next = self.next_tx.lock();
        *next += 1;
        Invocation::new(
            format!("tx-{next}"),
            function,
            args.iter().map(|a| a.to_string()).collect(),
            creator,
        )
    }

    pub fn init(&self, caller: &str, args: &[&str]) -> Response {
        self.dispatcher
            .init(&self.invocation("Init", args, creator(caller)))
    }

    /// Invokes `function` as `caller`.
    pub fn invoke(&self, caller: &str, function: &str, args: &[&str]) -> Response {
        self.dispatcher
            .invoke(&self.invocation(function, args, creator(caller)))
    }

    /// Init as an identity outside the shared MSP.
    pub fn init_as(&self, caller: &IdentityAttributes, args: &[&str]) -> Response {
        let creator = serde_json::to_vec(caller).unwrap_or_default();
        self.dispatcher
            .init(&self.invocation("Init", args, creator))
    }

    /// Invokes `function` as an identity outside the shared MSP.
    pub fn invoke_as(&self, caller: &IdentityAttributes, function: &str, args: &[&str]) -> Response {
        let creator = serde_json::to_vec(caller).unwrap_or_default();
        self.dispatcher
            .invoke(&self.invocation(function, args, creator))
    }

    /// Invokes a query and returns its payload, panicking on failure.
    pub fn query(&self, function: &str, args: &[&str]) -> String {
        let response = self.invoke("auditor", function, args);
        assert!(response.is_ok(), "{function} failed: {response:?}");
        response.payload.unwrap_or_default()
    }

    pub fn balance(&self, subject: &str) -> String {
        self.query("GetBalanceOf", &[&account(subject)])
    }

    pub fn allowance(&self, owner: &str, spender: &str) -> String {
        self.query("GetAllowance", &[&account(owner), &account(spender)])
    }

    pub fn total_supply(&self) -> String {
        self.query("GetTotalSupply", &[])
    }

    /// Snapshot of the raw world state.
    pub fn snapshot(&self) -> Vec<(String, Vec<u8>)> {
        self.store.entries()
    }

    /// Sum of balances, checked against the recorded supply.
    pub fn audit(&self) -> Result<Amount, String> {
        let entries = self.snapshot();
        audit_supply(entries.iter().map(|(k, v)| (k.as_str(), v.as_slice())))
            .map_err(|violation| format!("{violation:?}"))
    }
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}
