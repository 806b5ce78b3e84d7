//! # Invocation Host
//!
//! Executes invocations against a shared world state the way the ledger
//! substrate does: every invocation gets its own write set, which is
//! committed only when the invocation succeeds. Events of failed
//! invocations are discarded with their writes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::sync::Arc;
use token_ledger::adapters::{
    InMemoryLedgerStore, JsonIdentityResolver, RecordingEventSink, WriteSetStore,
};
use token_ledger::ports::EventSink;
use token_ledger::{
    Dispatcher, DispatcherStats, IdentityAttributes, Invocation, LedgerConfig, LedgerError,
    Response, Token,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Operation name routed to genesis/upgrade.
pub const INIT_FUNCTION: &str = "Init";

/// One input line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationLine {
    /// Transaction id; generated when absent.
    #[serde(default)]
    pub tx_id: Option<String>,
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Already verified identity of the submitter.
    pub creator: IdentityAttributes,
}

/// A notification forwarded by a committed invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmittedEvent {
    pub name: String,
    pub payload: serde_json::Value,
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostResponse {
    pub tx_id: String,
    #[serde(flatten)]
    pub response: Response,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EmittedEvent>,
}

/// Runs invocations against a shared store.
pub struct Host {
    store: Arc<InMemoryLedgerStore>,
    config: LedgerConfig,
    stats: DispatcherStats,
    commits: u64,
}

impl Host {
    pub fn new(store: Arc<InMemoryLedgerStore>, config: LedgerConfig) -> Self {
        Self {
            store,
            config,
            stats: DispatcherStats::default(),
            commits: 0,
        }
    }

    /// Totals over every invocation executed so far.
    pub fn stats(&self) -> &DispatcherStats {
        &self.stats
    }

    /// Number of write sets committed.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Answers every non-blank input line with one output line until EOF.
    ///
    /// Undecodable lines get an error response; only I/O failures end the
    /// loop early.
    pub fn serve<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf).context("reading input")? == 0 {
                return Ok(());
            }
            let line = buf.trim_ascii();
            if line.is_empty() {
                continue;
            }
            let out = self.handle_bytes(line);
            let json = serde_json::to_string(&out).context("encoding response")?;
            writeln!(output, "{json}").context("writing response")?;
            output.flush().context("writing response")?;
        }
    }

    /// Decodes and executes one raw input line.
    pub fn handle_bytes(&mut self, line: &[u8]) -> HostResponse {
        match std::str::from_utf8(line) {
            Ok(line) => self.handle_line(line),
            Err(e) => self.reject(format!("input is not UTF-8: {e}")),
        }
    }

    /// Decodes and executes one input line. Never fails: malformed input is
    /// reported in the response.
    pub fn handle_line(&mut self, line: &str) -> HostResponse {
        match serde_json::from_str::<InvocationLine>(line) {
            Ok(invocation) => self.execute(invocation),
            Err(e) => self.reject(format!("invalid invocation: {e}")),
        }
    }

    fn reject(&mut self, reason: String) -> HostResponse {
        let err = LedgerError::ParseError(reason);
        warn!(error = %err, "Input line rejected");
        self.stats.invocations += 1;
        self.stats.failures += 1;
        HostResponse {
            tx_id: String::new(),
            response: Response::failure(&err),
            events: Vec::new(),
        }
    }

    /// Executes one invocation in its own write set.
    pub fn execute(&mut self, line: InvocationLine) -> HostResponse {
        let tx_id = line
            .tx_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let (response, events) = match self.run(&tx_id, line.function, line.args, &line.creator) {
            Ok(result) => result,
            Err(err) => (Response::failure(&err), Vec::new()),
        };

        HostResponse {
            tx_id,
            response,
            events,
        }
    }

    fn run(
        &mut self,
        tx_id: &str,
        function: String,
        args: Vec<String>,
        creator: &IdentityAttributes,
    ) -> Result<(Response, Vec<EmittedEvent>), LedgerError> {
        let creator = serde_json::to_vec(creator)
            .map_err(|e| LedgerError::IdentityResolutionFailure(e.to_string()))?;

        let write_set = Arc::new(WriteSetStore::new(Arc::clone(&self.store)));
        let sink = Arc::new(RecordingEventSink::new());
        let dispatcher = Dispatcher::new(
            Token::for_store(Arc::clone(&write_set)),
            Arc::new(JsonIdentityResolver),
            Arc::clone(&sink) as Arc<dyn EventSink>,
            self.config.clone(),
        );

        let invocation = Invocation::new(tx_id, function, args, creator);
        let response = if invocation.function == INIT_FUNCTION {
            dispatcher.init(&invocation)
        } else {
            dispatcher.invoke(&invocation)
        };
        self.stats.merge(&dispatcher.stats());

        if !response.is_ok() {
            debug!(tx_id, keys = write_set.written_keys().len(), "Write set discarded");
            return Ok((response, Vec::new()));
        }

        let written = write_set.commit()?;
        self.commits += 1;
        info!(tx_id, function = %invocation.function, keys = written, "Invocation committed");

        let events = sink
            .drain()
            .into_iter()
            .map(|(name, payload)| EmittedEvent {
                name,
                payload: serde_json::from_slice(&payload).unwrap_or(serde_json::Value::Null),
            })
            .collect();
        Ok((response, events))
    }
}
