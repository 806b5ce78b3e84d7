//! # Token Runtime
//!
//! Reads one JSON invocation per stdin line and prints one JSON response
//! per stdout line. Logs go to stderr.
//!
//! ```text
//! {"function":"Init","args":["{\"name\":\"T\",\"symbol\":\"T\",\"decimals\":\"2\"}"],
//!  "creator":{"msp_id":"Org1MSP","issuer_cn":"ca.org1","subject_cn":"alice"}}
//! {"function":"GetTotalSupply","creator":{...}}
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Install the tracing subscriber (`RUST_LOG`, default `info`)
//! 2. Load configuration from the environment
//! 3. Load the state file, if configured
//! 4. Process stdin until EOF; undecodable lines get an error response
//! 5. Save the state file

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use token_ledger::adapters::InMemoryLedgerStore;
use token_runtime::{load_config, load_state, save_state, Host};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config();

    let store = Arc::new(match &config.state_path {
        Some(path) => load_state(path)?,
        None => InMemoryLedgerStore::new(),
    });

    let mut host = Host::new(Arc::clone(&store), config.ledger.clone());
    let served = host.serve(io::stdin().lock(), io::stdout().lock());

    // Committed invocations are saved even when the stream broke off.
    if let Some(path) = &config.state_path {
        save_state(path, &store).context("saving state")?;
    }

    let stats = host.stats();
    info!(
        invocations = stats.invocations,
        successes = stats.successes,
        failures = stats.failures,
        commits = host.commits(),
        "Input exhausted"
    );
    served
}
