//! # Runtime Configuration
//!
//! Defaults overridden by environment variables:
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `TOKEN_STATE_PATH` | JSON state file loaded at start and saved at exit |
//! | `TOKEN_INITIAL_MINT_AMOUNT` | whole tokens minted at genesis |
//! | `TOKEN_MAX_DECIMALS` | largest accepted genesis `decimals` |
//!
//! Malformed values are logged and ignored.

use std::path::PathBuf;
use token_ledger::{Amount, LedgerConfig};
use tracing::{info, warn};

pub const ENV_STATE_PATH: &str = "TOKEN_STATE_PATH";
pub const ENV_INITIAL_MINT_AMOUNT: &str = "TOKEN_INITIAL_MINT_AMOUNT";
pub const ENV_MAX_DECIMALS: &str = "TOKEN_MAX_DECIMALS";

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// World state file. `None` keeps state in memory only.
    pub state_path: Option<PathBuf>,
    /// Ledger configuration.
    pub ledger: LedgerConfig,
}

/// Load configuration from the process environment.
pub fn load_config() -> RuntimeConfig {
    load_config_from(|name| std::env::var(name).ok())
}

/// Load configuration from an arbitrary variable lookup.
pub fn load_config_from<F>(lookup: F) -> RuntimeConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = RuntimeConfig::default();

    if let Some(path) = lookup(ENV_STATE_PATH).filter(|p| !p.trim().is_empty()) {
        info!(path = %path, "Using state file");
        config.state_path = Some(PathBuf::from(path));
    }

    if let Some(raw) = lookup(ENV_INITIAL_MINT_AMOUNT) {
        match Amount::parse(raw.trim()) {
            Ok(amount) => config.ledger.initial_mint_amount = amount,
            Err(e) => warn!(value = %raw, error = %e, "{ENV_INITIAL_MINT_AMOUNT} ignored"),
        }
    }

    if let Some(raw) = lookup(ENV_MAX_DECIMALS) {
        match raw.trim().parse::<u8>() {
            Ok(max) => config.ledger.max_decimals = max,
            Err(e) => warn!(value = %raw, error = %e, "{ENV_MAX_DECIMALS} ignored"),
        }
    }

    config
}
