//! # token-runtime
//!
//! Stand-alone host for the token ledger.
//!
//! ## Modules
//!
//! - `config/` - Environment-driven runtime configuration
//! - `persistence/` - JSON state file
//! - `host/` - Per-invocation write sets and response lines

pub mod config;
pub mod host;
pub mod persistence;

pub use config::{load_config, RuntimeConfig};
pub use host::{EmittedEvent, Host, HostResponse, InvocationLine};
pub use persistence::{load_state, save_state};
