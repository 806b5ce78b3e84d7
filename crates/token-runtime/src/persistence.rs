//! # State File
//!
//! The world state is saved as one JSON object mapping each key to its
//! UTF-8 value. Composite keys keep their `\u0000` delimiters, which JSON
//! escapes.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use token_ledger::adapters::InMemoryLedgerStore;
use tracing::info;

/// Loads `path` into a fresh store. A missing file yields an empty store.
pub fn load_state(path: &Path) -> Result<InMemoryLedgerStore> {
    if !path.exists() {
        info!(path = %path.display(), "State file absent, starting empty");
        return Ok(InMemoryLedgerStore::new());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading state file {}", path.display()))?;
    let entries: BTreeMap<String, String> = serde_json::from_str(&raw)
        .with_context(|| format!("decoding state file {}", path.display()))?;

    info!(path = %path.display(), keys = entries.len(), "State loaded");
    Ok(InMemoryLedgerStore::from_entries(
        entries.into_iter().map(|(k, v)| (k, v.into_bytes())),
    ))
}

/// Writes every entry of `store` to `path`, replacing it atomically.
pub fn save_state(path: &Path, store: &InMemoryLedgerStore) -> Result<()> {
    let mut entries = BTreeMap::new();
    for (key, value) in store.entries() {
        let value = String::from_utf8(value)
            .with_context(|| format!("value of key {key:?} is not UTF-8"))?;
        entries.insert(key, value);
    }

    let json = serde_json::to_string_pretty(&entries).context("encoding state")?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;

    info!(path = %path.display(), keys = entries.len(), "State saved");
    Ok(())
}
