//! # Invocation Context
//!
//! Everything an operation needs to know about the call it serves: the
//! resolved caller, the transaction id and the tracing span every log line
//! of the invocation is attached to.

use crate::domain::AccountKey;
use tracing::Span;

/// Per-invocation execution context, passed explicitly to every facet call.
#[derive(Debug, Clone)]
pub struct Context {
    caller: AccountKey,
    tx_id: String,
    span: Span,
}

impl Context {
    /// Creates a context with a fresh `invocation` span.
    pub fn new(caller: AccountKey, tx_id: impl Into<String>, function: &str) -> Self {
        let tx_id = tx_id.into();
        let span = tracing::info_span!(
            "invocation",
            tx_id = %tx_id,
            function = %function,
            caller = %caller,
        );
        Self {
            caller,
            tx_id,
            span,
        }
    }

    /// The resolved acting identity.
    #[must_use]
    pub fn caller(&self) -> &AccountKey {
        &self.caller
    }

    /// Transaction id of the invocation.
    #[must_use]
    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    /// Span that operation spans and log lines nest under.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }
}
