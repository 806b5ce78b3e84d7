//! # Token Events
//!
//! Notifications emitted by successful mutating operations. The dispatcher
//! forwards them, JSON-encoded, to the external notification channel.
//!
//! ```text
//! {"origin": "<caller>", "payload": {"from": "...", "to": "...", "amount": "123"}}
//! ```
//!
//! Mint records use an empty `from`, burn records an empty `to`.

use crate::domain::{Amount, LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

/// Logical notification kind; doubles as the channel event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Balance movement, including mint and burn.
    Transfer,
    /// Allowance overwrite.
    Approval,
}

impl EventKind {
    /// Event name used on the notification channel.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Approval => "approval",
        }
    }
}

/// `{from, to, amount}` body of a notification.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub from: String,
    pub to: String,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
}

/// A notification together with the identity that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEvent {
    #[serde(skip, default = "default_kind")]
    pub kind: EventKind,
    pub origin: String,
    pub payload: EventPayload,
}

fn default_kind() -> EventKind {
    EventKind::Transfer
}

impl TokenEvent {
    /// Transfer-kind record.
    pub fn transfer(
        origin: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self::new(EventKind::Transfer, origin, from, to, amount)
    }

    /// Approval-kind record.
    pub fn approval(
        origin: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self::new(EventKind::Approval, origin, from, to, amount)
    }

    fn new(
        kind: EventKind,
        origin: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            kind,
            origin: origin.into(),
            payload: EventPayload {
                from: from.into(),
                to: to.into(),
                amount,
            },
        }
    }

    /// Channel event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// JSON wire form handed to the notification channel.
    pub fn to_json(&self) -> LedgerResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| LedgerError::InvariantViolation(format!(
            "event could not be encoded: {e}"
        )))
    }
}
