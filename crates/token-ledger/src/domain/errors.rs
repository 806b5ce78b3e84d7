//! # Error Types
//!
//! Every failure an invocation can report. None of these abort the hosting
//! process; they all travel back to the caller inside the response envelope.

use super::amount::{Amount, AmountError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors raised by the token state machine and its dispatcher.
#[derive(Debug, Error, Clone)]
pub enum LedgerError {
    /// Wrong number of arguments for the requested operation.
    #[error("invalid number of arguments. Expected {expected}, got {actual}")]
    InvalidArgumentCount {
        /// Accepted argument count(s), e.g. `"2"` or `"2 or 3"`.
        expected: String,
        /// Number of arguments received.
        actual: usize,
    },

    /// Malformed numeric or configuration input.
    #[error("parse error: {0}")]
    ParseError(String),

    /// The amount parsed but is below zero.
    #[error("invalid amount: {0}")]
    NegativeOrInvalidAmount(String),

    /// The debited account does not hold enough tokens.
    #[error("insufficient balance of {account}: available {available}, required {required}")]
    InsufficientBalance {
        /// Debited account key.
        account: String,
        /// Current balance.
        available: Amount,
        /// Requested amount.
        required: Amount,
    },

    /// The spender's allowance is smaller than the requested amount.
    #[error("insufficient allowance of {spender} over {owner}: available {available}, required {required}")]
    InsufficientAllowance {
        /// Allowance owner.
        owner: String,
        /// Spender.
        spender: String,
        /// Current allowance.
        available: Amount,
        /// Requested amount.
        required: Amount,
    },

    /// The spender holds no allowance at all.
    #[error("no approval granted by {owner} to {spender}")]
    NoApproval {
        /// Allowance owner.
        owner: String,
        /// Spender.
        spender: String,
    },

    /// The caller is not the identity the operation requires.
    #[error("function only accessible to token owner: {owner}")]
    Unauthorized {
        /// Identity that made the call.
        caller: String,
        /// Identity the operation requires.
        owner: String,
    },

    /// Operation rejected by the pause gate.
    #[error("calling {function} is not allowed when token is paused")]
    OperationPaused {
        /// Rejected operation name.
        function: String,
    },

    /// A queried record was never written.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller's identity could not be resolved into an account key.
    #[error("identity resolution failed: {0}")]
    IdentityResolutionFailure(String),

    /// A ledger-wide invariant would be broken.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// An account argument is not a well-formed account key.
    #[error("invalid account key {0:?}: expected `org,issuer,subject`")]
    InvalidAccountKey(String),

    /// A stored value could not be decoded.
    #[error("corrupt state at key {key:?}: {reason}")]
    CorruptState {
        /// Offending key.
        key: String,
        /// Decoding failure.
        reason: String,
    },

    /// The dispatcher does not know the requested operation.
    #[error("input function {0:?} is not defined in chaincode")]
    UnknownFunction(String),

    /// Failure reported by the ledger store or event channel.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl LedgerError {
    /// Fieldless classification used in response envelopes.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgumentCount { .. } => ErrorKind::InvalidArgumentCount,
            Self::ParseError(_) => ErrorKind::ParseError,
            Self::NegativeOrInvalidAmount(_) => ErrorKind::NegativeOrInvalidAmount,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::InsufficientAllowance { .. } => ErrorKind::InsufficientAllowance,
            Self::NoApproval { .. } => ErrorKind::NoApproval,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::OperationPaused { .. } => ErrorKind::OperationPaused,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::IdentityResolutionFailure(_) => ErrorKind::IdentityResolutionFailure,
            Self::InvariantViolation(_) => ErrorKind::InvariantViolation,
            Self::InvalidAccountKey(_) => ErrorKind::InvalidAccountKey,
            Self::CorruptState { .. } => ErrorKind::CorruptState,
            Self::UnknownFunction(_) => ErrorKind::UnknownFunction,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<AmountError> for LedgerError {
    fn from(err: AmountError) -> Self {
        match err {
            AmountError::Negative(_) => Self::NegativeOrInvalidAmount(err.to_string()),
            AmountError::Empty | AmountError::Malformed(_) | AmountError::InvalidEncoding => {
                Self::ParseError(err.to_string())
            }
        }
    }
}

/// Classification of a [`LedgerError`], stable across message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidArgumentCount,
    ParseError,
    NegativeOrInvalidAmount,
    InsufficientBalance,
    InsufficientAllowance,
    NoApproval,
    Unauthorized,
    OperationPaused,
    NotFound,
    IdentityResolutionFailure,
    InvariantViolation,
    InvalidAccountKey,
    CorruptState,
    UnknownFunction,
    Storage,
}

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors from the external ledger store and notification channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend rejected or failed the request.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A write set was used after it had been committed.
    #[error("write set already committed")]
    AlreadyCommitted,
}
