//! Domain error model.

use thiserror::Error;

/// Result type used across the ledger domain.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Domain-level failure raised by ledger operations.
///
/// Every variant is a deterministic caller-input or resource-state problem;
/// none of them is transient, so callers must not retry. The transport layer
/// maps each kind to a distinct HTTP status.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// A supplied amount was zero or negative, or an initial balance was
    /// negative.
    #[error("amount must be > 0")]
    InvalidAmount,

    /// The referenced account identifier does not exist.
    #[error("account not found")]
    NotFound,

    /// A withdrawal or transfer would drive a balance negative.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// A transfer names the same account as source and destination.
    #[error("from and to are same")]
    SameAccount,
}
