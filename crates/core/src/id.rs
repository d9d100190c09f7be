//! Strongly-typed identifiers used across the domain.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an account.
///
/// Values are produced by the ledger's own sequence (decimal strings of a
/// monotonically increasing counter, starting at "1") and are never reused
/// within a process lifetime. Everything outside the ledger treats them as
/// opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Identifier for the given sequence number.
    pub fn from_seq(seq: i64) -> Self {
        Self(seq.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
