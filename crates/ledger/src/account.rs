use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use teller_core::AccountId;

/// Direction of a balance movement, relative to the account it is logged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

/// One immutable record of a balance-changing event on an account.
///
/// Appended in the same critical section as the balance change it records;
/// never mutated or removed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxLog {
    pub time: DateTime<Utc>,
    /// Positive amount in smallest currency unit; direction is carried
    /// separately.
    pub amount: i64,
    pub direction: Direction,
    /// The other side of a transfer; absent for deposits and withdrawals.
    #[serde(
        rename = "counter_account",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub counter_account: Option<AccountId>,
    /// Free-text tag of the causing operation ("deposit", "withdraw",
    /// "transfer").
    pub note: String,
}

/// A named balance-holding entity.
///
/// The name is immutable after creation. The balance is kept in smallest
/// currency units and is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub balance: i64,
    /// Ordered, append-only history of balance movements.
    #[serde(default)]
    pub logs: Vec<TxLog>,
}
