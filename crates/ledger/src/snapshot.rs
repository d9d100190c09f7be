//! Point-in-time export of ledger state.
//!
//! These are pure data transfer types: no behavior, no validation. A snapshot
//! is produced by [`Ledger::snapshot`](crate::Ledger::snapshot), optionally
//! written to disk by the storage layer, and consumed again by
//! [`Ledger::restore`](crate::Ledger::restore). History entries keep their
//! concrete [`TxLog`] type through the whole round trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use teller_core::AccountId;

use crate::account::TxLog;

/// Storage kind written into every snapshot's metadata.
pub const STORAGE_KIND: &str = "json_snapshot";

/// Schema version of the snapshot layout, compared before future migrations.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Metadata block carried by every snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// Backend that produced the snapshot, e.g. `"json_snapshot"`.
    pub storage: String,
    pub version: u32,
    /// When the snapshot was created (re-stamped by the store at write time).
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

/// Serialized form of one account, including its full history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotAccount {
    pub id: AccountId,
    pub name: String,
    pub balance: i64,
    #[serde(default)]
    pub logs: Vec<TxLog>,
}

/// Complete, consistent export of ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "_meta")]
    pub meta: SnapshotMeta,
    /// Next value of the account id sequence.
    pub next_id: i64,
    #[serde(default)]
    pub accounts: Vec<SnapshotAccount>,
}
