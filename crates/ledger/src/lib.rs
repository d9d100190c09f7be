//! Ledger module (in-memory account store).
//!
//! Pure domain logic plus synchronization: no IO, no HTTP, no persistence
//! concerns. The snapshot types defined here are consumed by the storage
//! layer, which is responsible only for moving them to and from disk.

pub mod account;
pub mod ledger;
pub mod snapshot;

pub use account::{Account, Direction, TxLog};
pub use ledger::Ledger;
pub use snapshot::{SNAPSHOT_VERSION, STORAGE_KIND, Snapshot, SnapshotAccount, SnapshotMeta};
