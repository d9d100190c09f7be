//! `teller-storage` — durable snapshot persistence.
//!
//! This layer knows nothing about ledger semantics: it moves
//! [`Snapshot`](teller_ledger::Snapshot) values between memory and disk,
//! structurally, and owns the durability guarantees of that transfer.

pub mod jsonstore;

pub use jsonstore::{JsonStore, StoreError};
