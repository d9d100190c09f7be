use std::sync::Arc;

use teller_ledger::Ledger;
use teller_storage::JsonStore;

/// Shared application state: the ledger plus the snapshot store used to
/// persist it after successful mutations.
#[derive(Debug)]
pub struct AppState {
    pub ledger: Ledger,
    store: Option<JsonStore>,
}

impl AppState {
    /// State with snapshot persistence. Pass `None` to run purely in memory
    /// (tests, ephemeral instances).
    pub fn new(ledger: Ledger, store: Option<JsonStore>) -> Arc<Self> {
        Arc::new(Self { ledger, store })
    }

    /// Write the current ledger state to the snapshot file, if one is
    /// configured.
    ///
    /// Failures are logged, not returned: the in-memory ledger stays
    /// authoritative and the request that triggered the save has already
    /// succeeded. The snapshot export re-acquires the ledger lock internally;
    /// no file IO happens inside it.
    pub fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(err) = store.save(self.ledger.snapshot()) {
            tracing::warn!(
                path = %store.path().display(),
                error = %err,
                "failed to persist snapshot"
            );
        }
    }
}
