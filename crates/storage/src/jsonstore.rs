//! JSON snapshot file store.
//!
//! Writes go to `<path>.tmp` first and are renamed into place, so an
//! interrupted write (crash, power loss) never corrupts the previous
//! snapshot file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use teller_ledger::{STORAGE_KIND, Snapshot};

/// Failure while loading or saving a snapshot file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read, written or renamed.
    #[error("snapshot io: {0}")]
    Io(#[from] io::Error),

    /// The file contents could not be encoded or decoded.
    #[error("snapshot codec: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Handle on one snapshot file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the snapshot file.
    ///
    /// Usually called once at startup; a missing file surfaces as
    /// [`StoreError::Io`] with `NotFound`, which callers treat as an empty
    /// start.
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        let bytes = fs::read(&self.path)?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            accounts = snapshot.accounts.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Encode the snapshot and atomically replace the snapshot file.
    ///
    /// The metadata's storage kind and timestamp are stamped here, at write
    /// time. Output is pretty-printed so the file stays hand-inspectable.
    pub fn save(&self, mut snapshot: Snapshot) -> Result<(), StoreError> {
        snapshot.meta.storage = STORAGE_KIND.to_string();
        snapshot.meta.timestamp = Utc::now();

        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            accounts = snapshot.accounts.len(),
            bytes = bytes.len(),
            "saved snapshot"
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}
