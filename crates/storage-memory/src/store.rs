//! The snapshot store: in-memory state persisted as one JSON document.
//!
//! Every mutation works on a clone of the state, writes the snapshot to
//! disk, and only then commits the clone — a failed write leaves the
//! in-memory state untouched.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use log::info;
use serde::{Deserialize, Serialize};

use spendwise_core::budgets::Budget;
use spendwise_core::constants::SNAPSHOT_STORE_KEY;
use spendwise_core::errors::Result;
use spendwise_core::settings::Settings;
use spendwise_core::transactions::Transaction;

/// Everything the local store persists, mirroring the shape of the
/// snapshot the web client keeps in browser storage.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoreState {
    /// Budgets keyed by month (`YYYY-MM`), one per key.
    pub budgets: BTreeMap<String, Budget>,
    pub transactions: Vec<Transaction>,
    pub settings: Option<Settings>,
}

pub struct SnapshotStore {
    state: RwLock<StoreState>,
    path: PathBuf,
}

impl SnapshotStore {
    /// Opens the store, rehydrating from an existing snapshot file when
    /// one is present under `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Arc<Self>> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(format!("{}.json", SNAPSHOT_STORE_KEY));
        let state = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            StoreState::default()
        };
        info!("Snapshot store ready at {}", path.display());
        Ok(Arc::new(SnapshotStore {
            state: RwLock::new(state),
            path,
        }))
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        f(&self.state.read().unwrap())
    }

    /// Clone, mutate, persist, commit. The snapshot write gates the commit.
    pub(crate) fn mutate<T>(&self, f: impl FnOnce(&mut StoreState) -> Result<T>) -> Result<T> {
        let mut guard = self.state.write().unwrap();
        let mut working = guard.clone();
        let result = f(&mut working)?;
        self.persist(&working)?;
        *guard = working;
        Ok(result)
    }

    fn persist(&self, state: &StoreState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
