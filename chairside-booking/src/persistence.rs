//! Durable mirror of the selection state
//!
//! The persisted slot is a convenience cache, not a source of truth: the
//! backend owns confirmed bookings. Load failures fall back to the empty
//! default and save failures never interrupt the mutation that triggered
//! them; both are logged and swallowed.

use crate::selection::{BookingTarget, SelectionStore};
use serde::{Deserialize, Serialize};
use shared::models::Service;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

/// File name of the cart slot inside the profile directory
pub const CART_FILE_NAME: &str = "cart.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted cart state: `{services, selections}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub services: Vec<Service>,
    pub selections: BookingTarget,
}

impl CartSnapshot {
    /// Snapshot of a store's current state
    pub fn of(store: &SelectionStore) -> Self {
        Self {
            services: store.services().to_vec(),
            selections: store.target().clone(),
        }
    }

    /// Rebuild a store from this snapshot
    pub fn into_store(self) -> SelectionStore {
        SelectionStore::from_parts(self.services, self.selections)
    }
}

/// Storage seam for the cart slot
///
/// Last-write-wins; concurrent writers are acceptable for a single-user
/// convenience cache.
pub trait CartStorage: Send + Sync {
    /// Read the saved snapshot; `None` when the slot has never been written
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError>;

    /// Overwrite the slot with the given snapshot
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        (**self).load()
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        (**self).save(snapshot)
    }
}

/// Load the persisted snapshot, degrading to the empty default
///
/// A missing slot or a parse failure both produce the default; the failure
/// is logged, never surfaced.
pub fn restore(storage: &dyn CartStorage) -> CartSnapshot {
    match storage.load() {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => CartSnapshot::default(),
        Err(e) => {
            warn!("failed to load cart snapshot, starting empty: {e}");
            CartSnapshot::default()
        }
    }
}

/// Write the snapshot to the slot, swallowing failures
pub fn mirror(storage: &dyn CartStorage, snapshot: &CartSnapshot) {
    if let Err(e) = storage.save(snapshot) {
        warn!("failed to save cart snapshot: {e}");
    }
}

/// File-backed cart slot: `{profile_dir}/cart.json`
#[derive(Debug)]
pub struct FileCartStorage {
    file_path: PathBuf,
}

impl FileCartStorage {
    pub fn new(profile_dir: &Path) -> Self {
        Self {
            file_path: profile_dir.join(CART_FILE_NAME),
        }
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }
}

/// In-memory cart slot for tests
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    slot: Mutex<Option<CartSnapshot>>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current slot contents
    pub fn stored(&self) -> Option<CartSnapshot> {
        self.slot.lock().expect("cart slot lock poisoned").clone()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        Ok(self.stored())
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        *self.slot.lock().expect("cart slot lock poisoned") = Some(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Shop;

    fn snapshot_with_service() -> CartSnapshot {
        CartSnapshot {
            services: vec![Service {
                id: "svc-1".to_string(),
                name: "Haircut".to_string(),
                price: 20.0,
                duration: 30,
            }],
            selections: BookingTarget {
                shop: Some(Shop {
                    id: "shop-1".to_string(),
                    name: "Downtown".to_string(),
                    address: "1 Main St".to_string(),
                    phone_number: "5550001".to_string(),
                    tax_rate: 0.18,
                }),
                barber: None,
                date: None,
                time: None,
            },
        }
    }

    #[test]
    fn file_round_trip_preserves_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileCartStorage::new(dir.path());

        let snapshot = snapshot_with_service();
        storage.save(&snapshot).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn missing_file_loads_as_empty_slot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileCartStorage::new(dir.path());
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_restores_to_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CART_FILE_NAME), "{not json").unwrap();

        let storage = FileCartStorage::new(dir.path());
        assert_eq!(restore(&storage), CartSnapshot::default());
    }

    #[test]
    fn restore_uses_saved_snapshot_when_present() {
        let storage = MemoryCartStorage::new();
        let snapshot = snapshot_with_service();
        mirror(&storage, &snapshot);
        assert_eq!(restore(&storage), snapshot);
    }
}
