//! Durable cart storage.
//!
//! The cart's canonical snapshot lives in a key-value store under the single
//! key `@RocketShoes:cart`, as a serialized sequence of line items. The
//! snapshot is read once when the store opens and overwritten wholesale
//! after every committed mutation.
//!
//! [`JsonFileStorage`] keeps the key-value map in one JSON file, writing
//! through a temp file plus rename so a crash never leaves a truncated
//! snapshot. [`MemoryStorage`] is a drop-in substitute for tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use rocket_cart_core::LineItem;

use crate::error::StorageError;

/// Storage key for the cart snapshot.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Persistence seam for the cart snapshot.
///
/// `save` is synchronous and called right after the in-memory commit is
/// decided; implementations replace the previous snapshot wholesale.
pub trait CartStorage {
    /// Load the persisted snapshot, `None` when no snapshot exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing store is unreadable or the
    /// snapshot cannot be decoded.
    fn load(&self) -> Result<Option<Vec<LineItem>>, StorageError>;

    /// Replace the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the snapshot cannot be written.
    fn save(&self, snapshot: &[LineItem]) -> Result<(), StorageError>;
}

impl<S: CartStorage> CartStorage for &S {
    fn load(&self) -> Result<Option<Vec<LineItem>>, StorageError> {
        (*self).load()
    }

    fn save(&self, snapshot: &[LineItem]) -> Result<(), StorageError> {
        (*self).save(snapshot)
    }
}

/// File-backed key-value storage holding the cart snapshot.
///
/// The file contains a JSON object mapping storage keys to serialized
/// string values, mirroring the shape of browser local storage.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage handle for the given file path.
    ///
    /// The file is created lazily on the first `save`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Write-then-rename keeps the previous snapshot intact if the
        // process dies mid-write.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<LineItem>>, StorageError> {
        let map = self.read_map()?;
        match map.get(CART_STORAGE_KEY) {
            Some(raw) => {
                let snapshot: Vec<LineItem> = serde_json::from_str(raw)?;
                debug!(items = snapshot.len(), "loaded cart snapshot");
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &[LineItem]) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(
            CART_STORAGE_KEY.to_string(),
            serde_json::to_string(snapshot)?,
        );
        self.write_map(&map)?;
        debug!(items = snapshot.len(), path = %self.path.display(), "saved cart snapshot");
        Ok(())
    }
}

/// In-memory storage, a substitute for [`JsonFileStorage`] in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Option<Vec<LineItem>>>,
}

impl MemoryStorage {
    /// Create empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create in-memory storage pre-seeded with a snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: Vec<LineItem>) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
        }
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<LineItem>>, StorageError> {
        let guard = self
            .snapshot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &[LineItem]) -> Result<(), StorageError> {
        let mut guard = self
            .snapshot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(snapshot.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rocket_cart_core::{Product, ProductId};
    use rust_decimal::Decimal;

    fn item(id: i64, amount: u32) -> LineItem {
        LineItem {
            product: Product {
                id: ProductId::new(id),
                name: format!("Shoe {id}"),
                price: Decimal::new(9950, 2),
                image_url: format!("https://cdn.example.com/{id}.jpg"),
            },
            amount,
        }
    }

    #[test]
    fn test_file_storage_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_roundtrip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        let snapshot = vec![item(2, 3), item(1, 1)];
        storage.save(&snapshot).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_file_storage_uses_single_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        let storage = JsonFileStorage::new(&path);

        storage.save(&[item(1, 2)]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let map: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(CART_STORAGE_KEY));

        // The value is itself a serialized sequence, local-storage style.
        let inner: Vec<LineItem> =
            serde_json::from_str(map.get(CART_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(inner, vec![item(1, 2)]);
    }

    #[test]
    fn test_file_storage_save_replaces_previous() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        storage.save(&[item(1, 1), item(2, 2)]).unwrap();
        storage.save(&[item(2, 5)]).unwrap();

        assert_eq!(storage.load().unwrap().unwrap(), vec![item(2, 5)]);
    }

    #[test]
    fn test_file_storage_corrupt_snapshot_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, "not json").unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(matches!(storage.load(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());

        storage.save(&[item(3, 1)]).unwrap();
        assert_eq!(storage.load().unwrap().unwrap(), vec![item(3, 1)]);
    }
}
