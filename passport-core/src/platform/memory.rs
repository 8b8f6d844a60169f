//! In-memory box store.
//!
//! Used by unit and integration tests and by hosts that keep boxes in a
//! process-local cache. Nothing is persisted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::defaults::MAX_BOX_SIZE;

use super::{BoxStore, StorageError, StorageResult};

/// In-memory box store backed by a `HashMap`.
///
/// Thread-safe; reads share the lock and writes take it exclusively.
#[derive(Debug)]
pub struct MemoryBoxStore {
    /// Box values keyed by raw key bytes.
    boxes: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
    /// Largest accepted value, `None` for unbounded.
    max_box_size: Option<usize>,
    /// Number of successful `put` calls.
    put_count: AtomicU64,
}

impl MemoryBoxStore {
    /// Creates an empty store limited to [`MAX_BOX_SIZE`] bytes per box.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(Some(MAX_BOX_SIZE))
    }

    /// Creates an empty store with a custom per-box size limit.
    #[must_use]
    pub fn with_max_box_size(limit: usize) -> Self {
        Self::with_limit(Some(limit))
    }

    /// Creates an empty store without a size limit.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::with_limit(None)
    }

    fn with_limit(max_box_size: Option<usize>) -> Self {
        Self {
            boxes: RwLock::new(HashMap::new()),
            max_box_size,
            put_count: AtomicU64::new(0),
        }
    }

    /// Returns the number of stored boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.read_guard()?.len())
    }

    /// Returns `true` if no boxes are stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.read_guard()?.is_empty())
    }

    /// Returns all stored keys, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn keys(&self) -> StorageResult<Vec<Vec<u8>>> {
        Ok(self.read_guard()?.keys().cloned().collect())
    }

    /// Returns how many writes have been committed since creation.
    #[must_use]
    pub fn put_count(&self) -> u64 {
        self.put_count.load(Ordering::SeqCst)
    }

    fn read_guard(
        &self,
    ) -> StorageResult<std::sync::RwLockReadGuard<'_, HashMap<Vec<u8>, Vec<u8>>>> {
        self.boxes
            .read()
            .map_err(|err| StorageError::Poisoned(err.to_string()))
    }
}

impl Default for MemoryBoxStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxStore for MemoryBoxStore {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.read_guard()?.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        if let Some(limit) = self.max_box_size {
            if value.len() > limit {
                return Err(StorageError::BoxTooLarge {
                    size: value.len(),
                    limit,
                });
            }
        }
        self.boxes
            .write()
            .map_err(|err| StorageError::Poisoned(err.to_string()))?
            .insert(key.to_vec(), value.to_vec());
        self.put_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> StorageResult<bool> {
        Ok(self.read_guard()?.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_box() {
        let store = MemoryBoxStore::new();
        assert_eq!(store.get(b"missing").expect("get"), None);
        assert!(!store.exists(b"missing").expect("exists"));
        assert!(store.is_empty().expect("is_empty"));
    }

    #[test]
    fn test_put_replaces_value() {
        let store = MemoryBoxStore::new();
        store.put(b"k", b"first").expect("put");
        store.put(b"k", b"second").expect("put");
        assert_eq!(store.get(b"k").expect("get"), Some(b"second".to_vec()));
        assert_eq!(store.len().expect("len"), 1);
        assert_eq!(store.put_count(), 2);
    }

    #[test]
    fn test_empty_value_still_exists() {
        let store = MemoryBoxStore::new();
        store.put(b"k", b"").expect("put");
        assert!(store.exists(b"k").expect("exists"));
        assert_eq!(store.get(b"k").expect("get"), Some(Vec::new()));
    }

    #[test]
    fn test_size_limit_rejects_without_writing() {
        let store = MemoryBoxStore::with_max_box_size(4);
        store.put(b"k", b"abcd").expect("put at limit");
        match store.put(b"k", b"abcde") {
            Err(StorageError::BoxTooLarge { size, limit }) => {
                assert_eq!(size, 5);
                assert_eq!(limit, 4);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(store.get(b"k").expect("get"), Some(b"abcd".to_vec()));
        assert_eq!(store.put_count(), 1);
    }

    #[test]
    fn test_unbounded_accepts_large_values() {
        let store = MemoryBoxStore::unbounded();
        let value = vec![7u8; MAX_BOX_SIZE + 1];
        store.put(b"k", &value).expect("put");
        assert_eq!(store.keys().expect("keys"), vec![b"k".to_vec()]);
    }
}
