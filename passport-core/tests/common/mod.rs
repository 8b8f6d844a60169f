//! Common test utilities shared across integration tests.

// Each integration test binary compiles its own copy of this module and uses
// a different subset of it.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use passport_core::credentials::{CredentialStore, EntityId};
use passport_core::platform::{BoxStore, MemoryBoxStore, StorageError, StorageResult};

/// Box store that counts every access and can be told to fail writes.
#[derive(Default)]
pub struct RecordingBoxStore {
    inner: MemoryBoxStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl RecordingBoxStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl BoxStore for RecordingBoxStore {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                context: "injected write failure".to_string(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, value)
    }

    fn exists(&self, key: &[u8]) -> StorageResult<bool> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(key)
    }
}

/// Store over a fresh recording substrate.
pub fn recording_store() -> (Arc<RecordingBoxStore>, CredentialStore) {
    let boxes = RecordingBoxStore::new();
    let store = CredentialStore::new(boxes.clone());
    (boxes, store)
}

/// Entries of `asset` as UTF-8 strings.
pub fn texts(store: &CredentialStore, asset: EntityId) -> Vec<String> {
    store
        .read(asset)
        .expect("read")
        .iter()
        .map(|entry| entry.as_str().expect("utf8 entry").to_string())
        .collect()
}
