//! Box store trait for whole-record key-value access.
//!
//! A box is a single byte-string value addressed by a byte-string key. The
//! substrate only supports whole-value reads and writes; there is no partial
//! update and no delete.

use super::StorageResult;

/// Key-value substrate holding credential records.
///
/// Implementations MUST make `put` atomic: a concurrent or subsequent `get`
/// sees either the complete old value or the complete new value.
///
/// # Naming Convention
///
/// Keys are produced by [`derive_key`](crate::credentials::derive_key):
/// `credentials-` followed by the 8-byte big-endian asset id.
pub trait BoxStore: Send + Sync {
    /// Reads the box at `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` if the box exists
    /// - `Ok(None)` if the box does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails (e.g., I/O error, poisoned lock).
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Creates or replaces the box at `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or `value` exceeds the substrate's
    /// size limit. On error the previous value is left untouched.
    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Checks if a box exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read operation fails.
    fn exists(&self, key: &[u8]) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
