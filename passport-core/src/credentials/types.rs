//! Core types for credential boxes.

use std::fmt;

use sha2::{Digest, Sha256};

use super::error::{CredentialError, CredentialResult};

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of the asset that owns a credential list.
///
/// On Algorand this is the passport ASA id, passed as the first foreign asset
/// of the application call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Wraps a raw asset id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw asset id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the fixed-width big-endian encoding used in storage keys.
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of the box holding one asset's credential record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(Vec<u8>);

impl StorageKey {
    pub(crate) const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the key as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl AsRef<[u8]> for StorageKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// =============================================================================
// Entries
// =============================================================================

/// One opaque credential payload, typically JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CredentialEntry(Vec<u8>);

impl CredentialEntry {
    /// Wraps raw payload bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the entry, returning its payload.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// SHA-256 of the payload bytes exactly as stored, as lowercase hex.
    ///
    /// For a JSON document this is the issuing page's `hashHex`, which is
    /// computed over the serialized text before any re-encoding.
    #[must_use]
    pub fn content_hash(&self) -> String {
        hex::encode(Sha256::digest(&self.0))
    }

    /// Returns the payload as UTF-8, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for CredentialEntry {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for CredentialEntry {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<String> for CredentialEntry {
    fn from(text: String) -> Self {
        Self(text.into_bytes())
    }
}

impl From<&str> for CredentialEntry {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl AsRef<[u8]> for CredentialEntry {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// =============================================================================
// Lists
// =============================================================================

/// Ordered credential entries of one asset.
///
/// Indices are positional: removing an entry shifts every later entry down by
/// one, so an index must not be cached across a delete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CredentialList(Vec<CredentialEntry>);

impl CredentialList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CredentialEntry> {
        self.0.get(index)
    }

    /// Returns the entries as a slice.
    #[must_use]
    pub fn entries(&self) -> &[CredentialEntry] {
        &self.0
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, CredentialEntry> {
        self.0.iter()
    }

    /// Appends an entry at the end.
    pub fn push(&mut self, entry: CredentialEntry) {
        self.0.push(entry);
    }

    /// Replaces the entry at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::IndexOutOfRange`] if `index >= len`.
    pub fn replace(
        &mut self,
        index: u64,
        entry: CredentialEntry,
    ) -> CredentialResult<CredentialEntry> {
        let position = self.position(index)?;
        Ok(std::mem::replace(&mut self.0[position], entry))
    }

    /// Removes the entry at `index`, shifting later entries down.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::IndexOutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: u64) -> CredentialResult<CredentialEntry> {
        let position = self.position(index)?;
        Ok(self.0.remove(position))
    }

    fn position(&self, index: u64) -> CredentialResult<usize> {
        usize::try_from(index)
            .ok()
            .filter(|position| *position < self.0.len())
            .ok_or(CredentialError::IndexOutOfRange {
                index,
                len: self.0.len(),
            })
    }
}

impl From<Vec<CredentialEntry>> for CredentialList {
    fn from(entries: Vec<CredentialEntry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<CredentialEntry> for CredentialList {
    fn from_iter<I: IntoIterator<Item = CredentialEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for CredentialList {
    type Item = CredentialEntry;
    type IntoIter = std::vec::IntoIter<CredentialEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CredentialList {
    type Item = &'a CredentialEntry;
    type IntoIter = std::slice::Iter<'a, CredentialEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
