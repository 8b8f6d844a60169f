//! Credential store facade over a box store.
//!
//! Every mutation is one read-modify-write cycle on the asset's box: read the
//! whole record, edit it in memory, write the whole record back. Validation
//! happens before the write and each operation writes at most once, so a
//! rejected call never changes the stored bytes.

use std::sync::Arc;

use crate::platform::BoxStore;

use super::codec;
use super::error::{CredentialError, CredentialResult};
use super::keys::derive_key;
use super::types::{CredentialEntry, CredentialList, EntityId, StorageKey};

/// Per-asset credential lists stored one record per box.
#[derive(Clone)]
pub struct CredentialStore {
    boxes: Arc<dyn BoxStore>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Creates a store over the given substrate.
    #[must_use]
    pub fn new(boxes: Arc<dyn BoxStore>) -> Self {
        Self { boxes }
    }

    /// Returns the key of the box backing `entity_id`.
    #[must_use]
    pub fn key(&self, entity_id: EntityId) -> StorageKey {
        derive_key(entity_id)
    }

    /// Returns whether a record exists for `entity_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the box store fails.
    pub fn exists(&self, entity_id: EntityId) -> CredentialResult<bool> {
        Ok(self.boxes.exists(derive_key(entity_id).as_bytes())?)
    }

    /// Appends `entry` to the end of the asset's list, creating the record on
    /// first use.
    ///
    /// The existing record is not decoded: the new frame is concatenated onto
    /// it.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be framed or the box store rejects
    /// the write (for example, because the record outgrew the box size limit).
    pub fn add(&self, entity_id: EntityId, entry: &CredentialEntry) -> CredentialResult<()> {
        let key = derive_key(entity_id);
        let frame = codec::encode_entry(entry)?;

        let record = match self.boxes.get(key.as_bytes())? {
            Some(mut existing) => {
                existing.extend_from_slice(&frame);
                existing
            }
            None => {
                log::debug!("creating credential record for asset {entity_id}");
                frame
            }
        };

        self.boxes.put(key.as_bytes(), &record)?;
        log::info!(
            "appended credential to asset {entity_id} (key {key}, record {} bytes)",
            record.len()
        );
        Ok(())
    }

    /// Succeeds if a record exists for `entity_id`, including one holding an
    /// empty list.
    ///
    /// This is an existence gate; use [`CredentialStore::read`] to fetch the
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NotFound`] if no record exists.
    pub fn view(&self, entity_id: EntityId) -> CredentialResult<()> {
        if self.exists(entity_id)? {
            Ok(())
        } else {
            log::debug!("view rejected: no record for asset {entity_id}");
            Err(CredentialError::NotFound { entity_id })
        }
    }

    /// Returns the decoded entries of `entity_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NotFound`] if no record exists or
    /// [`CredentialError::Decode`] if the record is malformed.
    pub fn read(&self, entity_id: EntityId) -> CredentialResult<CredentialList> {
        let record = self.load(entity_id)?;
        codec::decode(&record)
    }

    /// Returns the raw record bytes of `entity_id`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the box store fails.
    pub fn read_raw(&self, entity_id: EntityId) -> CredentialResult<Option<Vec<u8>>> {
        Ok(self.boxes.get(derive_key(entity_id).as_bytes())?)
    }

    /// Replaces the entry at `index` with `new_entry`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NotFound`] if no record exists,
    /// [`CredentialError::IndexOutOfRange`] if `index` is not below the list
    /// length, or a decode/storage error.
    pub fn modify(
        &self,
        entity_id: EntityId,
        index: u64,
        new_entry: CredentialEntry,
    ) -> CredentialResult<()> {
        self.rewrite(entity_id, "modify", |list| {
            list.replace(index, new_entry).map(drop)
        })?;
        log::info!("replaced credential {index} of asset {entity_id}");
        Ok(())
    }

    /// Removes the entry at `index`; later entries shift down by one.
    ///
    /// Removing the last entry leaves an empty record in place.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NotFound`] if no record exists,
    /// [`CredentialError::IndexOutOfRange`] if `index` is not below the list
    /// length, or a decode/storage error.
    pub fn delete(&self, entity_id: EntityId, index: u64) -> CredentialResult<()> {
        let remaining = self.rewrite(entity_id, "delete", |list| list.remove(index).map(drop))?;
        log::info!("deleted credential {index} of asset {entity_id}, {remaining} left");
        Ok(())
    }

    fn load(&self, entity_id: EntityId) -> CredentialResult<Vec<u8>> {
        self.boxes
            .get(derive_key(entity_id).as_bytes())?
            .ok_or(CredentialError::NotFound { entity_id })
    }

    /// Decodes the record, applies `edit`, and writes the re-encoded list
    /// back. Returns the new list length.
    fn rewrite<F>(&self, entity_id: EntityId, action: &str, edit: F) -> CredentialResult<usize>
    where
        F: FnOnce(&mut CredentialList) -> CredentialResult<()>,
    {
        let key = derive_key(entity_id);
        let result = self
            .boxes
            .get(key.as_bytes())
            .map_err(CredentialError::from)
            .and_then(|record| record.ok_or(CredentialError::NotFound { entity_id }))
            .and_then(|record| codec::decode(&record))
            .and_then(|mut list| {
                edit(&mut list)?;
                Ok(list)
            });

        let list = match result {
            Ok(list) => list,
            Err(err) => {
                log::debug!("{action} rejected for asset {entity_id}: {err}");
                return Err(err);
            }
        };

        let record = codec::encode(&list)?;
        self.boxes.put(key.as_bytes(), &record)?;
        Ok(list.len())
    }
}
