//! Career Passport credential storage.
//!
//! Every passport asset owns one key-value box holding the asset's ordered
//! list of credentials. This crate derives the box key, encodes the list into
//! the box value, and implements add, view, read, modify and delete as
//! whole-record read-modify-write cycles over a pluggable [`platform::BoxStore`].
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use passport_core::credentials::{CredentialStore, EntityId};
//! use passport_core::platform::MemoryBoxStore;
//!
//! let store = CredentialStore::new(Arc::new(MemoryBoxStore::new()));
//! let asset = EntityId::new(744_102_318);
//!
//! store.add(asset, &r#"{"type":"employment"}"#.into())?;
//! store.add(asset, &r#"{"type":"education"}"#.into())?;
//! store.delete(asset, 0)?;
//!
//! assert_eq!(store.read(asset)?.len(), 1);
//! # Ok::<(), passport_core::credentials::CredentialError>(())
//! ```
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod credentials;
pub mod defaults;
pub mod dispatch;
pub mod platform;
pub mod vid;

/// Bridge from the `log` facade to a host-provided logger.
pub mod logger;

pub use credentials::{
    CredentialEntry, CredentialError, CredentialList, CredentialResult, CredentialStore,
    EntityId, StorageKey,
};
pub use dispatch::{Call, Dispatcher, Operation, Outcome};
