//! Career Passport credential boxes.
//!
//! Each passport asset owns one box holding an ordered list of credential
//! entries (typically JSON documents). The box store only supports whole
//! values, so every edit rewrites the full record.
//!
//! # Architecture
//!
//! 1. **Key derivation** ([`derive_key`]): `"credentials-"` followed by the
//!    big-endian asset id.
//! 2. **Record codec** ([`codec`]): length-prefixed frames, one per entry.
//! 3. **Store** ([`CredentialStore`]): existence checks, index validation and
//!    the read-modify-write cycle for add, view, read, modify and delete.
//!
//! Typed employment and education documents live in [`documents`]; they are
//! a convenience for producing entries and are never validated by the store.

pub mod codec;
pub mod documents;
mod error;
mod keys;
mod store;
mod types;

pub use error::{CredentialError, CredentialResult};
pub use keys::{derive_key, KEY_LEN};
pub use store::CredentialStore;
pub use types::{CredentialEntry, CredentialList, EntityId, StorageKey};
