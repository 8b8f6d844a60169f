//! Error types for credential box operations.

use thiserror::Error;

use super::types::EntityId;
use crate::platform::StorageError;

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Reasons a credential operation is rejected.
///
/// Every variant is raised before the operation's single write, so a rejected
/// call leaves the stored record untouched.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Wrong number of arguments for the named operation.
    #[error("{operation} expects {expected} argument(s), got {found}")]
    ArgumentCount {
        /// Wire name of the operation.
        operation: &'static str,
        /// Arguments the operation takes, excluding its name.
        expected: usize,
        /// Arguments supplied.
        found: usize,
    },

    /// No credential record exists for the asset.
    #[error("no credentials stored for asset {entity_id}")]
    NotFound {
        /// Asset whose record is missing.
        entity_id: EntityId,
    },

    /// Index does not address an entry of the list.
    #[error("index {index} out of range for {len} credential(s)")]
    IndexOutOfRange {
        /// Requested index.
        index: u64,
        /// Length of the stored list.
        len: usize,
    },

    /// Operation name is not one of the recognized operations.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Index argument is not a big-endian integer of at most 8 bytes.
    #[error("invalid index argument: {0}")]
    InvalidIndex(String),

    /// Stored record is malformed.
    #[error("cannot decode credential record: {0}")]
    Decode(String),

    /// Entry is too long to be framed.
    #[error("credential entry of {len} bytes exceeds the frame limit")]
    EntryTooLarge {
        /// Length of the rejected entry.
        len: usize,
    },

    /// Typed credential document could not be converted.
    #[error("credential document error: {0}")]
    Document(String),

    /// The box store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
