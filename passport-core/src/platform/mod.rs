//! Persistence substrates for credential boxes.
//!
//! The credential store depends on a single platform capability, a
//! whole-record key-value store:
//!
//! - [`BoxStore`]: `get`, `put` and `exists` on byte-string keys
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryBoxStore`]: process-local map, used by tests and caches
//! - [`FileBoxStore`]: one file per box with atomic rename, used by the CLI
//!
//! Hosts that keep boxes elsewhere (an Algorand node, a database) implement
//! [`BoxStore`] themselves.

mod box_store;
mod error;
mod file;
mod memory;

pub use box_store::BoxStore;
pub use error::{StorageError, StorageResult};
pub use file::FileBoxStore;
pub use memory::MemoryBoxStore;
