//! File system-backed box store.
//!
//! Each box is one file inside a directory, named after the lowercase hex
//! encoding of its key. Writes follow the write-to-temp-then-rename pattern:
//!
//! 1. Write data to `.{name}.tmp` in the same directory
//! 2. `fsync` the temporary file
//! 3. Rename the temporary file over the target
//! 4. `fsync` the directory (unix only)
//!
//! Readers always see either the old value or the new value, never a partial
//! write.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{BoxStore, StorageError, StorageResult};

/// Directory-backed implementation of [`BoxStore`].
///
/// # Example
///
/// ```no_run
/// use passport_core::platform::{BoxStore, FileBoxStore};
///
/// let store = FileBoxStore::new("/tmp/passport-boxes")?;
/// store.put(b"credentials-key", b"value")?;
/// assert_eq!(store.get(b"credentials-key")?, Some(b"value".to_vec()));
/// # Ok::<(), passport_core::platform::StorageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileBoxStore {
    /// Directory path where boxes are stored.
    directory: PathBuf,
    /// Largest accepted value, `None` for unbounded.
    max_box_size: Option<usize>,
}

impl FileBoxStore {
    /// Opens a store rooted at `directory`, creating it if needed.
    ///
    /// No size limit is applied; see [`FileBoxStore::with_max_box_size`].
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(directory: P) -> StorageResult<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory).map_err(|e| {
            StorageError::io(
                format!(
                    "failed to create box store directory '{}'",
                    directory.display()
                ),
                e,
            )
        })?;
        Ok(Self {
            directory,
            max_box_size: None,
        })
    }

    /// Applies a per-box size limit to subsequent writes.
    #[must_use]
    pub const fn with_max_box_size(mut self, limit: usize) -> Self {
        self.max_box_size = Some(limit);
        self
    }

    /// Returns the directory holding the boxes.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn box_path(&self, key: &[u8]) -> StorageResult<PathBuf> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("empty key".to_string()));
        }
        Ok(self.directory.join(hex::encode(key)))
    }

    fn temp_path(&self, key: &[u8]) -> PathBuf {
        self.directory.join(format!(".{}.tmp", hex::encode(key)))
    }

    #[cfg(unix)]
    fn sync_directory(&self) -> StorageResult<()> {
        File::open(&self.directory)
            .and_then(|dir| dir.sync_all())
            .map_err(|e| {
                StorageError::io(
                    format!("failed to sync directory '{}'", self.directory.display()),
                    e,
                )
            })
    }

    #[cfg(not(unix))]
    #[allow(clippy::unnecessary_wraps, clippy::unused_self)]
    fn sync_directory(&self) -> StorageResult<()> {
        // Rename is atomic on the supported non-unix file systems; directory
        // handles cannot be synced there.
        Ok(())
    }
}

/// Creates `path`, writes `value` and syncs it to disk.
fn write_temp(path: &Path, value: &[u8]) -> StorageResult<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            StorageError::io(
                format!("failed to create temporary file '{}'", path.display()),
                e,
            )
        })?;
    file.write_all(value).map_err(|e| {
        StorageError::io(
            format!("failed to write temporary file '{}'", path.display()),
            e,
        )
    })?;
    file.sync_all().map_err(|e| {
        StorageError::io(
            format!("failed to sync temporary file '{}'", path.display()),
            e,
        )
    })
}

impl BoxStore for FileBoxStore {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        let path = self.box_path(key)?;
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(
                format!("failed to read box '{}'", path.display()),
                e,
            )),
        }
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

        let final_path = self.box_path(key)?;
        let temp_path = self.temp_path(key);

        let committed = write_temp(&temp_path, value).and_then(|()| {
            fs::rename(&temp_path, &final_path).map_err(|e| {
                StorageError::io(
                    format!("failed to rename into '{}'", final_path.display()),
                    e,
                )
            })
        });
        if committed.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        committed?;

        self.sync_directory()
    }

    fn exists(&self, key: &[u8]) -> StorageResult<bool> {
        let path = self.box_path(key)?;
        path.try_exists().map_err(|e| {
            StorageError::io(format!("failed to stat box '{}'", path.display()), e)
        })
    }
}
