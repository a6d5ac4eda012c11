//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading and writing content under a root
//! directory on the local filesystem.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::storage::{Entry, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// All paths are resolved relative to `root`. Paths that would escape the
/// root are rejected with [`StorageErrorKind::InvalidPath`].
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use chai_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("content"));
/// let index = storage.read(Path::new("book/index.md"))?;
/// ```
#[derive(Debug)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of this storage.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path against the root.
    ///
    /// Rejects absolute paths and paths containing parent directory
    /// components (`..`) to prevent path traversal (e.g., `../../etc/passwd`).
    fn resolve(&self, path: &Path) -> Result<PathBuf, StorageError> {
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(self.root.join(path))
    }

    fn io_error(err: std::io::Error, path: &Path) -> StorageError {
        StorageError::io(err, Some(path.to_path_buf())).with_backend(BACKEND)
    }
}

impl Storage for FsStorage {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, StorageError> {
        let full = self.resolve(dir)?;
        let read_dir = fs::read_dir(&full).map_err(|e| Self::io_error(e, dir))?;

        let mut entries = Vec::new();
        for item in read_dir {
            let item = item.map_err(|e| Self::io_error(e, dir))?;
            let file_type = item.file_type().map_err(|e| Self::io_error(e, dir))?;
            let Some(name) = item.file_name().to_str().map(str::to_owned) else {
                tracing::warn!(dir = %dir.display(), "Skipping entry with non UTF-8 name");
                continue;
            };
            entries.push(Entry {
                name,
                is_dir: file_type.is_dir(),
            });
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        let full = self.resolve(path)?;
        fs::read_to_string(&full).map_err(|e| Self::io_error(e, path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_ok_and(|full| full.is_file())
    }

    fn mtime(&self, path: &Path) -> Result<f64, StorageError> {
        let full = self.resolve(path)?;
        let modified = fs::metadata(&full)
            .and_then(|m| m.modified())
            .map_err(|e| Self::io_error(e, path))?;

        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::io_error(e, path))?;
        }
        // Stage beside the target and rename into place.
        let parent = full.parent().unwrap_or_else(|| Path::new("."));
        let mut staged =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| Self::io_error(e, path))?;
        staged
            .write_all(contents.as_bytes())
            .map_err(|e| Self::io_error(e, path))?;
        staged
            .persist(&full)
            .map_err(|e| Self::io_error(e.error, path))?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
        Ok(())
    }
}
