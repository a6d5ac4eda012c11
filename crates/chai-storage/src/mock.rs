//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{Entry, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

#[derive(Clone, Debug)]
struct MockFile {
    path: PathBuf,
    content: String,
    mtime: f64,
}

/// Mock storage for testing.
///
/// Stores files in memory, in insertion order. Directories are implied by
/// file paths. [`Storage::list`] returns entries in the order their first
/// file was inserted, so tests can exercise consumers against unsorted
/// listings.
///
/// Every file carries an mtime. Files added with [`with_file`](Self::with_file)
/// and files written through [`Storage::write`] take the current value of the
/// mock clock; [`with_mtime`](Self::with_mtime) overrides it explicitly.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use chai_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("book/index.md", "# The Book")
///     .with_mtime("book/index.md", 100.0);
///
/// let content = storage.read(Path::new("book/index.md")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<Vec<MockFile>>,
    clock: RwLock<f64>,
}

impl MockStorage {
    /// Create a new empty mock storage with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file stamped with the current clock value.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let mtime = *self.clock.read().unwrap();
        self.insert(path.into(), content.into(), mtime);
        self
    }

    /// Set modification time for an existing file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned or the file was never added.
    #[must_use]
    pub fn with_mtime(self, path: impl Into<PathBuf>, mtime: f64) -> Self {
        let path = path.into();
        {
            let mut files = self.files.write().unwrap();
            let file = files
                .iter_mut()
                .find(|f| f.path == path)
                .expect("with_mtime called for a file that was never added");
            file.mtime = mtime;
        }
        self
    }

    /// Set the mock clock used to stamp subsequent writes.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_clock(self, now: f64) -> Self {
        self.set_clock(now);
        self
    }

    /// Move the mock clock.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_clock(&self, now: f64) {
        *self.clock.write().unwrap() = now;
    }

    /// Insert or replace a file, keeping its original position on replace.
    fn insert(&self, path: PathBuf, content: String, mtime: f64) {
        let mut files = self.files.write().unwrap();
        if let Some(existing) = files.iter_mut().find(|f| f.path == path) {
            existing.content = content;
            existing.mtime = mtime;
        } else {
            files.push(MockFile {
                path,
                content,
                mtime,
            });
        }
    }

    fn not_found(path: &Path) -> StorageError {
        StorageError::new(StorageErrorKind::NotFound)
            .with_path(path)
            .with_backend(BACKEND)
    }

    fn lookup<T>(&self, path: &Path, f: impl FnOnce(&MockFile) -> T) -> Result<T, StorageError> {
        self.files
            .read()
            .unwrap()
            .iter()
            .find(|file| file.path == path)
            .map(f)
            .ok_or_else(|| Self::not_found(path))
    }
}

impl Storage for MockStorage {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, StorageError> {
        let files = self.files.read().unwrap();
        let mut entries: Vec<Entry> = Vec::new();

        for file in files.iter() {
            let Ok(rest) = file.path.strip_prefix(dir) else {
                continue;
            };
            let mut components = rest.components();
            let Some(Component::Normal(first)) = components.next() else {
                continue;
            };
            let name = first.to_string_lossy().into_owned();
            let is_dir = components.next().is_some();
            if !entries.iter().any(|e| e.name == name) {
                entries.push(Entry { name, is_dir });
            }
        }

        if entries.is_empty() {
            return Err(Self::not_found(dir));
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        self.lookup(path, |f| f.content.clone())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lookup(path, |_| ()).is_ok()
    }

    fn mtime(&self, path: &Path) -> Result<f64, StorageError> {
        self.lookup(path, |f| f.mtime)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        let now = *self.clock.read().unwrap();
        self.insert(path.to_path_buf(), contents.to_owned(), now);
        Ok(())
    }
}
