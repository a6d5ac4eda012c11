//! Content repository abstraction for the Chai website.
//!
//! This crate provides a [`Storage`] trait for abstracting access to the
//! content tree (markdown sources, sidecar title files, stylesheets and their
//! compiled outputs). This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Deterministic staleness checks** through a controllable mtime clock
//! - **Clean separation** between navigation logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `list()`, `read()`, `exists()`, `mtime()` and `write()`
//! - [`FsStorage`] implementation rooted at a directory on disk
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use chai_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("content"));
//! for entry in storage.list(Path::new("book"))? {
//!     println!("{} (dir: {})", entry.name, entry.is_dir);
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Entry, Storage, StorageError, StorageErrorKind};
