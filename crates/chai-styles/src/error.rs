//! Stylesheet pipeline errors.

use std::path::PathBuf;

use chai_storage::StorageError;

/// Error returned by [`StylePipeline`](crate::StylePipeline).
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// The requested path is not a relative `.scss` path inside the source root.
    #[error("invalid stylesheet path: {0}")]
    InvalidPath(String),
    /// No source file exists for the requested stylesheet.
    #[error("stylesheet not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// The compiler rejected the source.
    #[error("failed to compile {}: {message}", path.display())]
    Compile {
        /// Source path.
        path: PathBuf,
        /// Compiler diagnostic.
        message: String,
    },
    /// Reading or writing a stylesheet failed.
    #[error("stylesheet storage error for {}: {source}", path.display())]
    Storage {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
}
