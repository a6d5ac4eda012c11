//! Content errors.

use std::path::{Path, PathBuf};

use chai_renderer::TitleError;
use chai_storage::StorageError;

/// Error raised while building a group from the content repository.
///
/// Every variant names the file or directory at fault.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A document that must carry a title is empty.
    #[error("missing title: {} is empty", path.display())]
    MissingTitle {
        /// Document path.
        path: PathBuf,
    },
    /// A document's first line is not a `# Title` heading.
    #[error("malformed title in {}: {reason} (line: {line:?})", path.display())]
    MalformedTitle {
        /// Document path.
        path: PathBuf,
        /// The offending first line.
        line: String,
        /// Rule the line breaks.
        #[source]
        reason: TitleError,
    },
    /// `titles.txt` has no line for a chapter.
    #[error("{} has no title for chapter {chapter}", path.display())]
    MissingChapterTitle {
        /// Path of the titles file.
        path: PathBuf,
        /// Chapter ordinal without a title.
        chapter: u32,
    },
    /// Ordinals in a directory don't run `1..=n`.
    #[error("ordinals in {} are not contiguous: expected {expected}, found {found}", path.display())]
    OrdinalGap {
        /// Directory holding the numbered entries.
        path: PathBuf,
        /// Ordinal that should have come next.
        expected: u32,
        /// Ordinal that was found instead.
        found: u32,
    },
    /// A chapter directory contains no sections.
    #[error("chapter has no sections: {}", path.display())]
    EmptyChapter {
        /// Chapter directory.
        path: PathBuf,
    },
    /// The content repository could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Storage {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
}

impl ContentError {
    /// Path of the file or directory at fault.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::MissingTitle { path }
            | Self::MalformedTitle { path, .. }
            | Self::MissingChapterTitle { path, .. }
            | Self::OrdinalGap { path, .. }
            | Self::EmptyChapter { path }
            | Self::Storage { path, .. } => path,
        }
    }

    /// True if the error means a requested document does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage { source, .. } if source.is_not_found())
    }

    pub(crate) fn storage(path: &Path) -> impl FnOnce(StorageError) -> Self + '_ {
        move |source| Self::Storage {
            path: path.to_path_buf(),
            source,
        }
    }
}
