//! Exercise errors.

use std::path::PathBuf;

use chai_storage::StorageError;

use crate::fetch::FetchError;
use crate::label::{ExerciseLabel, LabelError};

/// Error returned by [`ExerciseService`](crate::ExerciseService).
#[derive(Debug, thiserror::Error)]
pub enum ExerciseError {
    /// The request has no `label` parameter.
    #[error("request missing required parameter `label`")]
    MissingLabel,
    /// The label is not `<section>.<exercise>`.
    #[error(transparent)]
    InvalidLabel(#[from] LabelError),
    /// No descriptor exists for the label.
    #[error("exercise {label} not found ({})", path.display())]
    NotFound {
        /// Requested label.
        label: ExerciseLabel,
        /// Descriptor path.
        path: PathBuf,
    },
    /// The descriptor is not valid.
    #[error("malformed exercise file {}: {message}", path.display())]
    Malformed {
        /// Descriptor path.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },
    /// The solution source could not be fetched.
    #[error("failed to fetch solution for exercise {label}: {source}")]
    Upstream {
        /// Requested label.
        label: ExerciseLabel,
        /// Fetch failure.
        #[source]
        source: FetchError,
    },
    /// The descriptor could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Storage {
        /// Descriptor path.
        path: PathBuf,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
}
