//! Guide exercises for the Chai website.
//!
//! Exercises are JSON descriptors named `e<section>_<exercise>.json` in the
//! content store. A descriptor's solution may point at a file in the
//! language's source repository; [`ExerciseService`] fetches that file
//! through a [`SolutionFetcher`] and embeds it before the descriptor is
//! returned to the browser.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use chai_exercises::{ExerciseService, HttpFetcher};
//!
//! let fetcher = HttpFetcher::new(
//!     "https://raw.githubusercontent.com/ComedicChimera/chai/main/tests/suites/exercises/",
//!     Duration::from_secs(30),
//! );
//! let service = ExerciseService::new(storage, "guide/exercises", Arc::new(fetcher));
//! let exercise = service.exercise("1.2".parse()?)?;
//! ```

mod error;
mod fetch;
mod label;
mod service;

pub use error::ExerciseError;
pub use fetch::{DEFAULT_TIMEOUT_SECS, FetchError, HttpFetcher, SolutionFetcher};
pub use label::{ExerciseLabel, LabelError};
pub use service::{DEFAULT_EXERCISES_DIR, ExerciseService};
