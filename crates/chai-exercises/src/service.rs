//! Exercise lookup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chai_storage::Storage;
use serde_json::{Map, Value};

use crate::error::ExerciseError;
use crate::fetch::SolutionFetcher;
use crate::label::ExerciseLabel;

/// Default directory of exercise descriptors in the content store.
pub const DEFAULT_EXERCISES_DIR: &str = "guide/exercises";

/// Loads exercise descriptors and fills in remote solution sources.
///
/// A descriptor is a JSON object with a `solution` object. When the solution
/// has a `url`, the file it names is fetched and stored as `solution.src`.
pub struct ExerciseService {
    storage: Arc<dyn Storage>,
    dir: PathBuf,
    fetcher: Arc<dyn SolutionFetcher>,
}

impl ExerciseService {
    /// Create a service reading descriptors from `dir` in `storage`.
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        dir: impl Into<PathBuf>,
        fetcher: Arc<dyn SolutionFetcher>,
    ) -> Self {
        Self {
            storage,
            dir: dir.into(),
            fetcher,
        }
    }

    /// Parse a raw `label` query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ExerciseError::MissingLabel`] or [`ExerciseError::InvalidLabel`].
    pub fn parse_label(raw: Option<&str>) -> Result<ExerciseLabel, ExerciseError> {
        let raw = raw.ok_or(ExerciseError::MissingLabel)?;
        Ok(raw.parse()?)
    }

    /// Load the exercise `label`, fetching its solution source if referenced.
    ///
    /// Blocks while the solution is fetched.
    ///
    /// # Errors
    ///
    /// Returns [`ExerciseError`] if the descriptor is missing or malformed,
    /// or the solution can't be fetched.
    pub fn exercise(&self, label: ExerciseLabel) -> Result<Value, ExerciseError> {
        let path = self.dir.join(label.file_name());
        let raw = self.storage.read(&path).map_err(|source| {
            if source.is_not_found() {
                ExerciseError::NotFound {
                    label,
                    path: path.clone(),
                }
            } else {
                ExerciseError::Storage {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let mut document: Value =
            serde_json::from_str(&raw).map_err(|err| malformed(&path, err.to_string()))?;
        let solution = solution_mut(&mut document, &path)?;

        if let Some(url) = solution_url(solution, &path)? {
            let src = self
                .fetcher
                .fetch(&url)
                .map_err(|source| ExerciseError::Upstream { label, source })?;
            solution.insert("src".to_owned(), Value::String(src));
            tracing::debug!(%label, url = %url, "Fetched exercise solution");
        }

        Ok(document)
    }
}

fn solution_mut<'a>(
    document: &'a mut Value,
    path: &Path,
) -> Result<&'a mut Map<String, Value>, ExerciseError> {
    let Some(object) = document.as_object_mut() else {
        return Err(malformed(path, "descriptor is not a JSON object"));
    };
    object
        .get_mut("solution")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| malformed(path, "`solution` must be an object"))
}

fn solution_url(solution: &Map<String, Value>, path: &Path) -> Result<Option<String>, ExerciseError> {
    match solution.get("url") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(url)) => Ok(Some(url.clone())),
        Some(_) => Err(malformed(path, "`solution.url` must be a string")),
    }
}

fn malformed(path: &Path, message: impl Into<String>) -> ExerciseError {
    ExerciseError::Malformed {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chai_storage::MockStorage;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::fetch::FetchError;

    /// Returns canned sources and records requested paths.
    #[derive(Default)]
    struct FakeFetcher {
        requested: Mutex<Vec<String>>,
        fail: bool,
    }

    impl SolutionFetcher for FakeFetcher {
        fn fetch(&self, path: &str) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(path.to_owned());
            if self.fail {
                return Err(FetchError::Status {
                    url: format!("https://example.com/{path}"),
                    status: 503,
                });
            }
            Ok(format!("// source of {path}"))
        }
    }

    fn label(section: u32, exercise: u32) -> ExerciseLabel {
        ExerciseLabel { section, exercise }
    }

    fn service(storage: MockStorage, fetcher: Arc<FakeFetcher>) -> ExerciseService {
        ExerciseService::new(Arc::new(storage), DEFAULT_EXERCISES_DIR, fetcher)
    }

    #[test]
    fn test_exercise_with_remote_solution() {
        let storage = MockStorage::new().with_file(
            "guide/exercises/e1_2.json",
            r#"{"prompt": "Print 5", "solution": {"url": "e1_2/main.chai"}}"#,
        );
        let fetcher = Arc::new(FakeFetcher::default());
        let service = service(storage, Arc::clone(&fetcher));

        let exercise = service.exercise(label(1, 2)).unwrap();

        assert_eq!(
            exercise,
            json!({
                "prompt": "Print 5",
                "solution": {
                    "url": "e1_2/main.chai",
                    "src": "// source of e1_2/main.chai"
                }
            })
        );
        assert_eq!(*fetcher.requested.lock().unwrap(), vec!["e1_2/main.chai"]);
    }

    #[test]
    fn test_exercise_without_url_is_not_fetched() {
        let storage = MockStorage::new().with_file(
            "guide/exercises/e2_1.json",
            r#"{"solution": {"src": "inline"}}"#,
        );
        let fetcher = Arc::new(FakeFetcher::default());
        let service = service(storage, Arc::clone(&fetcher));

        let exercise = service.exercise(label(2, 1)).unwrap();

        assert_eq!(exercise, json!({ "solution": { "src": "inline" } }));
        assert!(fetcher.requested.lock().unwrap().is_empty());
    }

    #[test]
    fn test_exercise_not_found() {
        let service = service(MockStorage::new(), Arc::new(FakeFetcher::default()));

        let err = service.exercise(label(9, 9)).unwrap_err();

        assert!(matches!(err, ExerciseError::NotFound { path, .. } if path == Path::new("guide/exercises/e9_9.json")));
    }

    #[test]
    fn test_exercise_invalid_json() {
        let storage = MockStorage::new().with_file("guide/exercises/e1_1.json", "{ not json");
        let service = service(storage, Arc::new(FakeFetcher::default()));

        let err = service.exercise(label(1, 1)).unwrap_err();

        assert!(matches!(err, ExerciseError::Malformed { .. }));
    }

    #[test]
    fn test_exercise_solution_must_be_object() {
        for body in ["[1, 2]", r#"{"prompt": "x"}"#, r#"{"solution": "x"}"#] {
            let storage = MockStorage::new().with_file("guide/exercises/e1_1.json", body);
            let service = service(storage, Arc::new(FakeFetcher::default()));

            let err = service.exercise(label(1, 1)).unwrap_err();

            assert!(matches!(err, ExerciseError::Malformed { .. }), "{body}");
        }
    }

    #[test]
    fn test_exercise_url_must_be_string() {
        let storage = MockStorage::new().with_file(
            "guide/exercises/e1_1.json",
            r#"{"solution": {"url": 42}}"#,
        );
        let service = service(storage, Arc::new(FakeFetcher::default()));

        let err = service.exercise(label(1, 1)).unwrap_err();

        assert!(err.to_string().contains("`solution.url` must be a string"));
    }

    #[test]
    fn test_exercise_upstream_failure() {
        let storage = MockStorage::new().with_file(
            "guide/exercises/e1_1.json",
            r#"{"solution": {"url": "e1_1.chai"}}"#,
        );
        let fetcher = Arc::new(FakeFetcher {
            fail: true,
            ..FakeFetcher::default()
        });
        let service = service(storage, fetcher);

        let err = service.exercise(label(1, 1)).unwrap_err();

        assert!(matches!(
            err,
            ExerciseError::Upstream {
                source: FetchError::Status { status: 503, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(
            ExerciseService::parse_label(Some("4.1")).unwrap(),
            label(4, 1)
        );
        assert!(matches!(
            ExerciseService::parse_label(None),
            Err(ExerciseError::MissingLabel)
        ));
        assert!(matches!(
            ExerciseService::parse_label(Some("four")),
            Err(ExerciseError::InvalidLabel(_))
        ));
    }
}
