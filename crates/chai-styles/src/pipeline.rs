//! On-demand compilation with a staleness check.
//!
//! A stylesheet is compiled from `<file>.scss` in the source store into
//! `<file>.css` in the output store. The stored output is served as long as
//! it is at least as new as its source.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use chai_storage::{Storage, StorageError};

use crate::compiler::StylesheetCompiler;
use crate::error::StyleError;

/// Source file extension.
const SOURCE_EXTENSION: &str = "scss";

/// Output file extension.
const OUTPUT_EXTENSION: &str = "css";

/// A stylesheet ready to serve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stylesheet {
    /// Compiled CSS.
    pub css: String,
    /// True if this request compiled the source; false if the stored output
    /// was still fresh.
    pub compiled: bool,
}

/// Stylesheets handled by [`StylePipeline::build_all`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Sources that were compiled.
    pub compiled: Vec<PathBuf>,
    /// Sources whose output was already fresh.
    pub fresh: Vec<PathBuf>,
}

/// SCSS compilation pipeline.
pub struct StylePipeline {
    sources: Arc<dyn Storage>,
    outputs: Arc<dyn Storage>,
    compiler: Arc<dyn StylesheetCompiler>,
}

impl StylePipeline {
    /// Create a pipeline reading from `sources` and writing to `outputs`.
    #[must_use]
    pub fn new(
        sources: Arc<dyn Storage>,
        outputs: Arc<dyn Storage>,
        compiler: Arc<dyn StylesheetCompiler>,
    ) -> Self {
        Self {
            sources,
            outputs,
            compiler,
        }
    }

    /// Serve the stylesheet requested as `file` (e.g. `pages/book.scss`).
    ///
    /// # Errors
    ///
    /// - [`StyleError::InvalidPath`] if `file` is not a relative `.scss` path
    ///   without `..` components
    /// - [`StyleError::SourceNotFound`] if the source doesn't exist
    /// - [`StyleError::Compile`] if compilation fails
    /// - [`StyleError::Storage`] on other storage failures
    pub fn stylesheet(&self, file: &str) -> Result<Stylesheet, StyleError> {
        let source = source_path(file)?;
        self.load(&source)
    }

    /// Compile every stale non-partial stylesheet in the source store.
    ///
    /// Files whose name starts with `_` are partials and are only compiled
    /// through the files importing them.
    ///
    /// # Errors
    ///
    /// Stops at the first stylesheet that fails.
    pub fn build_all(&self) -> Result<BuildReport, StyleError> {
        let mut sources = Vec::new();
        self.collect_sources(Path::new(""), &mut sources)?;
        sources.sort();

        let mut report = BuildReport::default();
        for source in sources {
            if self.load(&source)?.compiled {
                report.compiled.push(source);
            } else {
                report.fresh.push(source);
            }
        }

        tracing::info!(
            compiled = report.compiled.len(),
            fresh = report.fresh.len(),
            "Built stylesheets"
        );
        Ok(report)
    }

    fn load(&self, source: &Path) -> Result<Stylesheet, StyleError> {
        let output = source.with_extension(OUTPUT_EXTENSION);

        if let Some(css) = self.fresh_output(source, &output)? {
            tracing::debug!(path = %source.display(), "Serving cached stylesheet");
            return Ok(Stylesheet {
                css,
                compiled: false,
            });
        }

        let scss = self.sources.read(source).map_err(|err| source_error(source, err))?;
        let css = self
            .compiler
            .compile(&scss, source)
            .map_err(|err| StyleError::Compile {
                path: source.to_path_buf(),
                message: err.message().to_owned(),
            })?;
        self.outputs
            .write(&output, &css)
            .map_err(|err| storage_error(&output, err))?;

        tracing::info!(path = %source.display(), "Compiled stylesheet");
        Ok(Stylesheet {
            css,
            compiled: true,
        })
    }

    /// Stored output, if it exists and is not older than its source.
    fn fresh_output(&self, source: &Path, output: &Path) -> Result<Option<String>, StyleError> {
        if !self.outputs.exists(output) {
            return Ok(None);
        }

        let source_mtime = self
            .sources
            .mtime(source)
            .map_err(|err| source_error(source, err))?;
        let output_mtime = self
            .outputs
            .mtime(output)
            .map_err(|err| storage_error(output, err))?;

        if output_mtime < source_mtime {
            return Ok(None);
        }

        self.outputs
            .read(output)
            .map(Some)
            .map_err(|err| storage_error(output, err))
    }

    fn collect_sources(&self, dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), StyleError> {
        let entries = match self.sources.list(dir) {
            Ok(entries) => entries,
            Err(err) if err.is_not_found() && dir.as_os_str().is_empty() => return Ok(()),
            Err(err) => return Err(storage_error(dir, err)),
        };

        for entry in entries {
            let path = dir.join(&entry.name);
            if entry.is_dir {
                self.collect_sources(&path, found)?;
            } else if !entry.name.starts_with('_')
                && path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
            {
                found.push(path);
            }
        }
        Ok(())
    }
}

/// Validate a requested stylesheet path.
fn source_path(file: &str) -> Result<PathBuf, StyleError> {
    let path = Path::new(file);
    let invalid = || StyleError::InvalidPath(file.to_owned());

    if file.is_empty() || !path.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(invalid());
    }
    if path.extension().is_none_or(|ext| ext != SOURCE_EXTENSION) {
        return Err(invalid());
    }
    Ok(path.to_path_buf())
}

fn source_error(path: &Path, source: StorageError) -> StyleError {
    if source.is_not_found() {
        StyleError::SourceNotFound(path.to_path_buf())
    } else {
        storage_error(path, source)
    }
}

fn storage_error(path: &Path, source: StorageError) -> StyleError {
    StyleError::Storage {
        path: path.to_path_buf(),
        source,
    }
}
