//! Stylesheet compilers.

use std::path::{Path, PathBuf};

/// CSS output formatting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// Indented, one declaration per line.
    #[default]
    Expanded,
    /// Minified.
    Compressed,
}

/// Error reported by a [`StylesheetCompiler`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CompileError {
    message: String,
}

impl CompileError {
    /// Create a compile error with the compiler's message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Compiler message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Compiles SCSS source to CSS.
pub trait StylesheetCompiler: Send + Sync {
    /// Compile `source`, read from `path` (relative to the source root).
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] with the compiler's diagnostic.
    fn compile(&self, source: &str, path: &Path) -> Result<String, CompileError>;
}

/// [`StylesheetCompiler`] backed by the `grass` SCSS compiler.
///
/// Imports resolve against the directory of the file being compiled, then
/// against the source root.
#[derive(Clone, Debug)]
pub struct GrassCompiler {
    root: PathBuf,
    style: OutputStyle,
}

impl GrassCompiler {
    /// Create a compiler for sources under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            style: OutputStyle::default(),
        }
    }

    /// Set the output style.
    #[must_use]
    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }
}

impl StylesheetCompiler for GrassCompiler {
    fn compile(&self, source: &str, path: &Path) -> Result<String, CompileError> {
        let file_dir = match path.parent() {
            Some(parent) => self.root.join(parent),
            None => self.root.clone(),
        };
        let style = match self.style {
            OutputStyle::Expanded => grass::OutputStyle::Expanded,
            OutputStyle::Compressed => grass::OutputStyle::Compressed,
        };
        let options = grass::Options::default()
            .style(style)
            .load_path(&file_dir)
            .load_path(&self.root);

        grass::from_string(source.to_owned(), &options)
            .map_err(|err| CompileError::new(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_grass_compiles_variables() {
        let dir = TempDir::new().unwrap();
        let compiler = GrassCompiler::new(dir.path());

        let css = compiler
            .compile("$accent: red;\na { color: $accent; }\n", Path::new("main.scss"))
            .unwrap();

        assert!(css.contains("color: red"), "{css}");
    }

    #[test]
    fn test_grass_compressed() {
        let dir = TempDir::new().unwrap();
        let compiler = GrassCompiler::new(dir.path()).with_style(OutputStyle::Compressed);

        let css = compiler
            .compile("a {\n  color: red;\n}\n", Path::new("main.scss"))
            .unwrap();

        assert!(css.contains("color:red"), "{css}");
    }

    #[test]
    fn test_grass_resolves_imports_next_to_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("pages/_palette.scss"), "$ink: blue;\n").unwrap();
        let compiler = GrassCompiler::new(dir.path());

        let css = compiler
            .compile(
                "@import \"palette\";\np { color: $ink; }\n",
                Path::new("pages/book.scss"),
            )
            .unwrap();

        assert!(css.contains("color: blue"), "{css}");
    }

    #[test]
    fn test_grass_resolves_imports_from_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("_common.scss"), "$gap: 4px;\n").unwrap();
        let compiler = GrassCompiler::new(dir.path());

        let css = compiler
            .compile(
                "@import \"common\";\np { margin: $gap; }\n",
                Path::new("pages/tour.scss"),
            )
            .unwrap();

        assert!(css.contains("margin: 4px"), "{css}");
    }

    #[test]
    fn test_grass_reports_errors() {
        let dir = TempDir::new().unwrap();
        let compiler = GrassCompiler::new(dir.path());

        let err = compiler
            .compile("a { color: $missing; }\n", Path::new("main.scss"))
            .unwrap_err();

        assert!(!err.message().is_empty());
    }
}
