//! Page templates.
//!
//! Every page is rendered twice: its own template (`doc-group.html`,
//! `doc-page.html`, `tour.html`, ...) produces the page body, which is then
//! embedded in `base.html` together with the page title, stylesheet and the
//! web components it loads.

use std::path::Path;

use chai_storage::{Storage, StorageError};
use minijinja::{Environment, Value, context};

/// Site-wide layout template.
pub(crate) const BASE_TEMPLATE: &str = "base.html";

/// Template for standalone markdown pages.
pub(crate) const DOC_PAGE_TEMPLATE: &str = "doc-page.html";

/// Template loading or rendering error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The templates directory could not be read.
    #[error("cannot load templates: {0}")]
    Storage(#[from] StorageError),
    /// A template failed to parse or render.
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// Values `base.html` is rendered with.
#[derive(Debug)]
pub(crate) struct BaseContext<'a> {
    /// Full page title.
    pub(crate) title: String,
    /// Stylesheet under `/static/scss/`.
    pub(crate) page_style: Option<&'a str>,
    /// Web components the page loads.
    pub(crate) components: &'a [String],
}

/// Compiled page templates.
pub struct Templates {
    env: Environment<'static>,
    names: Vec<String>,
}

impl Templates {
    /// Load every `.html` file at the root of `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the directory can't be read or a template
    /// has a syntax error.
    pub fn load(storage: &dyn Storage) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        let mut names = Vec::new();
        for entry in storage.list(Path::new(""))? {
            if entry.is_dir || !entry.name.ends_with(".html") {
                continue;
            }
            let source = storage.read(Path::new(&entry.name))?;
            env.add_template_owned(entry.name.clone(), source)?;
            names.push(entry.name);
        }
        tracing::debug!(count = names.len(), "Loaded templates");
        Ok(Self { env, names })
    }

    /// Render the page template `name` with `ctx`.
    pub(crate) fn render(&self, name: &str, ctx: Value) -> Result<String, TemplateError> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }

    /// Embed a rendered body in the base layout.
    pub(crate) fn render_base(
        &self,
        base: &BaseContext<'_>,
        body: String,
    ) -> Result<String, TemplateError> {
        self.render(
            BASE_TEMPLATE,
            context! {
                title => &base.title,
                page_style => base.page_style,
                components => base.components,
                content => Value::from_safe_string(body),
            },
        )
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}
