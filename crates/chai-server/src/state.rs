//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use chai_config::PageConfig;
use chai_docs::DocGroup;
use chai_exercises::ExerciseService;
use chai_renderer::MarkdownRenderer;
use chai_storage::Storage;
use chai_styles::StylePipeline;

use crate::templates::Templates;

/// A documentation group together with how its pages are presented.
#[derive(Debug)]
pub(crate) struct GroupPage {
    /// Prebuilt group.
    pub(crate) group: Arc<DocGroup>,
    /// Page template.
    pub(crate) template: String,
    /// Stylesheet under `/static/scss/`.
    pub(crate) style: String,
    /// Web components the page loads.
    pub(crate) components: Vec<String>,
}

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Site title, appended to page titles.
    pub(crate) site_title: String,
    /// Content repository for standalone markdown pages.
    pub(crate) content: Arc<dyn Storage>,
    /// Raw HTML views.
    pub(crate) views: Arc<dyn Storage>,
    /// Markdown renderer.
    pub(crate) renderer: MarkdownRenderer,
    /// Page templates.
    pub(crate) templates: Templates,
    /// Documentation groups in route order.
    pub(crate) groups: Vec<GroupPage>,
    /// Standalone pages.
    pub(crate) pages: Vec<PageConfig>,
    /// On-demand stylesheet compilation.
    pub(crate) styles: StylePipeline,
    /// Guide exercise lookup.
    pub(crate) exercises: ExerciseService,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("site_title", &self.site_title)
            .field("groups", &self.groups)
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Full `<title>` for a page.
    ///
    /// The site title alone when the page is titled after the site.
    pub(crate) fn page_title(&self, title: &str) -> String {
        if title == self.site_title {
            title.to_owned()
        } else {
            format!("{title} | {}", self.site_title)
        }
    }
}
