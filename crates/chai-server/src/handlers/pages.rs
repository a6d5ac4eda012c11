//! Standalone pages.
//!
//! A page is either a raw HTML view embedded as-is or a markdown document
//! rendered through `doc-page.html`.

use std::path::Path;

use axum::response::Html;
use chai_config::PageSource;
use chai_docs::ContentError;
use chai_storage::Storage;
use minijinja::{Value, context};

use crate::error::ServerError;
use crate::state::AppState;
use crate::templates::{BaseContext, DOC_PAGE_TEMPLATE};

/// Render the page at `index` in [`AppState::pages`].
pub(crate) fn static_page(state: &AppState, index: usize) -> Result<Html<String>, ServerError> {
    let Some(page) = state.pages.get(index) else {
        return Err(ServerError::PageNotFound(index.to_string()));
    };

    let body = match page.source() {
        Some(PageSource::View(view)) => read(state.views.as_ref(), view, &page.route)?,
        Some(PageSource::Markdown(file)) => {
            let source = read(state.content.as_ref(), file, &page.route)?;
            let rendered = state.renderer.render(&source);
            state.templates.render(
                DOC_PAGE_TEMPLATE,
                context! {
                    title => rendered.title,
                    content => Value::from_safe_string(rendered.html),
                    sections => rendered.sections,
                },
            )?
        }
        None => return Err(ServerError::PageNotFound(page.route.clone())),
    };

    let html = state.templates.render_base(
        &BaseContext {
            title: state.page_title(&page.title),
            page_style: page.style.as_deref(),
            components: &page.components,
        },
        body,
    )?;
    Ok(Html(html))
}

/// Read a page source, mapping a missing file to a 404 for `route`.
fn read(storage: &dyn Storage, file: &str, route: &str) -> Result<String, ServerError> {
    storage.read(Path::new(file)).map_err(|err| {
        if err.is_not_found() {
            ServerError::PageNotFound(route.to_owned())
        } else {
            ServerError::Content(ContentError::Storage {
                path: file.into(),
                source: err,
            })
        }
    })
}
