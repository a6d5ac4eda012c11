//! Documentation group pages.
//!
//! Renders a group's index, chapter or section page: the markdown document
//! goes through the group's page template together with the aside tree and
//! the bottom navigation, and the result is embedded in the base layout.

use axum::response::Html;
use chai_docs::Position;
use minijinja::{Value, context};

use crate::error::ServerError;
use crate::state::AppState;
use crate::templates::BaseContext;

/// Render the page at `tail` (e.g. `chapter1/section2`) of the group at
/// `index` in [`AppState::groups`].
pub(crate) fn group_page(
    state: &AppState,
    index: usize,
    tail: &str,
) -> Result<Html<String>, ServerError> {
    let Some(page) = state.groups.get(index) else {
        return Err(ServerError::PageNotFound(tail.to_owned()));
    };
    let group = &page.group;
    let navigation = group.navigation();

    let position = Position::parse(tail)?;
    if !navigation.contains(position) {
        return Err(ServerError::PageNotFound(group.spec().href(position)));
    }

    let rendered = state.renderer.render(&group.page_source(position)?);
    let attachments = group.attachments(position)?;
    let adjacent = navigation.adjacent(position);

    tracing::debug!(group = group.slug(), %position, "Rendering documentation page");

    let body = state.templates.render(
        &page.template,
        context! {
            group_title => navigation.name(),
            aside => navigation,
            position => position,
            current_href => group.spec().href(position),
            prev => adjacent.previous,
            next => adjacent.next,
            content => Value::from_safe_string(rendered.html),
            sections => rendered.sections,
            attachments => attachments,
        },
    )?;

    let html = state.templates.render_base(
        &BaseContext {
            title: state.page_title(navigation.name()),
            page_style: Some(&page.style),
            components: &page.components,
        },
        body,
    )?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;

    fn render(index: usize, tail: &str) -> Result<String, ServerError> {
        group_page(&test_support::state(), index, tail)
            .map(|Html(html)| test_support::unescape_slashes(&html))
    }

    #[test]
    fn test_group_index_page() {
        let html = render(0, "").unwrap();

        assert!(html.contains("<title>The Chai Book | chai-lang.dev</title>"));
        assert!(html.contains("<section-title>The Chai Book</section-title>"));
        assert!(!html.contains("class=\"prev\""));
        assert!(html.contains(
            "<a class=\"next\" href=\"/docs/book/chapter1/section1\">Hello World</a>"
        ));
    }

    #[test]
    fn test_section_page_bottom_navigation() {
        let html = render(0, "chapter1/section2").unwrap();

        assert!(html.contains(
            "<a class=\"prev\" href=\"/docs/book/chapter1/section1\">Hello World</a>"
        ));
        assert!(html.contains(
            "<a class=\"next\" href=\"/docs/book/chapter2/section1\">Integers</a>"
        ));
    }

    #[test]
    fn test_section_page_anchors_and_code() {
        let html = render(0, "chapter1/section2").unwrap();

        assert!(html.contains("<a href=\"#section0\">Declaring</a>"));
        assert!(html.contains("<a href=\"#section1\">Mutating</a>"));
        assert!(html.contains("<h2 id=\"section0\">Declaring</h2>"));
        assert!(html.contains("class=\"language-chai\""));
    }

    #[test]
    fn test_first_section_links_back_to_index() {
        let html = render(0, "chapter1/section1").unwrap();

        assert!(html.contains("<a class=\"prev\" href=\"/docs/book\">The Chai Book</a>"));
    }

    #[test]
    fn test_last_section_has_no_next() {
        let html = render(0, "chapter2/section1/").unwrap();

        assert!(html.contains("class=\"prev\""));
        assert!(!html.contains("class=\"next\""));
    }

    #[test]
    fn test_aside_lists_every_section() {
        let html = render(0, "chapter2/section1").unwrap();

        assert!(html.contains("<p>Basics</p>"));
        assert!(html.contains("<p>Types</p>"));
        assert!(html.contains("<a href=\"/docs/book/chapter1/section2\">Variables</a>"));
    }

    #[test]
    fn test_unknown_position_is_not_found() {
        let err = render(0, "chapter3/section1").unwrap_err();

        assert!(matches!(err, ServerError::PageNotFound(ref path) if path == "/docs/book/chapter3/section1"));
    }

    #[test]
    fn test_chapter_without_section_is_not_found_in_sectioned_group() {
        let err = render(0, "chapter1").unwrap_err();

        assert!(matches!(err, ServerError::PageNotFound(_)));
    }

    #[test]
    fn test_malformed_path_is_rejected() {
        let err = render(0, "chapter1/lesson").unwrap_err();

        assert!(matches!(err, ServerError::Path(_)));
    }

    #[test]
    fn test_nested_group_page_with_attachments() {
        let html = render(1, "chapter1").unwrap();

        assert!(html.contains("<title>Tour | chai-lang.dev</title>"));
        assert!(html.contains("<h1>Tour: chapter 1</h1>"));
        assert!(html.contains("<section-title>Printing</section-title>"));
        assert!(html.contains("<pre>fn main() {\n}</pre>"));
        assert!(html.contains("href=\"/static/scss/tour.scss\""));
    }
}
