//! Markdown rendering for the Chai website.
//!
//! This crate provides a [`MarkdownRenderer`] that converts content documents
//! to HTML fragments ready to be placed into page templates, and the
//! [`parse_title_line`] parser used to derive document titles.
//!
//! # Conventions
//!
//! - The first line of every content document is its title: `# ` followed by
//!   the title text.
//! - First-level headings render as the `<section-title>` custom element.
//! - Second-level headings get `section0`, `section1`, ... ids and are
//!   returned as [`SectionAnchor`]s for in-page navigation.
//!
//! # Example
//!
//! ```
//! use chai_renderer::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::new().with_code_language("chai");
//! let page = renderer.render("# Hello\n\n## Variables\n\n```\nlet x = 1\n```");
//!
//! assert_eq!(page.title.as_deref(), Some("Hello"));
//! assert_eq!(page.sections[0].id, "section0");
//! assert!(page.html.contains(r#"class="language-chai""#));
//! ```

mod markdown;
mod title;

pub use markdown::{MarkdownRenderer, RenderedPage, SectionAnchor};
pub use title::{TitleError, parse_title_line, title_of};
