//! Markdown to HTML conversion.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// In-page anchor for a second-level heading.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SectionAnchor {
    /// Heading text.
    pub title: String,
    /// Element id (`section0`, `section1`, ...).
    pub id: String,
}

/// Result of rendering a markdown document.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    /// Rendered HTML fragment.
    pub html: String,
    /// Text of the first first-level heading.
    pub title: Option<String>,
    /// Second-level headings in document order.
    pub sections: Vec<SectionAnchor>,
}

/// Markdown renderer.
///
/// Tables, strikethrough and task lists are enabled. Raw HTML in the source
/// passes through unchanged.
#[derive(Clone, Debug, Default)]
pub struct MarkdownRenderer {
    code_language: Option<String>,
}

/// Heading currently being collected.
struct OpenHeading {
    level: HeadingLevel,
    text: String,
}

impl MarkdownRenderer {
    /// Create a renderer without a default code language.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language class applied to code blocks that don't name one.
    #[must_use]
    pub fn with_code_language(mut self, language: impl Into<String>) -> Self {
        self.code_language = Some(language.into());
        self
    }

    /// Default code block language, if any.
    #[must_use]
    pub fn code_language(&self) -> Option<&str> {
        self.code_language.as_deref()
    }

    fn parser_options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    }

    /// Render a markdown document.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderedPage {
        let parser = Parser::new_ext(markdown, Self::parser_options());

        let mut events: Vec<Event<'_>> = Vec::new();
        let mut heading: Option<OpenHeading> = None;
        let mut title: Option<String> = None;
        let mut sections: Vec<SectionAnchor> = Vec::new();

        for event in parser {
            match event {
                Event::Start(Tag::Heading {
                    level: level @ (HeadingLevel::H1 | HeadingLevel::H2),
                    ..
                }) => {
                    let open = if level == HeadingLevel::H1 {
                        "<section-title>".to_owned()
                    } else {
                        format!(r#"<h2 id="section{}">"#, sections.len())
                    };
                    events.push(Event::Html(CowStr::from(open)));
                    heading = Some(OpenHeading {
                        level,
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::Heading(HeadingLevel::H1 | HeadingLevel::H2)) => {
                    let Some(open) = heading.take() else {
                        continue;
                    };
                    let text = open.text.trim().to_owned();
                    if open.level == HeadingLevel::H1 {
                        events.push(Event::Html("</section-title>\n".into()));
                        title.get_or_insert(text);
                    } else {
                        events.push(Event::Html("</h2>\n".into()));
                        let id = format!("section{}", sections.len());
                        sections.push(SectionAnchor { title: text, id });
                    }
                }
                Event::Text(text) => {
                    if let Some(open) = heading.as_mut() {
                        open.text.push_str(&text);
                    }
                    events.push(Event::Text(text));
                }
                Event::Code(code) => {
                    if let Some(open) = heading.as_mut() {
                        open.text.push_str(&code);
                    }
                    events.push(Event::Code(code));
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    events.push(Event::Start(Tag::CodeBlock(self.code_block_kind(kind))));
                }
                other => events.push(other),
            }
        }

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        RenderedPage {
            html,
            title,
            sections,
        }
    }

    /// Apply the default language to unlabelled code blocks.
    fn code_block_kind<'a>(&self, kind: CodeBlockKind<'a>) -> CodeBlockKind<'a> {
        let Some(language) = self.code_language.as_deref() else {
            return kind;
        };
        let unlabelled = match &kind {
            CodeBlockKind::Indented => true,
            CodeBlockKind::Fenced(info) => info.trim().is_empty(),
        };
        if unlabelled {
            CodeBlockKind::Fenced(CowStr::from(language.to_owned()))
        } else {
            kind
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_paragraph() {
        let page = MarkdownRenderer::new().render("Hello **world**");

        assert_eq!(page.html, "<p>Hello <strong>world</strong></p>\n");
        assert!(page.title.is_none());
        assert!(page.sections.is_empty());
    }

    #[test]
    fn test_render_h1_as_section_title() {
        let page = MarkdownRenderer::new().render("# Hello World\n\nBody.");

        assert!(page.html.starts_with("<section-title>Hello World</section-title>\n"));
        assert!(!page.html.contains("<h1"));
        assert_eq!(page.title.as_deref(), Some("Hello World"));
    }

    #[test]
    fn test_render_first_h1_is_title() {
        let page = MarkdownRenderer::new().render("# First\n\n# Second");

        assert_eq!(page.title.as_deref(), Some("First"));
        assert_eq!(page.html.matches("<section-title>").count(), 2);
    }

    #[test]
    fn test_render_h2_anchors() {
        let page = MarkdownRenderer::new()
            .render("# Title\n\n## Variables\n\nText.\n\n## `match` Expressions\n");

        assert_eq!(
            page.sections,
            vec![
                SectionAnchor {
                    title: "Variables".to_owned(),
                    id: "section0".to_owned(),
                },
                SectionAnchor {
                    title: "match Expressions".to_owned(),
                    id: "section1".to_owned(),
                },
            ]
        );
        assert!(page.html.contains(r#"<h2 id="section0">Variables</h2>"#));
        assert!(
            page.html
                .contains(r#"<h2 id="section1"><code>match</code> Expressions</h2>"#)
        );
    }

    #[test]
    fn test_render_title_not_in_sections() {
        let page = MarkdownRenderer::new().render("# Title\n\n### Deep\n");

        assert!(page.sections.is_empty());
        assert!(page.html.contains("<h3>Deep</h3>"));
    }

    #[test]
    fn test_render_heading_text_is_escaped() {
        let page = MarkdownRenderer::new().render("## a < b\n");

        assert!(page.html.contains("a &lt; b"));
        assert_eq!(page.sections[0].title, "a < b");
    }

    #[test]
    fn test_render_default_code_language() {
        let renderer = MarkdownRenderer::new().with_code_language("chai");

        let page = renderer.render("```\nlet x = 1\n```\n");

        assert!(
            page.html
                .contains(r#"<pre><code class="language-chai">let x = 1"#)
        );
    }

    #[test]
    fn test_render_indented_code_gets_default_language() {
        let renderer = MarkdownRenderer::new().with_code_language("chai");

        let page = renderer.render("Text.\n\n    let y = 2\n");

        assert!(page.html.contains(r#"class="language-chai""#));
    }

    #[test]
    fn test_render_explicit_code_language_kept() {
        let renderer = MarkdownRenderer::new().with_code_language("chai");

        let page = renderer.render("```rust\nfn main() {}\n```\n");

        assert!(page.html.contains(r#"class="language-rust""#));
        assert!(!page.html.contains("language-chai"));
    }

    #[test]
    fn test_render_without_default_code_language() {
        let page = MarkdownRenderer::new().render("```\nplain\n```\n");

        assert!(page.html.contains("<pre><code>plain"));
    }

    #[test]
    fn test_render_tables() {
        let page = MarkdownRenderer::new().render("| a | b |\n|---|---|\n| 1 | 2 |\n");

        assert!(page.html.contains("<table>"));
        assert!(page.html.contains("<td>1</td>"));
    }

    #[test]
    fn test_render_raw_html_passthrough() {
        let page =
            MarkdownRenderer::new().render("<guide-exercise label=\"1.1\"></guide-exercise>\n");

        assert!(
            page.html
                .contains("<guide-exercise label=\"1.1\"></guide-exercise>")
        );
    }
}
