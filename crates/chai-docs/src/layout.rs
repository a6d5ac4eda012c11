//! Group layouts and the naming conventions they imply.

use std::path::PathBuf;

use crate::position::Position;

/// Extension of content documents.
pub(crate) const CONTENT_EXTENSION: &str = ".md";

/// File naming chapters of a [`GroupLayout::Sectioned`] group, one per line.
pub const TITLES_FILE: &str = "titles.txt";

/// How a group lays out its pages on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupLayout {
    /// `chapter<N>/section<M>.md`; chapter titles from `titles.txt`.
    Sectioned,
    /// `chapter<N>.md`.
    Flat,
    /// `chapter<N>/<file>`, e.g. tour lessons in `lesson.md`.
    Nested {
        /// Name of the page file inside each chapter directory.
        file: String,
    },
}

/// Description of one documentation group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSpec {
    /// Directory under the content root, also the default URL segment.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Page layout.
    pub layout: GroupLayout,
    /// Route prefix; pages live at `<route>/chapter<N>...`.
    pub route: String,
    /// Chapter-directory files handed to templates when present.
    pub attachments: Vec<String>,
}

impl GroupSpec {
    /// Create a group routed at `/docs/<slug>` without attachments.
    #[must_use]
    pub fn new(slug: impl Into<String>, name: impl Into<String>, layout: GroupLayout) -> Self {
        let slug = slug.into();
        Self {
            route: format!("/docs/{slug}"),
            slug,
            name: name.into(),
            layout,
            attachments: Vec::new(),
        }
    }

    /// Override the route prefix. A trailing slash is dropped.
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        let route = route.into();
        self.route = match route.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped.to_owned(),
            _ => route,
        };
        self
    }

    /// Set the attachment file names.
    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Group directory relative to the content root.
    #[must_use]
    pub fn dir(&self) -> PathBuf {
        PathBuf::from(&self.slug)
    }

    /// Directory of chapter `chapter`.
    #[must_use]
    pub fn chapter_dir(&self, chapter: u32) -> PathBuf {
        self.dir().join(format!("chapter{chapter}"))
    }

    /// Markdown document backing `position`.
    ///
    /// Returns `None` when the layout has no page at that kind of position
    /// (a bare chapter of a sectioned group, or a section of a flat one).
    #[must_use]
    pub fn document_path(&self, position: Position) -> Option<PathBuf> {
        match (&self.layout, position) {
            (_, Position::Index) => Some(self.dir().join(format!("index{CONTENT_EXTENSION}"))),
            (GroupLayout::Sectioned, Position::Section { chapter, section }) => Some(
                self.chapter_dir(chapter)
                    .join(format!("section{section}{CONTENT_EXTENSION}")),
            ),
            (GroupLayout::Flat, Position::Chapter(chapter)) => Some(
                self.dir()
                    .join(format!("chapter{chapter}{CONTENT_EXTENSION}")),
            ),
            (GroupLayout::Nested { file }, Position::Chapter(chapter)) => {
                Some(self.chapter_dir(chapter).join(file))
            }
            _ => None,
        }
    }

    /// Directory holding attachments for `position`, if the layout has one.
    #[must_use]
    pub fn attachment_dir(&self, position: Position) -> Option<PathBuf> {
        match (&self.layout, position) {
            (GroupLayout::Sectioned, Position::Section { chapter, .. })
            | (GroupLayout::Nested { .. }, Position::Chapter(chapter)) => {
                Some(self.chapter_dir(chapter))
            }
            _ => None,
        }
    }

    /// Link target for `position`.
    #[must_use]
    pub fn href(&self, position: Position) -> String {
        match position {
            Position::Index => self.route.clone(),
            _ => {
                let base = self.route.trim_end_matches('/');
                format!("{base}/{}", position.tail())
            }
        }
    }
}
