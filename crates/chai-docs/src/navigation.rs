//! Navigation tree and bottom navigation.
//!
//! A [`Navigation`] is the aside tree of one group: its index page followed by
//! chapters and their sections. Content entries are kept in document order
//! (every section of chapter 1, then chapter 2, and so on; a chapter without
//! sections is itself one entry), which is what [`Navigation::adjacent`]
//! walks to find previous and next links.

use serde::Serialize;

use crate::position::{PathError, Position};

/// Section of a chapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    /// 1-based ordinal within the chapter.
    pub ordinal: u32,
    /// Display title.
    pub title: String,
    /// Link target.
    pub href: String,
}

/// Chapter of a group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Chapter {
    /// 1-based ordinal.
    pub ordinal: u32,
    /// Display title.
    pub title: String,
    /// Link target: the chapter page, or its first section when the chapter
    /// is split into sections.
    pub href: String,
    /// Sections in order; empty for single-file chapters.
    pub sections: Vec<Section>,
}

/// Link produced by bottom navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Display title.
    pub title: String,
    /// Link target.
    pub href: String,
    /// Position the link points to.
    pub position: Position,
}

/// Previous and next links for a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Adjacent {
    /// Preceding entry, or the group index for the first entry.
    pub previous: Option<NavLink>,
    /// Following entry.
    pub next: Option<NavLink>,
}

/// Navigation tree of one documentation group.
///
/// Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Navigation {
    name: String,
    index_title: String,
    index_href: String,
    chapters: Vec<Chapter>,
    #[serde(skip)]
    order: Vec<NavLink>,
}

impl Navigation {
    /// Create a navigation tree.
    ///
    /// Chapters must be ordered by ordinal, starting at 1 without gaps, and
    /// the same holds for the sections of each chapter.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        index_title: impl Into<String>,
        index_href: impl Into<String>,
        chapters: Vec<Chapter>,
    ) -> Self {
        debug_assert!(
            chapters
                .iter()
                .zip(1..)
                .all(|(chapter, ordinal)| chapter.ordinal == ordinal
                    && chapter.sections.iter().zip(1..).all(|(s, n)| s.ordinal == n)),
            "chapters and sections must be numbered 1..=n"
        );

        let order = chapters
            .iter()
            .flat_map(|chapter| {
                if chapter.sections.is_empty() {
                    vec![NavLink {
                        title: chapter.title.clone(),
                        href: chapter.href.clone(),
                        position: Position::Chapter(chapter.ordinal),
                    }]
                } else {
                    chapter
                        .sections
                        .iter()
                        .map(|section| NavLink {
                            title: section.title.clone(),
                            href: section.href.clone(),
                            position: Position::Section {
                                chapter: chapter.ordinal,
                                section: section.ordinal,
                            },
                        })
                        .collect()
                }
            })
            .collect();

        Self {
            name: name.into(),
            index_title: index_title.into(),
            index_href: index_href.into(),
            chapters,
            order,
        }
    }

    /// Group display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Title of the group's index page.
    #[must_use]
    pub fn index_title(&self) -> &str {
        &self.index_title
    }

    /// Link target of the group's index page.
    #[must_use]
    pub fn index_href(&self) -> &str {
        &self.index_href
    }

    /// Chapters in order.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Content entries in document order. The index page is not included.
    #[must_use]
    pub fn entries(&self) -> &[NavLink] {
        &self.order
    }

    /// Link to the group's index page.
    #[must_use]
    pub fn index_link(&self) -> NavLink {
        NavLink {
            title: self.index_title.clone(),
            href: self.index_href.clone(),
            position: Position::Index,
        }
    }

    /// True if `position` names a page of this group.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position == Position::Index || self.entry_index(position).is_some()
    }

    /// Title of the page at `position`.
    #[must_use]
    pub fn title(&self, position: Position) -> Option<&str> {
        match position {
            Position::Index => Some(&self.index_title),
            _ => self
                .entry_index(position)
                .map(|i| self.order[i].title.as_str()),
        }
    }

    /// Previous and next links for the page at `position`.
    ///
    /// The first entry's previous link is the group index; the index has no
    /// previous link and the last entry has no next link.
    ///
    /// # Panics
    ///
    /// Panics if `position` is not part of this group. Check
    /// [`contains`](Self::contains) first when the position comes from a
    /// request.
    #[must_use]
    pub fn adjacent(&self, position: Position) -> Adjacent {
        if position == Position::Index {
            return Adjacent {
                previous: None,
                next: self.order.first().cloned(),
            };
        }

        let Some(index) = self.entry_index(position) else {
            panic!("{position} is not part of the {} navigation", self.name);
        };

        let previous = match index.checked_sub(1) {
            Some(prev) => self.order[prev].clone(),
            None => self.index_link(),
        };

        Adjacent {
            previous: Some(previous),
            next: self.order.get(index + 1).cloned(),
        }
    }

    /// Position addressed by `href`.
    ///
    /// The inverse of the hrefs the navigation hands out: for every entry,
    /// `position_for_href(&entry.href) == Ok(entry.position)`.
    pub fn position_for_href(&self, href: &str) -> Result<Position, PathError> {
        let prefix = self.index_href.trim_end_matches('/');
        let foreign = || PathError::ForeignPrefix {
            prefix: self.index_href.clone(),
            href: href.to_owned(),
        };

        let rest = href.strip_prefix(prefix).ok_or_else(foreign)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return Err(foreign());
        }
        Position::parse(rest.strip_prefix('/').unwrap_or(rest))
    }

    fn entry_index(&self, position: Position) -> Option<usize> {
        self.order.iter().position(|link| link.position == position)
    }
}
