//! Navigation tree construction from the content repository.
//!
//! Storage listings are never trusted for order: numbered entries are sorted
//! by the ordinal in their name and must then run `1..=n`.

use std::path::Path;

use chai_renderer::{TitleError, title_of};
use chai_storage::{Entry, Storage};

use crate::error::ContentError;
use crate::layout::{CONTENT_EXTENSION, GroupLayout, GroupSpec, TITLES_FILE};
use crate::navigation::{Chapter, Navigation, Section};
use crate::position::{Position, parse_ordinal};

/// Build the navigation tree of one group.
///
/// # Errors
///
/// Returns [`ContentError`] naming the offending path if a title is missing
/// or malformed, ordinals have gaps, a sectioned chapter is empty, or the
/// repository can't be read.
pub fn build_navigation(
    storage: &dyn Storage,
    spec: &GroupSpec,
) -> Result<Navigation, ContentError> {
    let index_path = spec.dir().join(format!("index{CONTENT_EXTENSION}"));
    let index_title = read_title(storage, &index_path)?;

    let group_dir = spec.dir();
    let listing = storage
        .list(&group_dir)
        .map_err(ContentError::storage(&group_dir))?;

    let chapters = match &spec.layout {
        GroupLayout::Sectioned => {
            let ordinals = ordinals_in(&group_dir, &listing, chapter_dir_ordinal)?;
            build_sectioned(storage, spec, &ordinals)?
        }
        GroupLayout::Flat => {
            let ordinals = ordinals_in(&group_dir, &listing, |entry| {
                document_ordinal(entry, "chapter")
            })?;
            build_single_file(storage, spec, &ordinals)?
        }
        GroupLayout::Nested { .. } => {
            let ordinals = ordinals_in(&group_dir, &listing, chapter_dir_ordinal)?;
            build_single_file(storage, spec, &ordinals)?
        }
    };

    tracing::debug!(
        group = %spec.slug,
        chapters = chapters.len(),
        "Built navigation"
    );

    Ok(Navigation::new(
        spec.name.clone(),
        index_title,
        spec.href(Position::Index),
        chapters,
    ))
}

fn build_sectioned(
    storage: &dyn Storage,
    spec: &GroupSpec,
    ordinals: &[u32],
) -> Result<Vec<Chapter>, ContentError> {
    let titles_path = spec.dir().join(TITLES_FILE);
    let titles = read_chapter_titles(storage, &titles_path)?;

    ordinals
        .iter()
        .map(|&chapter| {
            let title = titles
                .get(chapter as usize - 1)
                .filter(|title| !title.is_empty())
                .ok_or_else(|| ContentError::MissingChapterTitle {
                    path: titles_path.clone(),
                    chapter,
                })?
                .clone();

            let chapter_dir = spec.chapter_dir(chapter);
            let listing = storage
                .list(&chapter_dir)
                .map_err(ContentError::storage(&chapter_dir))?;
            let section_ordinals = ordinals_in(&chapter_dir, &listing, |entry| {
                document_ordinal(entry, "section")
            })?;
            if section_ordinals.is_empty() {
                return Err(ContentError::EmptyChapter { path: chapter_dir });
            }

            let sections = section_ordinals
                .into_iter()
                .map(|section| {
                    let position = Position::Section { chapter, section };
                    let path = chapter_dir.join(format!("section{section}{CONTENT_EXTENSION}"));
                    Ok(Section {
                        ordinal: section,
                        title: read_title(storage, &path)?,
                        href: spec.href(position),
                    })
                })
                .collect::<Result<Vec<_>, ContentError>>()?;

            Ok(Chapter {
                ordinal: chapter,
                title,
                href: spec.href(Position::Section { chapter, section: 1 }),
                sections,
            })
        })
        .collect()
}

fn build_single_file(
    storage: &dyn Storage,
    spec: &GroupSpec,
    ordinals: &[u32],
) -> Result<Vec<Chapter>, ContentError> {
    ordinals
        .iter()
        .map(|&chapter| {
            let position = Position::Chapter(chapter);
            let Some(path) = spec.document_path(position) else {
                unreachable!("single-file layouts have a document per chapter");
            };
            Ok(Chapter {
                ordinal: chapter,
                title: read_title(storage, &path)?,
                href: spec.href(position),
                sections: Vec::new(),
            })
        })
        .collect()
}

/// Ordinal of a `chapter<N>` directory.
fn chapter_dir_ordinal(entry: &Entry) -> Option<u32> {
    if !entry.is_dir {
        return None;
    }
    parse_ordinal(&entry.name, "chapter")
}

/// Ordinal of a `<prefix><N>.md` document.
fn document_ordinal(entry: &Entry, prefix: &str) -> Option<u32> {
    if entry.is_dir {
        return None;
    }
    let stem = entry.name.strip_suffix(CONTENT_EXTENSION)?;
    parse_ordinal(stem, prefix)
}

/// Pick the numbered entries of a listing, sort them and check `1..=n`.
fn ordinals_in(
    dir: &Path,
    listing: &[Entry],
    ordinal_of: impl Fn(&Entry) -> Option<u32>,
) -> Result<Vec<u32>, ContentError> {
    let mut ordinals: Vec<u32> = listing.iter().filter_map(ordinal_of).collect();
    ordinals.sort_unstable();

    for (expected, &found) in (1..).zip(&ordinals) {
        if found != expected {
            return Err(ContentError::OrdinalGap {
                path: dir.to_path_buf(),
                expected,
                found,
            });
        }
    }
    Ok(ordinals)
}

/// Read a document and parse the title from its first line.
fn read_title(storage: &dyn Storage, path: &Path) -> Result<String, ContentError> {
    let content = storage.read(path).map_err(ContentError::storage(path))?;
    match title_of(&content) {
        Ok(title) => Ok(title.to_owned()),
        Err(TitleError::Empty) => Err(ContentError::MissingTitle {
            path: path.to_path_buf(),
        }),
        Err(reason) => Err(ContentError::MalformedTitle {
            path: path.to_path_buf(),
            line: content.lines().next().unwrap_or_default().to_owned(),
            reason,
        }),
    }
}

/// Read `titles.txt`: one chapter title per line, trailing blank lines ignored.
fn read_chapter_titles(storage: &dyn Storage, path: &Path) -> Result<Vec<String>, ContentError> {
    let content = storage.read(path).map_err(ContentError::storage(path))?;
    let mut titles: Vec<String> = content.lines().map(|line| line.trim().to_owned()).collect();
    while titles.last().is_some_and(String::is_empty) {
        titles.pop();
    }
    Ok(titles)
}
