//! Positions inside a documentation group.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Error returned for request paths that don't name a position.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path is not `chapter<N>` or `chapter<N>/section<M>`.
    #[error("unrecognized documentation path: {0}")]
    Malformed(String),
    /// The href does not start with the group's route prefix.
    #[error("{href} is not under {prefix}")]
    ForeignPrefix {
        /// Route prefix of the group.
        prefix: String,
        /// Offending href.
        href: String,
    },
}

/// Location of a page within a group. Ordinals are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    /// The group's `index.md`.
    Index,
    /// A single-file chapter.
    Chapter(u32),
    /// A section inside a chapter directory.
    Section {
        /// Chapter ordinal.
        chapter: u32,
        /// Section ordinal within the chapter.
        section: u32,
    },
}

impl Position {
    /// Parse the part of a request path that follows the group's route prefix.
    ///
    /// Accepts `""`, `chapter<N>` and `chapter<N>/section<M>`; one trailing
    /// slash is tolerated.
    ///
    /// # Example
    ///
    /// ```
    /// use chai_docs::Position;
    ///
    /// assert_eq!(Position::parse(""), Ok(Position::Index));
    /// assert_eq!(Position::parse("chapter3/"), Ok(Position::Chapter(3)));
    /// assert_eq!(
    ///     Position::parse("chapter1/section2"),
    ///     Ok(Position::Section { chapter: 1, section: 2 })
    /// );
    /// assert!(Position::parse("chapter0").is_err());
    /// ```
    pub fn parse(tail: &str) -> Result<Self, PathError> {
        let trimmed = tail.strip_suffix('/').unwrap_or(tail);
        if trimmed.is_empty() {
            return Ok(Self::Index);
        }

        let malformed = || PathError::Malformed(tail.to_owned());
        let mut parts = trimmed.split('/');
        let chapter = parts
            .next()
            .and_then(|part| parse_ordinal(part, "chapter"))
            .ok_or_else(malformed)?;

        match (parts.next(), parts.next()) {
            (None, _) => Ok(Self::Chapter(chapter)),
            (Some(part), None) => {
                let section = parse_ordinal(part, "section").ok_or_else(malformed)?;
                Ok(Self::Section { chapter, section })
            }
            (Some(_), Some(_)) => Err(malformed()),
        }
    }

    /// Path suffix for this position, without a leading slash.
    #[must_use]
    pub fn tail(&self) -> String {
        match self {
            Self::Index => String::new(),
            Self::Chapter(chapter) => format!("chapter{chapter}"),
            Self::Section { chapter, section } => format!("chapter{chapter}/section{section}"),
        }
    }

    /// Chapter ordinal, if the position is inside a chapter.
    #[must_use]
    pub fn chapter(&self) -> Option<u32> {
        match self {
            Self::Index => None,
            Self::Chapter(chapter) | Self::Section { chapter, .. } => Some(*chapter),
        }
    }

    /// Section ordinal, if the position is a section.
    #[must_use]
    pub fn section(&self) -> Option<u32> {
        match self {
            Self::Section { section, .. } => Some(*section),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => write!(f, "index"),
            Self::Chapter(chapter) => write!(f, "chapter {chapter}"),
            Self::Section { chapter, section } => write!(f, "chapter {chapter} section {section}"),
        }
    }
}

/// Serialized as `{ "chapter": n | null, "section": m | null }` so templates
/// can compare positions against aside entries.
impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Position", 2)?;
        state.serialize_field("chapter", &self.chapter())?;
        state.serialize_field("section", &self.section())?;
        state.end()
    }
}

/// Parse `<prefix><digits>` into a positive ordinal.
///
/// Leading zeros are rejected so every ordinal has exactly one spelling.
pub(crate) fn parse_ordinal(name: &str, prefix: &str) -> Option<u32> {
    let digits = name.strip_prefix(prefix)?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok().filter(|&n| n > 0)
}
