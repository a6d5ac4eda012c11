//! Title line parsing.
//!
//! Every content document starts with a title line made of a single `#`
//! heading marker, one space, and the title text.

/// Reason a title line was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TitleError {
    /// The document has no first line.
    #[error("document is empty")]
    Empty,
    /// The first line does not start with `#`.
    #[error("first line does not start with a `#` heading marker")]
    MissingMarker,
    /// The marker is not followed by a single space (e.g. `##` or `#Title`).
    #[error("heading marker must be a single `#` followed by a space")]
    MissingSeparator,
    /// Nothing follows the marker.
    #[error("title text is empty")]
    EmptyTitle,
}

/// Parse a title line and return the title text.
///
/// Trailing whitespace (including a `\r` from CRLF files) is ignored.
///
/// # Errors
///
/// Returns a [`TitleError`] describing the first rule the line breaks.
///
/// # Example
///
/// ```
/// use chai_renderer::{TitleError, parse_title_line};
///
/// assert_eq!(parse_title_line("# Hello World"), Ok("Hello World"));
/// assert_eq!(parse_title_line("## Nested"), Err(TitleError::MissingSeparator));
/// ```
pub fn parse_title_line(line: &str) -> Result<&str, TitleError> {
    let rest = line.strip_prefix('#').ok_or(TitleError::MissingMarker)?;
    let text = rest.strip_prefix(' ').ok_or(TitleError::MissingSeparator)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(TitleError::EmptyTitle);
    }
    Ok(text)
}

/// Extract the title from a whole document.
///
/// # Errors
///
/// Returns [`TitleError::Empty`] for an empty document, otherwise whatever
/// [`parse_title_line`] reports for the first line.
pub fn title_of(document: &str) -> Result<&str, TitleError> {
    let first = document.lines().next().ok_or(TitleError::Empty)?;
    parse_title_line(first)
}
