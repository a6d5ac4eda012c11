//! Exercise labels.

use std::fmt;
use std::str::FromStr;

/// Error for a label that is not `<section>.<exercise>`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid exercise label {label:?}: expected <section>.<exercise>")]
pub struct LabelError {
    label: String,
}

impl LabelError {
    /// The rejected label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Exercise identifier, written `<section>.<exercise>` (e.g. `3.2`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExerciseLabel {
    /// Guide section number.
    pub section: u32,
    /// Exercise number within the section.
    pub exercise: u32,
}

impl ExerciseLabel {
    /// Name of the descriptor file, `e<section>_<exercise>.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("e{}_{}.json", self.section, self.exercise)
    }
}

impl FromStr for ExerciseLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || LabelError {
            label: s.to_owned(),
        };
        let (section, exercise) = s.split_once('.').ok_or_else(error)?;
        Ok(Self {
            section: parse_number(section).ok_or_else(error)?,
            exercise: parse_number(exercise).ok_or_else(error)?,
        })
    }
}

impl fmt::Display for ExerciseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.exercise)
    }
}

fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
