//! Documentation groups for the Chai website.
//!
//! A group (the book, the guide, the language specification, the tour) is a
//! directory of numbered markdown documents. This crate turns such a
//! directory into a [`Navigation`] tree for the aside and answers
//! previous/next queries for the links at the foot of each page.
//!
//! # Layouts
//!
//! | [`GroupLayout`] | Pages | Chapter titles |
//! |---|---|---|
//! | `Sectioned` | `chapter<N>/section<M>.md` | line N of `titles.txt` |
//! | `Flat` | `chapter<N>.md` | first line of the chapter |
//! | `Nested { file }` | `chapter<N>/<file>` | first line of the chapter |
//!
//! Every group also has an `index.md`. Ordinals are 1-based and must be
//! contiguous.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chai_docs::{DocGroup, GroupLayout, GroupSpec, Position};
//! use chai_storage::{MockStorage, Storage};
//!
//! let storage: Arc<dyn Storage> = Arc::new(
//!     MockStorage::new()
//!         .with_file("book/index.md", "# Introduction")
//!         .with_file("book/titles.txt", "Basics")
//!         .with_file("book/chapter1/section1.md", "# Variables")
//!         .with_file("book/chapter1/section2.md", "# Functions"),
//! );
//! let spec = GroupSpec::new("book", "The Chai Book", GroupLayout::Sectioned);
//! let group = DocGroup::load(storage, spec).unwrap();
//!
//! let adjacent = group.navigation().adjacent(Position::Section { chapter: 1, section: 1 });
//! assert_eq!(adjacent.previous.unwrap().position, Position::Index);
//! assert_eq!(adjacent.next.unwrap().href, "/docs/book/chapter1/section2");
//! ```

mod builder;
mod error;
mod group;
mod layout;
mod navigation;
mod position;

pub use builder::build_navigation;
pub use error::ContentError;
pub use group::{DocGroup, DocsCatalog};
pub use layout::{GroupLayout, GroupSpec, TITLES_FILE};
pub use navigation::{Adjacent, Chapter, NavLink, Navigation, Section};
pub use position::{PathError, Position};
