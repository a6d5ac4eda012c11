//! On-demand SCSS compilation for the Chai website.
//!
//! [`StylePipeline`] serves `<file>.css` compiled from `<file>.scss`. Outputs
//! are stored and reused until their source changes: a stored output whose
//! modification time is greater than or equal to its source's is returned
//! without invoking the compiler.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use chai_storage::FsStorage;
//! use chai_styles::{GrassCompiler, OutputStyle, StylePipeline};
//!
//! let pipeline = StylePipeline::new(
//!     Arc::new(FsStorage::new("static/scss".into())),
//!     Arc::new(FsStorage::new("static/dist".into())),
//!     Arc::new(GrassCompiler::new("static/scss").with_style(OutputStyle::Compressed)),
//! );
//! let sheet = pipeline.stylesheet("book.scss")?;
//! ```

mod compiler;
mod error;
mod pipeline;

pub use compiler::{CompileError, GrassCompiler, OutputStyle, StylesheetCompiler};
pub use error::StyleError;
pub use pipeline::{BuildReport, StylePipeline, Stylesheet};

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(StylePipeline: Send, Sync);
    static_assertions::assert_impl_all!(GrassCompiler: StylesheetCompiler, Send, Sync);
    static_assertions::assert_impl_all!(StyleError: Send, Sync);
}
