//! HTTP request handlers.

pub(crate) mod docs;
pub(crate) mod exercises;
pub(crate) mod pages;
pub(crate) mod styles;
