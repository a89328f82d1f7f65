#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss
)]

//! Structural import of markdown notes into position-indexed page records.

pub mod config;
pub mod frontmatter;
pub mod import;
pub mod interval;
pub mod literal;
pub mod metadata;
pub mod page;
pub mod worker;

pub use import::{ImportError, import_canvas, import_markdown};
pub use page::Page;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
