//! Structural import of one document into a [`Page`](crate::page::Page).
//!
//! The host supplies raw text plus structural hints (headings, blocks, list
//! items, tags, links, frontmatter). The pipeline runs in fixed stages:
//!
//! 1. sections partition the file by heading,
//! 2. blocks are classified and attached to their section,
//! 3. list items are linked into trees under their list block,
//! 4. tags, links and inline fields attach to every node containing them,
//! 5. frontmatter is coerced and the page is assembled.
//!
//! Importing is pure: the same request always produces the same page.

mod blocks;
mod canvas;
mod error;
mod extract;
mod fields;
mod hints;
mod lists;
mod markdown;
mod sections;

pub use canvas::import_canvas;
pub use error::ImportError;
pub use fields::{MAX_FIELD_LINE_LEN, scan as scan_fields};
pub use hints::{
    BlockHint, CanvasImport, FileStat, FrontmatterLinkHint, HeadingHint, Hints, LinkHint,
    ListItemHint, MarkdownImport, TagHint,
};
pub use markdown::import_markdown;
