//! The immutable page record produced by an import.

pub mod types;

pub use types::{Block, BlockKind, CodeStyle, ListItem, Page, ParentRef, Section};
