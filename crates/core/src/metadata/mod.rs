//! Per-node accumulation of tags, links and inline fields.
//!
//! Each page, section, block and list item owns a [`MetadataBuilder`] while the
//! page is being imported; the builder is frozen into an immutable
//! [`Metadata`] snapshot when the page record is assembled.

pub mod collector;
pub mod types;

pub use collector::{Collector, Dedup};
pub use types::{InlineField, Metadata, MetadataBuilder, normalize_tag};
