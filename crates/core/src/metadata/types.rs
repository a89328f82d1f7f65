//! Metadata snapshot and builder types.

use serde::{Deserialize, Serialize};

use crate::literal::{Link, Literal};

use super::collector::Collector;

/// A `key:: value` annotation found in a line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineField {
    /// Key as written, with markdown emphasis removed.
    pub key: String,
    pub value: Literal,
    /// Value text before parsing.
    pub raw: String,
    /// 0-indexed line the field was found on.
    pub line: usize,
}

/// Immutable tags, links and fields of one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub tags: Vec<String>,
    pub links: Vec<Link>,
    pub fields: Vec<InlineField>,
}

impl Metadata {
    /// Case-insensitive field lookup.
    pub fn field(&self, key: &str) -> Option<&InlineField> {
        let key = key.to_lowercase();
        self.fields.iter().find(|f| f.key.to_lowercase() == key)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        self.tags.iter().any(|t| *t == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.links.is_empty() && self.fields.is_empty()
    }
}

/// Mutable accumulator behind a [`Metadata`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct MetadataBuilder {
    tags: Collector<String>,
    links: Collector<Link>,
    fields: Collector<InlineField>,
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tag(&mut self, tag: &str) {
        self.tags.push(normalize_tag(tag));
    }

    pub fn add_link(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Later fields with the same key (ignoring case) are dropped.
    pub fn add_field(&mut self, field: InlineField) {
        self.fields.push(field);
    }

    pub fn finish(self) -> Metadata {
        Metadata {
            tags: self.tags.finish(),
            links: self.links.finish(),
            fields: self.fields.finish(),
        }
    }
}

/// Ensure a tag starts with `#`.
pub fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim();
    if tag.starts_with('#') { tag.to_string() } else { format!("#{tag}") }
}
