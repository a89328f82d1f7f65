//! First-occurrence-wins collections.

use std::collections::BTreeSet;

use crate::literal::Link;

use super::types::InlineField;

/// Items that know which key makes two of them duplicates.
pub trait Dedup {
    type Key: Ord;

    fn dedup_key(&self) -> Self::Key;
}

impl Dedup for String {
    type Key = String;

    fn dedup_key(&self) -> String {
        self.clone()
    }
}

impl Dedup for Link {
    type Key = Link;

    fn dedup_key(&self) -> Link {
        self.clone()
    }
}

impl Dedup for InlineField {
    type Key = String;

    fn dedup_key(&self) -> String {
        self.key.to_lowercase()
    }
}

/// Insertion-ordered collection that ignores later duplicates.
#[derive(Debug, Clone)]
pub struct Collector<T: Dedup> {
    items: Vec<T>,
    seen: BTreeSet<T::Key>,
}

impl<T: Dedup> Default for Collector<T> {
    fn default() -> Self {
        Self { items: Vec::new(), seen: BTreeSet::new() }
    }
}

impl<T: Dedup> Collector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item` unless an equivalent item is already present.
    /// Returns whether the item was kept.
    pub fn push(&mut self, item: T) -> bool {
        if self.seen.insert(item.dedup_key()) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn finish(self) -> Vec<T> {
        self.items
    }
}
