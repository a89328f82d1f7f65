//! Line-keyed interval index.
//!
//! Every "which section/block/item owns line L" question in the import
//! pipeline is answered by a floor lookup on a start-line keyed map followed
//! by a bounds check on the candidate's half-open position.

use std::collections::BTreeMap;
use std::collections::btree_map::{IntoValues, Values};

use serde::{Deserialize, Serialize};

/// Half-open line interval `[start, end)`, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

impl Position {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end: end.max(start) }
    }

    /// Build from a host position whose end line is inclusive.
    pub fn from_inclusive(start: usize, line_end: usize) -> Self {
        Self::new(start, line_end.saturating_add(1))
    }

    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line < self.end
    }

    /// Number of lines covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Anything stored in an [`IntervalIndex`] that knows its own extent.
pub trait Positioned {
    fn position(&self) -> Position;
}

impl Positioned for Position {
    fn position(&self) -> Position {
        *self
    }
}

/// Ordered map from start line to a positioned value.
#[derive(Debug, Clone)]
pub struct IntervalIndex<T> {
    entries: BTreeMap<usize, T>,
}

impl<T> Default for IntervalIndex<T> {
    fn default() -> Self {
        Self { entries: BTreeMap::new() }
    }
}

impl<T> IntervalIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` keyed by `start`, returning whatever was stored there before.
    pub fn insert(&mut self, start: usize, value: T) -> Option<T> {
        self.entries.insert(start, value)
    }

    pub fn get(&self, start: usize) -> Option<&T> {
        self.entries.get(&start)
    }

    pub fn get_mut(&mut self, start: usize) -> Option<&mut T> {
        self.entries.get_mut(&start)
    }

    pub fn contains_key(&self, start: usize) -> bool {
        self.entries.contains_key(&start)
    }

    pub fn remove(&mut self, start: usize) -> Option<T> {
        self.entries.remove(&start)
    }

    /// Entry with the greatest start line `<= line`.
    pub fn floor(&self, line: usize) -> Option<(usize, &T)> {
        self.entries.range(..=line).next_back().map(|(k, v)| (*k, v))
    }

    /// Values in ascending start-line order.
    pub fn values(&self) -> Values<'_, usize, T> {
        self.entries.values()
    }

    pub fn into_values(self) -> IntoValues<usize, T> {
        self.entries.into_values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Positioned> IntervalIndex<T> {
    /// The value whose position contains `line`, if any.
    ///
    /// Only the floor candidate is considered: if it ends at or before `line`
    /// there is no containing element, even when an earlier, wider element
    /// would cover the line.
    pub fn containing(&self, line: usize) -> Option<&T> {
        self.floor(line).map(|(_, v)| v).filter(|v| v.position().end > line)
    }

    pub fn containing_mut(&mut self, line: usize) -> Option<&mut T> {
        self.entries
            .range_mut(..=line)
            .next_back()
            .map(|(_, v)| v)
            .filter(|v| v.position().end > line)
    }
}
