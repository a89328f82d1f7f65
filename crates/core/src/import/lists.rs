//! Two-pass reconstruction of nested list and task trees.
//!
//! The host reports list items as a flat stream in which each item names its
//! parent by start line, and that parent may appear earlier or later in the
//! stream. Pass one stores every item in an arena keyed by start line; pass
//! two resolves parent references into child lists of that arena (or of a list
//! block). The finished tree is materialized recursively from the list blocks.

use crate::interval::{IntervalIndex, Position, Positioned};
use crate::metadata::MetadataBuilder;
use crate::page::{ListItem, ParentRef};

use super::blocks::BlockDraft;
use super::hints::ListItemHint;

#[derive(Debug)]
pub(crate) struct ItemDraft {
    pub position: Position,
    pub parent: ParentRef,
    pub status: Option<char>,
    pub block_id: Option<String>,
    pub metadata: MetadataBuilder,
    /// Start lines of resolved children, in encounter order.
    pub children: Vec<usize>,
}

impl Positioned for ItemDraft {
    fn position(&self) -> Position {
        self.position
    }
}

impl ItemDraft {
    fn finish(self, children: Vec<ListItem>) -> ListItem {
        ListItem {
            position: self.position,
            parent: self.parent,
            status: self.status,
            block_id: self.block_id,
            metadata: self.metadata.finish(),
            children,
        }
    }
}

/// Flat store of list items keyed by start line.
#[derive(Debug, Default)]
pub(crate) struct ListArena {
    pub items: IntervalIndex<ItemDraft>,
    /// Start lines in the order the host reported them.
    order: Vec<usize>,
}

impl ListArena {
    /// Pass one: create every item. Later items reusing a start line are dropped.
    pub fn from_hints(hints: &[ListItemHint]) -> Self {
        let mut arena = Self::default();
        for hint in hints {
            if arena.items.contains_key(hint.line_start) {
                tracing::debug!(line = hint.line_start, "dropping duplicate list item");
                continue;
            }
            let item = ItemDraft {
                position: Position::from_inclusive(hint.line_start, hint.line_end),
                parent: ParentRef::from_code(hint.parent),
                status: hint.task,
                block_id: hint.id.clone(),
                metadata: MetadataBuilder::new(),
                children: Vec::new(),
            };
            arena.items.insert(hint.line_start, item);
            arena.order.push(hint.line_start);
        }
        arena
    }

    /// Pass two: link every item under its parent list block or list item.
    ///
    /// Items whose parent does not exist (or is not a list block) stay in the
    /// arena but are never reached when the tree is materialized. An item
    /// naming itself as parent is the host's encoding of a list starting on
    /// line 0 and is read as a block reference.
    pub fn link(&mut self, blocks: &mut IntervalIndex<BlockDraft>) {
        for &start in &self.order {
            let Some(item) = self.items.get_mut(start) else { continue };
            if item.parent == ParentRef::Item(start) {
                item.parent = ParentRef::Block(start);
            }
            let parent = item.parent;

            match parent {
                ParentRef::Block(line) => match blocks.get_mut(line) {
                    Some(block) if block.is_list() => block.items.push(start),
                    _ => tracing::debug!(line = start, block = line, "orphaned list item"),
                },
                ParentRef::Item(line) => match self.items.get_mut(line) {
                    Some(parent) => parent.children.push(start),
                    None => tracing::debug!(line = start, parent = line, "orphaned list item"),
                },
            }
        }
    }

    /// Remove the items rooted at `roots` from the arena as finished trees.
    pub fn take_tree(&mut self, roots: &[usize]) -> Vec<ListItem> {
        roots.iter().filter_map(|&start| self.take(start)).collect()
    }

    fn take(&mut self, start: usize) -> Option<ListItem> {
        let draft = self.items.remove(start)?;
        let children = self.take_tree(&draft.children);
        Some(draft.finish(children))
    }

    /// Items not yet materialized.
    pub fn remaining(&self) -> usize {
        self.items.len()
    }
}
