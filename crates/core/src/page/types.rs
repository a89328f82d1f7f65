//! Page, section, block and list item records.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::frontmatter::DataMap;
use crate::interval::Position;
use crate::metadata::Metadata;

/// One imported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Vault-relative path.
    pub path: String,
    pub ctime: DateTime<Utc>,
    pub mtime: DateTime<Utc>,
    /// Size in bytes.
    pub size: u64,
    /// File extension without the dot.
    pub extension: String,
    /// Total number of lines in the raw text.
    pub lines: usize,
    /// Date the note is about, from its file name or `date` frontmatter key.
    pub day: Option<DateTime<FixedOffset>>,
    /// Page-wide tags, links and inline fields.
    #[serde(flatten)]
    pub metadata: Metadata,
    pub sections: Vec<Section>,
    pub frontmatter: Option<DataMap>,
}

impl Page {
    /// All blocks in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections.iter().flat_map(|s| s.blocks.iter())
    }

    /// All list items, each parent before its children.
    pub fn list_items(&self) -> Vec<&ListItem> {
        let mut out = Vec::new();
        for block in self.blocks() {
            if let BlockKind::List { items } = &block.kind {
                for item in items {
                    item.walk(&mut out);
                }
            }
        }
        out
    }

    /// The section whose position contains `line`.
    pub fn section_at(&self, line: usize) -> Option<&Section> {
        self.sections.iter().find(|s| s.position.contains(line))
    }
}

/// A heading-delimited region, or the implicit region before the first heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Heading level; the implicit section uses 1.
    pub level: u8,
    /// 0 for the implicit section, otherwise 1-based in document order.
    pub ordinal: usize,
    pub position: Position,
    #[serde(flatten)]
    pub metadata: Metadata,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn is_implicit(&self) -> bool {
        self.ordinal == 0
    }
}

/// A structural unit inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Page-wide document-order number, starting at 1.
    pub ordinal: usize,
    pub position: Position,
    /// Persistent `^id` of the block, if any.
    pub block_id: Option<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
    #[serde(flatten)]
    pub kind: BlockKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockKind {
    List {
        items: Vec<ListItem>,
    },
    Code {
        languages: Vec<String>,
        style: CodeStyle,
        /// Lines holding the code itself, without fences.
        content: Position,
    },
    Data {
        data: DataMap,
    },
    Generic {
        /// Host block type, verbatim.
        kind: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStyle {
    Fenced,
    Indented,
}

/// Where a list item hangs in the list tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "line", rename_all = "lowercase")]
pub enum ParentRef {
    /// Top-level item of the list block starting at this line.
    Block(usize),
    /// Child of the list item starting at this line.
    Item(usize),
}

impl ParentRef {
    /// Decode the host's signed parent code: `-X` is the list block at line
    /// `X`, a non-negative `Y` is the list item at line `Y`.
    pub fn from_code(code: i64) -> Self {
        let line = usize::try_from(code.unsigned_abs()).unwrap_or(usize::MAX);
        if code < 0 { Self::Block(line) } else { Self::Item(line) }
    }
}

/// A list or task item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub position: Position,
    pub parent: ParentRef,
    /// Task checkbox character; `None` for a plain list item.
    pub status: Option<char>,
    pub block_id: Option<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
    pub children: Vec<ListItem>,
}

impl ListItem {
    pub fn is_task(&self) -> bool {
        self.status.is_some()
    }

    /// Whether the task is checked (any status other than a space).
    pub fn is_completed(&self) -> bool {
        self.status.is_some_and(|s| s != ' ')
    }

    fn walk<'a>(&'a self, out: &mut Vec<&'a ListItem>) {
        out.push(self);
        for child in &self.children {
            child.walk(out);
        }
    }
}
