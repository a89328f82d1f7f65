//! Host-supplied input: file stats and structural hints.
//!
//! Line numbers are 0-indexed. Hint end lines are inclusive, as the host
//! reports them; the pipeline converts them to half-open positions.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// File timestamps (milliseconds since the Unix epoch) and size in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    pub ctime: i64,
    pub mtime: i64,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingHint {
    pub line: usize,
    pub heading: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHint {
    /// Host block type (`heading`, `list`, `code`, `paragraph`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub line_start: usize,
    pub line_end: usize,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItemHint {
    pub line_start: usize,
    pub line_end: usize,
    /// Negative: minus the start line of the owning list block.
    /// Non-negative: start line of the parent list item.
    pub parent: i64,
    /// Checkbox character for task items.
    #[serde(default)]
    pub task: Option<char>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagHint {
    pub tag: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkHint {
    /// Link target as written (`note`, `note#Heading`, `note#^block`).
    pub link: String,
    pub line: usize,
    #[serde(default)]
    pub display: Option<String>,
}

/// A link declared in frontmatter; it belongs to the page only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontmatterLinkHint {
    /// Frontmatter key the link was found under.
    #[serde(default)]
    pub key: Option<String>,
    pub link: String,
    #[serde(default)]
    pub display: Option<String>,
}

/// Everything the host's structural scanner reports about one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hints {
    pub headings: Vec<HeadingHint>,
    pub blocks: Vec<BlockHint>,
    pub list_items: Vec<ListItemHint>,
    pub tags: Vec<TagHint>,
    pub links: Vec<LinkHint>,
    pub frontmatter_links: Vec<FrontmatterLinkHint>,
    /// Decoded frontmatter document, if the file has one.
    pub frontmatter: Option<Value>,
}

/// A markdown document to import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownImport {
    pub path: String,
    pub contents: String,
    pub stat: FileStat,
    #[serde(default)]
    pub hints: Hints,
}

/// A JSON canvas document to import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasImport {
    pub path: String,
    pub contents: String,
    pub stat: FileStat,
}
