//! Block classification and attachment to sections.

use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::parse_data_block;
use crate::interval::{IntervalIndex, Position, Positioned};
use crate::metadata::MetadataBuilder;
use crate::page::{Block, BlockKind, CodeStyle, ListItem};

use super::error::ImportError;
use super::hints::BlockHint;
use super::sections::SectionDraft;

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:`{3,}|~{3,})\s*(.*?)\s*$").unwrap());

static DATA_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:`{3,}|~{3,})\s*yaml:data\s*$").unwrap());

/// A block under construction. List blocks collect their top-level item
/// start lines here until the list tree is materialized.
#[derive(Debug)]
pub(crate) struct BlockDraft {
    pub ordinal: usize,
    pub position: Position,
    pub block_id: Option<String>,
    pub kind: BlockKind,
    pub metadata: MetadataBuilder,
    pub items: Vec<usize>,
}

impl Positioned for BlockDraft {
    fn position(&self) -> Position {
        self.position
    }
}

impl BlockDraft {
    pub fn is_list(&self) -> bool {
        matches!(self.kind, BlockKind::List { .. })
    }

    pub fn finish(self, items: Vec<ListItem>) -> Block {
        let kind = match self.kind {
            BlockKind::List { .. } => BlockKind::List { items },
            other => other,
        };
        Block {
            ordinal: self.ordinal,
            position: self.position,
            block_id: self.block_id,
            metadata: self.metadata.finish(),
            kind,
        }
    }
}

/// Classify every non-heading hint in document order and attach each block to
/// the section containing its first line.
///
/// Blocks outside every section, and later blocks sharing a start line with an
/// earlier one, are dropped.
pub(crate) fn build_blocks(
    hints: &[BlockHint],
    lines: &[&str],
    sections: &mut IntervalIndex<SectionDraft>,
) -> Result<IntervalIndex<BlockDraft>, ImportError> {
    let mut hints: Vec<&BlockHint> = hints.iter().filter(|h| h.kind != "heading").collect();
    hints.sort_by_key(|h| h.line_start);

    let mut blocks = IntervalIndex::new();
    let mut ordinal = 1;

    for hint in hints {
        if blocks.contains_key(hint.line_start) {
            tracing::debug!(
                line = hint.line_start,
                kind = %hint.kind,
                "dropping duplicate block"
            );
            continue;
        }

        let (next, block) = classify(hint, ordinal, lines)?;
        ordinal = next;

        let start = block.position.start;
        match sections.containing_mut(start) {
            Some(section) => {
                section.blocks.push(start);
                blocks.insert(start, block);
            }
            None => {
                tracing::debug!(
                    line = start,
                    kind = %hint.kind,
                    "dropping block outside any section"
                );
            }
        }
    }

    Ok(blocks)
}

/// Classify one hint, returning the next free ordinal alongside the block.
pub(crate) fn classify(
    hint: &BlockHint,
    ordinal: usize,
    lines: &[&str],
) -> Result<(usize, BlockDraft), ImportError> {
    let position = Position::from_inclusive(hint.line_start, hint.line_end);
    let first = lines.get(position.start).copied().unwrap_or_default();

    let kind = match hint.kind.as_str() {
        "list" => BlockKind::List { items: Vec::new() },
        "code" if DATA_FENCE_RE.is_match(first) => {
            let body = fence_body(lines, position);
            let data = parse_data_block(&body)
                .map_err(|source| ImportError::DataBlock { line: position.start, source })?;
            BlockKind::Data { data }
        }
        "code" => code_block(first, position),
        other => BlockKind::Generic { kind: other.to_string() },
    };

    let block = BlockDraft {
        ordinal,
        position,
        block_id: hint.id.clone(),
        kind,
        metadata: MetadataBuilder::new(),
        items: Vec::new(),
    };
    Ok((ordinal + 1, block))
}

fn code_block(first: &str, position: Position) -> BlockKind {
    match FENCE_RE.captures(first) {
        Some(caps) => {
            let languages = caps
                .get(1)
                .map_or("", |m| m.as_str())
                .split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            BlockKind::Code {
                languages,
                style: CodeStyle::Fenced,
                content: fenced_content(position),
            }
        }
        None => BlockKind::Code {
            languages: Vec::new(),
            style: CodeStyle::Indented,
            content: position,
        },
    }
}

/// Lines strictly between the opening and closing fence.
fn fenced_content(position: Position) -> Position {
    Position::new(position.start + 1, position.end.saturating_sub(1))
}

fn fence_body(lines: &[&str], position: Position) -> String {
    let content = fenced_content(position);
    let end = content.end.min(lines.len());
    let start = content.start.min(end);
    lines[start..end].join("\n")
}
