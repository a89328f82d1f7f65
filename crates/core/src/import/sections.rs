//! Section building from heading hints.

use crate::interval::{IntervalIndex, Position, Positioned};
use crate::metadata::MetadataBuilder;
use crate::page::{Block, Section};

use super::hints::HeadingHint;

/// A section under construction.
#[derive(Debug)]
pub(crate) struct SectionDraft {
    pub title: String,
    pub level: u8,
    pub ordinal: usize,
    pub position: Position,
    pub metadata: MetadataBuilder,
    /// Start lines of the blocks attached to this section, in order.
    pub blocks: Vec<usize>,
}

impl Positioned for SectionDraft {
    fn position(&self) -> Position {
        self.position
    }
}

impl SectionDraft {
    fn new(title: String, level: u8, ordinal: usize, position: Position) -> Self {
        Self {
            title,
            level,
            ordinal,
            position,
            metadata: MetadataBuilder::new(),
            blocks: Vec::new(),
        }
    }

    pub fn finish(self, blocks: Vec<Block>) -> Section {
        Section {
            title: self.title,
            level: self.level,
            ordinal: self.ordinal,
            position: self.position,
            metadata: self.metadata.finish(),
            blocks,
        }
    }
}

/// Partition the file into sections.
///
/// Each heading runs until the next heading or the end of the file. Lines
/// before the first heading form an implicit level-1 section titled
/// `file_title`, unless they are all blank.
pub(crate) fn build_sections(
    headings: &[HeadingHint],
    lines: &[&str],
    file_title: &str,
) -> IntervalIndex<SectionDraft> {
    let total = lines.len();

    let mut headings: Vec<&HeadingHint> = headings.iter().filter(|h| h.line < total).collect();
    headings.sort_by_key(|h| h.line);
    headings.dedup_by_key(|h| h.line);

    let mut sections = IntervalIndex::new();

    let first = headings.first().map_or(total, |h| h.line);
    if first > 0 && !is_blank(&lines[..first]) {
        let implicit = SectionDraft::new(file_title.to_string(), 1, 0, Position::new(0, first));
        sections.insert(0, implicit);
    }

    for (i, heading) in headings.iter().enumerate() {
        let end = headings.get(i + 1).map_or(total, |next| next.line);
        let section = SectionDraft::new(
            heading.heading.trim().to_string(),
            heading.level,
            i + 1,
            Position::new(heading.line, end),
        );
        sections.insert(heading.line, section);
    }

    tracing::trace!(count = sections.len(), "built sections");
    sections
}

/// A range is blank when every line is empty after trimming.
pub(crate) fn is_blank(lines: &[&str]) -> bool {
    lines.iter().all(|l| l.trim().is_empty())
}
