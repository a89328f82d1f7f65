//! Attachment of tags, links and inline fields to the nodes that contain them.

use crate::interval::IntervalIndex;
use crate::literal::Link;
use crate::metadata::{InlineField, MetadataBuilder};

use super::blocks::BlockDraft;
use super::fields;
use super::hints::Hints;
use super::lists::ListArena;
use super::sections::SectionDraft;

/// Something found on a line that belongs to the nodes containing that line.
#[derive(Debug, Clone)]
pub(crate) enum Discovery {
    Tag(String),
    Link(Link),
    Field(InlineField),
}

impl Discovery {
    fn apply(&self, metadata: &mut MetadataBuilder) {
        match self {
            Self::Tag(tag) => metadata.add_tag(tag),
            Self::Link(link) => metadata.add_link(link.clone()),
            Self::Field(field) => metadata.add_field(field.clone()),
        }
    }
}

/// Every node of a page under construction, each granularity in its own index.
#[derive(Debug)]
pub(crate) struct Nodes {
    pub page: MetadataBuilder,
    pub sections: IntervalIndex<SectionDraft>,
    pub blocks: IntervalIndex<BlockDraft>,
    pub lists: ListArena,
}

impl Nodes {
    /// Attach to the list item, block and section containing `line`, each
    /// looked up independently, and always to the page.
    pub fn attach(&mut self, line: usize, discovery: &Discovery) {
        if let Some(item) = self.lists.items.containing_mut(line) {
            discovery.apply(&mut item.metadata);
        }
        if let Some(block) = self.blocks.containing_mut(line) {
            discovery.apply(&mut block.metadata);
        }
        if let Some(section) = self.sections.containing_mut(line) {
            discovery.apply(&mut section.metadata);
        }
        discovery.apply(&mut self.page);
    }
}

/// Run every line-scan extractor over the document.
pub(crate) fn extract(nodes: &mut Nodes, hints: &Hints, lines: &[&str]) {
    for tag in &hints.tags {
        nodes.attach(tag.line, &Discovery::Tag(tag.tag.clone()));
    }

    for link in &hints.links {
        let parsed = Link::parse_target(&link.link, link.display.as_deref());
        nodes.attach(link.line, &Discovery::Link(parsed));
    }

    for link in &hints.frontmatter_links {
        nodes.page.add_link(Link::parse_target(&link.link, link.display.as_deref()));
    }

    for field in fields::scan(lines) {
        nodes.attach(field.line, &Discovery::Field(field));
    }
}
