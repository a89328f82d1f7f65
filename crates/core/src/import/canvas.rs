//! JSON canvas import.
//!
//! A canvas is a board of cards. File cards reference other notes, text cards
//! hold markdown snippets. The resulting page has no sections: everything found
//! on the board belongs to the page itself.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::literal::Link;
use crate::metadata::MetadataBuilder;
use crate::page::Page;

use super::error::ImportError;
use super::fields;
use super::hints::CanvasImport;
use super::markdown::{new_page, split_lines};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    // #tag after start of line or whitespace; purely numeric tags are not tags
    Regex::new(r"(?:^|[\s(,])(#[\p{L}\p{N}_/-]*[\p{L}_/-][\p{L}\p{N}_/-]*)").unwrap()
});

static WIKILINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[\[[^\[\]]+?\]\]").unwrap());

#[derive(Debug, Default, Deserialize)]
struct Canvas {
    #[serde(default)]
    nodes: Vec<CanvasNode>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum CanvasNode {
    Text {
        #[serde(default)]
        text: String,
    },
    File {
        file: String,
        #[serde(default)]
        subpath: Option<String>,
    },
    #[serde(other)]
    Other,
}

/// Import one JSON canvas document.
///
/// Blank contents yield an empty board. Contents that are not a canvas object
/// abort the import.
pub fn import_canvas(request: &CanvasImport) -> Result<Page, ImportError> {
    let canvas: Canvas = if request.contents.trim().is_empty() {
        Canvas::default()
    } else {
        serde_json::from_str(&request.contents)
            .map_err(|source| ImportError::Canvas { path: request.path.clone(), source })?
    };

    let mut metadata = MetadataBuilder::new();
    for node in &canvas.nodes {
        match node {
            CanvasNode::Text { text } => scan_text(text, &mut metadata),
            CanvasNode::File { file, subpath } => {
                let target = format!("{file}{}", subpath.as_deref().unwrap_or_default());
                metadata.add_link(Link::parse_target(&target, None));
            }
            CanvasNode::Other => {}
        }
    }

    let lines = split_lines(&request.contents).len();
    let page = new_page(&request.path, request.stat, lines, None, metadata, Vec::new(), None);
    tracing::debug!(
        path = %page.path,
        nodes = canvas.nodes.len(),
        links = page.metadata.links.len(),
        "imported canvas"
    );
    Ok(page)
}

/// Tags, wiki links and inline fields of a text card. Field lines are
/// numbered within the card.
fn scan_text(text: &str, metadata: &mut MetadataBuilder) {
    for (number, line) in split_lines(text).into_iter().enumerate() {
        for caps in TAG_RE.captures_iter(line) {
            metadata.add_tag(&caps[1]);
        }
        for found in WIKILINK_RE.find_iter(line) {
            if let Some(link) = Link::parse_wiki(found.as_str()) {
                metadata.add_link(link);
            }
        }
        for field in fields::scan_line(line, number) {
            metadata.add_field(field);
        }
    }
}
