//! Markdown page assembly.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;

use crate::frontmatter::{DataMap, data_map};
use crate::literal::parse_date;
use crate::metadata::MetadataBuilder;
use crate::page::{Page, Section};

use super::blocks::build_blocks;
use super::error::ImportError;
use super::extract::{Nodes, extract};
use super::hints::{FileStat, MarkdownImport};
use super::lists::ListArena;
use super::sections::build_sections;

static FILE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

/// Import one markdown document.
///
/// Pure and synchronous: the only failure is a malformed `yaml:data` block,
/// which aborts the whole import. All other inconsistencies in the host hints
/// are dropped silently.
pub fn import_markdown(request: &MarkdownImport) -> Result<Page, ImportError> {
    let lines = split_lines(&request.contents);
    let hints = &request.hints;
    let title = file_title(&request.path);

    let mut sections = build_sections(&hints.headings, &lines, &title);
    let mut blocks = build_blocks(&hints.blocks, &lines, &mut sections)?;
    let mut lists = ListArena::from_hints(&hints.list_items);
    lists.link(&mut blocks);

    let mut nodes = Nodes { page: MetadataBuilder::new(), sections, blocks, lists };
    extract(&mut nodes, hints, &lines);

    let frontmatter = hints.frontmatter.as_ref().map(data_map);
    let day = infer_day(&title, frontmatter.as_ref());

    let Nodes { page, sections, mut blocks, mut lists } = nodes;
    let sections: Vec<Section> = sections
        .into_values()
        .map(|section| {
            let finished = section
                .blocks
                .iter()
                .filter_map(|&start| blocks.remove(start))
                .map(|block| {
                    let items = lists.take_tree(&block.items);
                    block.finish(items)
                })
                .collect();
            section.finish(finished)
        })
        .collect();

    if lists.remaining() > 0 {
        tracing::debug!(path = %request.path, orphans = lists.remaining(), "dropped list items");
    }

    let page = new_page(&request.path, request.stat, lines.len(), day, page, sections, frontmatter);
    tracing::debug!(
        path = %page.path,
        lines = page.lines,
        sections = page.sections.len(),
        blocks = page.blocks().count(),
        "imported markdown page"
    );
    Ok(page)
}

pub(crate) fn new_page(
    path: &str,
    stat: FileStat,
    lines: usize,
    day: Option<DateTime<FixedOffset>>,
    metadata: MetadataBuilder,
    sections: Vec<Section>,
    frontmatter: Option<DataMap>,
) -> Page {
    Page {
        path: path.to_string(),
        ctime: timestamp(stat.ctime),
        mtime: timestamp(stat.mtime),
        size: stat.size,
        extension: Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string(),
        lines,
        day,
        metadata: metadata.finish(),
        sections,
        frontmatter,
    }
}

/// Split raw text into lines, tolerating CRLF endings.
pub(crate) fn split_lines(contents: &str) -> Vec<&str> {
    contents.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect()
}

/// File name without directories or extension.
pub(crate) fn file_title(path: &str) -> String {
    Path::new(path).file_stem().and_then(|s| s.to_str()).unwrap_or(path).to_string()
}

/// The date a note is about: a `YYYY-MM-DD` in its file name, else a `date`
/// frontmatter value that coerced to a date.
pub(crate) fn infer_day(
    title: &str,
    frontmatter: Option<&DataMap>,
) -> Option<DateTime<FixedOffset>> {
    FILE_DATE_RE
        .find(title)
        .and_then(|m| parse_date(m.as_str()))
        .or_else(|| frontmatter?.get("date")?.value.as_date().copied())
}

fn timestamp(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}
