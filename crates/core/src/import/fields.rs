//! Inline `key:: value` field scanning.

use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::strip_emphasis;
use crate::literal::parse_inline_value;
use crate::metadata::InlineField;

/// Lines longer than this many characters are never scanned.
pub const MAX_FIELD_LINE_LEN: usize = 32_768;

const FIELD_DELIMITER: &str = "::";

static FULL_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Optional quote markers, list marker and task checkbox before the key
    Regex::new(
        r"^\s*(?:>\s*)*(?:(?:[-*+]|\d+[.)])\s+)?(?:\[.\]\s+)?(?P<key>[^:\[\]()]+?)::\s*(?P<value>.*)$",
    )
    .unwrap()
});

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}_/\-.' ]+$").unwrap());

/// Scan every line of a document for inline fields.
pub fn scan(lines: &[&str]) -> Vec<InlineField> {
    lines.iter().enumerate().flat_map(|(number, line)| scan_line(line, number)).collect()
}

/// Scan one line: bracketed `[key:: value]` / `(key:: value)` fields first,
/// and only when there are none, the whole line as `key:: value`.
pub fn scan_line(line: &str, number: usize) -> Vec<InlineField> {
    if !line.contains(FIELD_DELIMITER) {
        return Vec::new();
    }
    if line.len() > MAX_FIELD_LINE_LEN && line.chars().count() > MAX_FIELD_LINE_LEN {
        tracing::trace!(line = number, "skipping overlong line");
        return Vec::new();
    }

    let fields = scan_bracketed(line, number);
    if !fields.is_empty() {
        return fields;
    }
    full_line_field(line, number).into_iter().collect()
}

fn scan_bracketed(line: &str, number: usize) -> Vec<InlineField> {
    let mut fields = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = line[cursor..].find(['[', '(']) {
        let open = cursor + offset;
        let Some(close) = matching_close(line, open) else {
            cursor = open + 1;
            continue;
        };

        // Wiki links are skipped whole so their contents are never read as fields
        if line[open..].starts_with("[[") {
            cursor = close + 1;
        } else if let Some(field) = bracketed_field(&line[open + 1..close], number) {
            fields.push(field);
            cursor = close + 1;
        } else {
            cursor = open + 1;
        }
    }
    fields
}

/// Byte index of the bracket closing the one at byte `open`, counting nesting.
fn matching_close(line: &str, open: usize) -> Option<usize> {
    let (open_ch, close_ch) = match line[open..].chars().next()? {
        '[' => ('[', ']'),
        '(' => ('(', ')'),
        _ => return None,
    };

    let mut depth = 0usize;
    for (i, c) in line[open..].char_indices() {
        if c == open_ch {
            depth += 1;
        } else if c == close_ch {
            depth -= 1;
            if depth == 0 {
                return Some(open + i);
            }
        }
    }
    None
}

fn bracketed_field(inner: &str, number: usize) -> Option<InlineField> {
    let (key, value) = inner.split_once(FIELD_DELIMITER)?;
    let key = field_key(key)?;
    Some(field(key, value, number))
}

fn full_line_field(line: &str, number: usize) -> Option<InlineField> {
    let caps = FULL_LINE_RE.captures(line)?;
    let key = field_key(caps.name("key")?.as_str())?;
    Some(field(key, caps.name("value")?.as_str(), number))
}

fn field_key(raw: &str) -> Option<&str> {
    let key = strip_emphasis(raw);
    (!key.is_empty() && KEY_RE.is_match(key)).then_some(key)
}

fn field(key: &str, value: &str, line: usize) -> InlineField {
    let raw = value.trim();
    InlineField {
        key: key.to_string(),
        value: parse_inline_value(raw),
        raw: raw.to_string(),
        line,
    }
}
