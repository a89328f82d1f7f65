//! Frontmatter types and data structures.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::literal::Literal;

/// One key of a frontmatter or data-block map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEntry {
    /// Key as written in the document.
    pub key: String,
    /// Coerced value.
    pub value: Literal,
    /// Value as decoded from YAML, before coercion.
    pub raw: Value,
}

/// Entries keyed by canonical key.
pub type DataMap = BTreeMap<String, DataEntry>;

static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\*\*(.+)\*\*|__(.+)__|\*(.+)\*|_(.+)_)$").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip wrapping markdown emphasis (`**key**`, `_key_`, ...) from a key.
pub fn strip_emphasis(key: &str) -> &str {
    let key = key.trim();
    EMPHASIS_RE
        .captures(key)
        .and_then(|caps| caps.iter().skip(1).flatten().next())
        .map_or(key, |m| m.as_str().trim())
}

/// Lookup form of a key: emphasis removed, lowercased, whitespace runs as `-`.
pub fn canonicalize_key(key: &str) -> String {
    WHITESPACE_RE.replace_all(&strip_emphasis(key).to_lowercase(), "-").into_owned()
}
