//! Literal, duration and link types.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A fully typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Literal {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Date(DateTime<FixedOffset>),
    Duration(Duration),
    Link(Link),
    List(Vec<Literal>),
    Map(BTreeMap<String, Literal>),
}

impl Literal {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Self::Link(l) => Some(l),
            _ => None,
        }
    }

    /// Short lowercase name of the variant, matching the serialized `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Duration(_) => "duration",
            Self::Link(_) => "link",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

/// A calendar duration, kept per unit rather than normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Duration {
    pub years: f64,
    pub months: f64,
    pub weeks: f64,
    pub days: f64,
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub milliseconds: f64,
}

/// What part of the target file a link points at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    #[default]
    File,
    Heading,
    Block,
}

/// A link to another note, optionally to a heading or block inside it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Target path as written (no `.md` resolution is performed).
    pub path: String,
    /// Alias shown instead of the path.
    pub display: Option<String>,
    /// Heading text or block id (without the `^`).
    pub subpath: Option<String>,
    pub kind: LinkKind,
    /// `![[...]]` embeds rather than references.
    pub embed: bool,
}

static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Whole-string [[target]], [[target|alias]], optionally prefixed with ! for embeds
    Regex::new(r"^(!)?\[\[([^\[\]]+?)\]\]$").unwrap()
});

impl Link {
    /// Plain link to a file.
    pub fn file(path: impl Into<String>) -> Self {
        Self { path: path.into(), display: None, subpath: None, kind: LinkKind::File, embed: false }
    }

    /// Build a link from a host-reported target such as `note#Heading` or
    /// `note#^block-id`.
    pub fn parse_target(target: &str, display: Option<&str>) -> Self {
        let (path, subpath, kind) = match target.split_once('#') {
            Some((path, sub)) => match sub.strip_prefix('^') {
                Some(block) if !block.is_empty() => {
                    (path, Some(block.to_string()), LinkKind::Block)
                }
                _ if !sub.trim().is_empty() => {
                    (path, Some(sub.trim().to_string()), LinkKind::Heading)
                }
                _ => (path, None, LinkKind::File),
            },
            None => (target, None, LinkKind::File),
        };

        let display = display.map(str::trim).filter(|d| !d.is_empty()).map(str::to_string);

        Self { path: path.trim().to_string(), display, subpath, kind, embed: false }
    }

    /// Parse a complete wiki link string (`[[target|alias]]`, `![[target]]`).
    pub fn parse_wiki(s: &str) -> Option<Self> {
        let caps = WIKILINK_RE.captures(s.trim())?;
        let embed = caps.get(1).is_some();
        let inner = caps.get(2)?.as_str();

        let (target, display) = match inner.split_once('|') {
            Some((t, d)) => (t, Some(d)),
            None => (inner, None),
        };

        let mut link = Self::parse_target(target, display);
        link.embed = embed;
        Some(link)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.embed {
            f.write_str("!")?;
        }
        write!(f, "[[{}", self.path)?;
        match (&self.kind, &self.subpath) {
            (LinkKind::Heading, Some(sub)) => write!(f, "#{sub}")?,
            (LinkKind::Block, Some(sub)) => write!(f, "#^{sub}")?,
            _ => {}
        }
        if let Some(display) = &self.display {
            write!(f, "|{display}")?;
        }
        f.write_str("]]")
    }
}
