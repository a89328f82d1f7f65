//! Frontmatter and data-block parsing.

use serde_yaml::Value;
use thiserror::Error;

use super::types::{DataEntry, DataMap, canonicalize_key};
use crate::literal::Coerce;
use crate::literal::coerce::yaml_key;

/// Errors that can occur while parsing an embedded YAML document.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("expected a key/value mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Build a [`DataMap`] from a decoded YAML mapping.
///
/// Non-mapping documents produce an empty map; keys that cannot be
/// stringified are skipped. When two keys canonicalize to the same lookup key
/// the first one wins.
pub fn data_map(value: &Value) -> DataMap {
    let mut map = DataMap::new();
    let Value::Mapping(mapping) = value else {
        return map;
    };

    for (key, raw) in mapping {
        let Some(key) = yaml_key(key) else { continue };
        map.entry(canonicalize_key(&key)).or_insert_with(|| DataEntry {
            value: raw.coerce(),
            raw: raw.clone(),
            key,
        });
    }
    map
}

/// Parse the body of a `yaml:data` block.
///
/// Tabs are replaced by two spaces before parsing, so tab-indented data
/// blocks are accepted. An empty body is an empty map.
pub fn parse_data_block(body: &str) -> Result<DataMap, FrontmatterParseError> {
    let normalized = body.replace('\t', "  ");
    if normalized.trim().is_empty() {
        return Ok(DataMap::new());
    }

    let value: Value = serde_yaml::from_str(&normalized)?;
    match value {
        Value::Mapping(_) => Ok(data_map(&value)),
        Value::Null => Ok(DataMap::new()),
        other => Err(FrontmatterParseError::NotAMapping(kind_name(&other))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
