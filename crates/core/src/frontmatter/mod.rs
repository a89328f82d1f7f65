//! Frontmatter and YAML data-block parsing into literal-valued maps.
//!
//! This module provides functionality to:
//! - Canonicalize display keys into lookup keys
//! - Convert a decoded YAML document into a [`DataMap`]
//! - Parse the body of a `yaml:data` fenced block

pub mod parser;
pub mod types;

pub use parser::{FrontmatterParseError, data_map, parse_data_block};
pub use types::{DataEntry, DataMap, canonicalize_key, strip_emphasis};
