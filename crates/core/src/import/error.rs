//! Import errors.

use thiserror::Error;

use crate::frontmatter::FrontmatterParseError;

/// Conditions that abort the import of a whole document.
///
/// Everything else (orphaned list items, unknown block types, unrecognized
/// values) degrades silently and never surfaces here.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid data block on line {}: {source}", .line + 1)]
    DataBlock {
        /// 0-indexed line of the opening fence.
        line: usize,
        #[source]
        source: FrontmatterParseError,
    },

    #[error("invalid canvas {path}: {source}")]
    Canvas {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
