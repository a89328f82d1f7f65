//! The closed literal value type and the coercion of untyped values into it.
//!
//! Frontmatter values, data-block values and inline-field values all end up as
//! a [`Literal`]. Coercion is total: anything that cannot be recognized
//! becomes [`Literal::Null`] or stays a plain string.

pub mod coerce;
pub mod parse;
pub mod types;

pub use coerce::{Coerce, coerce_str};
pub use parse::{parse_date, parse_duration, parse_inline_value};
pub use types::{Duration, Link, LinkKind, Literal};
