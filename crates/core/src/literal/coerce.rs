//! Total coercion from decoded documents into [`Literal`].

use serde_yaml::Value as YamlValue;

use super::parse::{parse_date, parse_duration};
use super::types::{Link, Literal};

/// Conversion of a decoded value into the literal type system.
///
/// Implementations never fail: unrecognized shapes become [`Literal::Null`].
/// Coercing a [`Literal`] again yields an equal literal.
pub trait Coerce {
    fn coerce(&self) -> Literal;
}

/// Coerce a bare string: date, then duration, then wiki link, else the string itself.
pub fn coerce_str(s: &str) -> Literal {
    let trimmed = s.trim();
    if let Some(date) = parse_date(trimmed) {
        Literal::Date(date)
    } else if let Some(duration) = parse_duration(trimmed) {
        Literal::Duration(duration)
    } else if let Some(link) = Link::parse_wiki(trimmed) {
        Literal::Link(link)
    } else {
        Literal::String(s.to_string())
    }
}

fn number(n: Option<f64>) -> Literal {
    n.filter(|n| n.is_finite()).map_or(Literal::Null, Literal::Number)
}

impl Coerce for YamlValue {
    fn coerce(&self) -> Literal {
        match self {
            YamlValue::Null => Literal::Null,
            YamlValue::Bool(b) => Literal::Boolean(*b),
            YamlValue::Number(n) => number(n.as_f64()),
            YamlValue::String(s) => coerce_str(s),
            YamlValue::Sequence(items) => Literal::List(items.iter().map(Coerce::coerce).collect()),
            YamlValue::Mapping(map) => Literal::Map(
                map.iter().filter_map(|(k, v)| yaml_key(k).map(|k| (k, v.coerce()))).collect(),
            ),
            YamlValue::Tagged(tagged) => tagged.value.coerce(),
        }
    }
}

/// Stringify a scalar mapping key; composite keys are not addressable.
pub(crate) fn yaml_key(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Tagged(tagged) => yaml_key(&tagged.value),
        YamlValue::Null | YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

impl Coerce for serde_json::Value {
    fn coerce(&self) -> Literal {
        use serde_json::Value;
        match self {
            Value::Null => Literal::Null,
            Value::Bool(b) => Literal::Boolean(*b),
            Value::Number(n) => number(n.as_f64()),
            Value::String(s) => coerce_str(s),
            Value::Array(items) => Literal::List(items.iter().map(Coerce::coerce).collect()),
            Value::Object(map) => {
                Literal::Map(map.iter().map(|(k, v)| (k.clone(), v.coerce())).collect())
            }
        }
    }
}

impl Coerce for Literal {
    fn coerce(&self) -> Literal {
        match self {
            Literal::String(s) => coerce_str(s),
            Literal::Number(n) => number(Some(*n)),
            Literal::List(items) => Literal::List(items.iter().map(Coerce::coerce).collect()),
            Literal::Map(map) => {
                Literal::Map(map.iter().map(|(k, v)| (k.clone(), v.coerce())).collect())
            }
            Literal::Null
            | Literal::Boolean(_)
            | Literal::Date(_)
            | Literal::Duration(_)
            | Literal::Link(_) => self.clone(),
        }
    }
}
