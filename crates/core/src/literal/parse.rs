//! String grammars for dates, durations and inline-field values.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use regex::Regex;

use super::types::{Duration, Link, Literal};

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // YYYY-MM, YYYY-MM-DD, then optional time and zone
    Regex::new(
        r"^(\d{4})-(\d{2})(?:-(\d{2})(?:[T ](\d{2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?(Z|[+-]\d{2}:?\d{2})?)?)?$",
    )
    .unwrap()
});

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*\d+(?:\.\d+)?\s*[a-z]+(?:(?:\s*,\s*|\s+and\s+|\s+)\d+(?:\.\d+)?\s*[a-z]+)*\s*$",
    )
    .unwrap()
});

static DURATION_PART_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*([a-z]+)").unwrap());

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").unwrap());

/// Parse an ISO-like date or datetime. A missing zone means UTC.
pub fn parse_date(input: &str) -> Option<DateTime<FixedOffset>> {
    let caps = DATE_RE.captures(input)?;
    let num = |i: usize| caps.get(i).map(|m| m.as_str().parse::<u32>());

    let year: i32 = caps[1].parse().ok()?;
    let month = num(2)?.ok()?;
    let day = num(3).transpose().ok()?.unwrap_or(1);
    let hour = num(4).transpose().ok()?.unwrap_or(0);
    let minute = num(5).transpose().ok()?.unwrap_or(0);
    let second = num(6).transpose().ok()?.unwrap_or(0);
    let nanos = match caps.get(7) {
        // Right-pad the fraction to nanosecond precision
        Some(frac) => format!("{:0<9}", frac.as_str()).parse::<u32>().ok()?,
        None => 0,
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?;
    let offset = match caps.get(8) {
        Some(zone) => parse_offset(zone.as_str())?,
        None => FixedOffset::east_opt(0)?,
    };

    offset.from_local_datetime(&date.and_time(time)).single()
}

fn parse_offset(zone: &str) -> Option<FixedOffset> {
    if zone == "Z" {
        return FixedOffset::east_opt(0);
    }

    let sign = if zone.starts_with('-') { -1 } else { 1 };
    let digits: String = zone[1..].chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 4 {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse a human duration such as `3 days`, `1h 30m` or `2 weeks and 1 day`.
///
/// Every `<number> <unit>` pair must use a known unit; repeated units add up.
pub fn parse_duration(input: &str) -> Option<Duration> {
    if !DURATION_RE.is_match(input) {
        return None;
    }

    let mut duration = Duration::default();
    for caps in DURATION_PART_RE.captures_iter(input) {
        let amount: f64 = caps[1].parse().ok()?;
        let slot = match caps[2].to_lowercase().as_str() {
            "y" | "yr" | "yrs" | "year" | "years" => &mut duration.years,
            "mo" | "month" | "months" => &mut duration.months,
            "w" | "wk" | "wks" | "week" | "weeks" => &mut duration.weeks,
            "d" | "day" | "days" => &mut duration.days,
            "h" | "hr" | "hrs" | "hour" | "hours" => &mut duration.hours,
            "m" | "min" | "mins" | "minute" | "minutes" => &mut duration.minutes,
            "s" | "sec" | "secs" | "second" | "seconds" => &mut duration.seconds,
            "ms" | "millisecond" | "milliseconds" => &mut duration.milliseconds,
            _ => return None,
        };
        *slot += amount;
    }

    Some(duration)
}

/// Parse the value half of an inline `key:: value` field.
///
/// Typed literals are recognized strictly (booleans, links, dates, durations,
/// numbers, double-quoted strings). A comma-separated value becomes a list only
/// when every element is such a literal; anything else stays a trimmed string.
pub fn parse_inline_value(input: &str) -> Literal {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Literal::Null;
    }

    let parts = split_top_level(trimmed);
    if parts.len() > 1 {
        let elements: Option<Vec<Literal>> =
            parts.iter().map(|p| parse_inline_literal(p.trim())).collect();
        if let Some(elements) = elements {
            return Literal::List(elements);
        }
    }

    parse_inline_literal(trimmed).unwrap_or_else(|| Literal::String(trimmed.to_string()))
}

fn parse_inline_literal(s: &str) -> Option<Literal> {
    if s.eq_ignore_ascii_case("true") {
        return Some(Literal::Boolean(true));
    }
    if s.eq_ignore_ascii_case("false") {
        return Some(Literal::Boolean(false));
    }
    if let Some(link) = Link::parse_wiki(s) {
        return Some(Literal::Link(link));
    }
    if let Some(date) = parse_date(s) {
        return Some(Literal::Date(date));
    }
    if let Some(duration) = parse_duration(s) {
        return Some(Literal::Duration(duration));
    }
    if NUMBER_RE.is_match(s) {
        return s.parse::<f64>().ok().filter(|n| n.is_finite()).map(Literal::Number);
    }
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        return Some(Literal::String(s[1..s.len() - 1].replace("\\\"", "\"")));
    }
    None
}

/// Split on commas that are not inside `[[...]]`, `(...)` or double quotes.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '[' | '(' if !in_quotes => depth += 1,
            ']' | ')' if !in_quotes => depth = depth.saturating_sub(1),
            ',' if !in_quotes && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}
