//! Canonicalization of property-value expressions.
//!
//! Rules are tried in a fixed order and the first one that matches wins.
//! Most rules search anywhere in the expression, so an expression such as
//! `new Font("Segoe UI", 9F)` ends up as its first string literal.

use std::sync::OnceLock;

use kite_core::{Padding, PropValue};
use regex::{Captures, Regex};

pub fn normalize_literal(property: &str, raw: &str) -> PropValue {
    let value = raw.trim();

    if let Some(point) = point_regex()
        .captures(value)
        .and_then(|caps| Some(PropValue::Point { x: int(&caps, "x")?, y: int(&caps, "y")? }))
    {
        return point;
    }

    if let Some(size) = size_regex()
        .captures(value)
        .and_then(|caps| Some(PropValue::Size { w: int(&caps, "w")?, h: int(&caps, "h")? }))
    {
        return size;
    }

    if let Some(padding) = padding_regex().captures(value).and_then(|caps| padding(&caps)) {
        return PropValue::Padding(padding);
    }

    if let Some(color) = argb_regex().captures(value).and_then(|caps| {
        Some(PropValue::Color(format!(
            "#{:02X}{:02X}{:02X}",
            int(&caps, "r")?,
            int(&caps, "g")?,
            int(&caps, "b")?
        )))
    }) {
        return color;
    }

    if let Some(caps) = enum_member_regex().captures(value) {
        return PropValue::str(&caps["member"]);
    }

    if let Some(caps) = named_color_regex().captures(value) {
        return PropValue::str(&caps["name"]);
    }

    // Unresolved color expression: keep the last dotted segment. The result
    // may not name a real color.
    if value.ends_with(')') && value.contains("Color") {
        let last = value.rsplit('.').next().unwrap_or(value);
        return PropValue::str(last.trim_end_matches(')'));
    }

    if let Some(caps) = string_regex().captures(value) {
        return PropValue::str(&caps["text"]);
    }

    if !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit()) {
        if let Ok(number) = value.parse::<i64>() {
            return PropValue::Int(number);
        }
    }

    if value.eq_ignore_ascii_case("true") {
        return PropValue::Bool(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return PropValue::Bool(false);
    }

    tracing::trace!(property, value, "literal kept verbatim");
    PropValue::str(value)
}

fn int(caps: &Captures<'_>, group: &str) -> Option<i64> {
    caps.name(group)?.as_str().parse().ok()
}

fn padding(caps: &Captures<'_>) -> Option<Padding> {
    let all = int(caps, "a")?;
    if caps.name("b").is_none() {
        return Some(Padding::Uniform(all));
    }
    Some(Padding::Sides(
        all,
        int(caps, "b")?,
        int(caps, "c")?,
        int(caps, "d")?,
    ))
}

fn point_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"new\s+(?:System\.Drawing\.)?Point\(\s*(?P<x>-?\d+)\s*,\s*(?P<y>-?\d+)\s*\)")
            .expect("point regex")
    })
}

fn size_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"new\s+(?:System\.Drawing\.)?Size\(\s*(?P<w>\d+)\s*,\s*(?P<h>\d+)\s*\)")
            .expect("size regex")
    })
}

fn padding_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"new\s+(?:System\.Windows\.Forms\.)?Padding\(\s*(?P<a>\d+)(?:\s*,\s*(?P<b>\d+)\s*,\s*(?P<c>\d+)\s*,\s*(?P<d>\d+))?\s*\)",
        )
        .expect("padding regex")
    })
}

fn argb_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"Color\.FromArgb\(\s*(?P<r>\d+)\s*,\s*(?P<g>\d+)\s*,\s*(?P<b>\d+)\s*\)")
            .expect("argb regex")
    })
}

fn enum_member_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?:DockStyle|ContentAlignment|HorizontalAlignment)\.(?P<member>\w+)")
            .expect("enum member regex")
    })
}

fn named_color_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^(?:System\.Drawing\.)?Color\.(?P<name>\w+)$").expect("named color regex")
    })
}

fn string_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#""(?P<text>(?:\\.|[^"\\])*)""#).expect("string regex"))
}
