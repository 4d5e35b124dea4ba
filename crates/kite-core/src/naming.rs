use std::sync::OnceLock;

use regex::Regex;

pub const DIGIT_PREFIX: &str = "n_";
pub const PLACEHOLDER_NAME: &str = "node";

/// Maps any source identifier, file name or tag to a valid generated identifier.
pub fn safe_name(raw: &str) -> String {
    let replaced = invalid_run_regex().replace_all(raw, "_");
    if replaced.is_empty() {
        return PLACEHOLDER_NAME.to_string();
    }
    if replaced.starts_with(|ch: char| ch.is_ascii_digit()) {
        return format!("{}{}", DIGIT_PREFIX, replaced);
    }
    replaced.into_owned()
}

fn invalid_run_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[^0-9A-Za-z_]+").expect("identifier regex"))
}
