// file: src/matcher/patterns.rs
// description: compiled regex patterns for query normalization and term parsing
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "2024–2029", "2019-2024", "1998 — 2002"
    pub static ref TERM_RANGE: Regex = Regex::new(
        r"(\d{4})\s*[-–—]\s*(\d{4})"
    ).expect("TERM_RANGE regex is valid");

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).expect("WHITESPACE regex is valid");

    pub static ref KEYWORD_TOKEN: Regex = Regex::new(
        r"[\p{L}\p{N}]{3,}"
    ).expect("KEYWORD_TOKEN regex is valid");
}

/// Lowercase and collapse runs of whitespace.
pub fn normalize_query(query: &str) -> String {
    WHITESPACE
        .replace_all(query.trim(), " ")
        .to_lowercase()
}

/// Alphanumeric tokens of at least three characters, lowercased.
pub fn keywords(query: &str) -> Vec<String> {
    KEYWORD_TOKEN
        .find_iter(query)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}
