//! Parsing of the user-supplied comma and bracket lists.

use regex::Regex;
use std::sync::LazyLock;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("Invalid list separator regex pattern"));

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("Invalid bracketed entry regex pattern"));

/// Split a comma list into lowercased entries, dropping empty ones.
pub fn split_list(input: &str) -> Vec<String> {
    segments(&input.to_lowercase())
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Extract every `[...]` entry, lowercased, keeping the first occurrence of duplicates.
pub fn parse_bracketed(input: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();

    for captures in BRACKETED.captures_iter(input) {
        let entry = captures[1].to_lowercase();
        if !entries.contains(&entry) {
            entries.push(entry);
        }
    }

    entries
}

/// Split a comma list into its raw segments without changing case.
pub fn segments(input: &str) -> Vec<&str> {
    SEPARATOR.split(input.trim()).collect()
}
