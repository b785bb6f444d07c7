// file: src/utils/text.rs
// description: text helpers for prompt assembly and report cleanup
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

/// Hard cap on prompt payloads sent to the completion backend.
pub const MAX_PROMPT_CHARS: usize = 8_000;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").expect("HTML_TAG regex is valid");
    static ref BLANK_RUN: Regex = Regex::new(r"\n{3,}").expect("BLANK_RUN regex is valid");
}

/// Remove HTML markup, leaving plain text for report sections.
pub fn strip_html(text: &str) -> String {
    let stripped = HTML_TAG.replace_all(text, "");
    BLANK_RUN.replace_all(stripped.trim(), "\n\n").to_string()
}

/// Truncate to at most `max_chars` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Join non-empty abstracts with newlines, the payload shape the combined
/// summary and gap prompts expect. Returns None when nothing is left.
pub fn join_abstracts<'a, I>(abstracts: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let joined: Vec<&str> = abstracts
        .into_iter()
        .filter(|a| !a.trim().is_empty())
        .collect();

    if joined.is_empty() {
        None
    } else {
        Some(joined.join("\n"))
    }
}
