//! Reply splitting.
//!
//! Turns one raw completion text into at most three discrete reply strings
//! using a layered heuristic, in order:
//!
//! 1. split on newlines, dropping blank lines;
//! 2. else extract numbered-list items (`1. …` / `2、…`);
//! 3. else treat the whole trimmed text as a single reply.
//!
//! Leading `数字 + [.、]` markers are stripped from the split replies so
//! the downstream cards never show the model's own numbering. A marker is
//! only a marker when non-digit text follows it; a line starting with a
//! decimal number like `3.14…` is left intact. The function never fails;
//! the worst case is a single-element (or empty) result.

use regex::Regex;
use std::sync::OnceLock;

/// Upper bound on replies handed to the display layer.
pub const MAX_REPLIES: usize = 3;

fn numbered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+[.、]\s*[^\d]+").expect("valid literal pattern"))
}

fn leading_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[.、]\s*").expect("valid literal pattern"))
}

fn strip_numbering(text: &str) -> String {
    if let Some(marker) = leading_number_re().find(text) {
        let rest = &text[marker.end()..];
        // Same shape as the numbered-item pattern: a list marker is
        // followed by non-digit text, so "3.14是圆周率" keeps its number.
        if rest.chars().next().is_some_and(|c| !c.is_ascii_digit()) {
            return rest.trim().to_string();
        }
    }
    text.trim().to_string()
}

/// Splits a completion text into up to [`MAX_REPLIES`] reply strings.
pub fn parse_replies(content: &str) -> Vec<String> {
    let lines: Vec<&str> = content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let replies: Vec<String> = if lines.len() >= MAX_REPLIES {
        lines
            .into_iter()
            .take(MAX_REPLIES)
            .map(strip_numbering)
            .collect()
    } else {
        let numbered: Vec<&str> = numbered_item_re()
            .find_iter(content)
            .map(|m| m.as_str())
            .collect();

        if numbered.len() >= MAX_REPLIES {
            numbered
                .into_iter()
                .take(MAX_REPLIES)
                .map(strip_numbering)
                .collect()
        } else {
            vec![content.trim().to_string()]
        }
    };

    replies.into_iter().filter(|reply| !reply.is_empty()).collect()
}
