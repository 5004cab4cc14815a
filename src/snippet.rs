// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Snippet extraction and match highlighting.
//!
//! Both functions are pure: same inputs, same output, no I/O. Both measure in
//! **characters**, not bytes, so windows never split a multi-byte scalar.
//!
//! Terms shorter than 2 characters are ignored throughout — they produce
//! noise highlights ("a", "I") and pathological snippet windows.

use regex::RegexBuilder;

/// Minimum term length considered for snippeting and highlighting.
const MIN_TERM_LEN: usize = 2;

fn usable(term: &str) -> bool {
    term.chars().count() >= MIN_TERM_LEN
}

/// Truncate to `max_len` characters, appending `...` only when clipped.
fn truncate_with_ellipsis(content: &str, max_len: usize) -> String {
    let chars: Vec<char> = content.chars().collect();
    if chars.len() <= max_len {
        return content.to_string();
    }
    let mut out: String = chars[..max_len].iter().collect();
    out.push_str("...");
    out
}

/// Case-fold a single character without changing string length, so match
/// offsets stay aligned with the original text.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// All character offsets where `term` occurs in `haystack`, case-insensitive.
fn find_char_offsets(haystack: &[char], term: &str) -> Vec<usize> {
    let needle: Vec<char> = term.chars().map(fold).collect();
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }

    let lowered: Vec<char> = haystack.iter().copied().map(fold).collect();
    let mut offsets = Vec::new();
    for start in 0..=lowered.len().saturating_sub(needle.len()) {
        if lowered[start..start + needle.len()] == needle[..] {
            offsets.push(start);
        }
    }
    offsets
}

/// Extract a context window of `max_len` characters around the earliest
/// match of any search term.
///
/// - With no usable terms, or no term present in `content`: `content`
///   truncated to `max_len` characters, `...` appended only if truncated.
/// - Otherwise: a window centered on the earliest match offset, clamped to
///   the text, with `...` prefixed/suffixed when the window clips either end.
///
/// Output length is at most `max_len + 6` characters (two ellipses of budget).
pub fn extract_snippet(content: &str, terms: &[String], max_len: usize) -> String {
    let usable_terms: Vec<&String> = terms.iter().filter(|t| usable(t)).collect();
    if usable_terms.is_empty() {
        return truncate_with_ellipsis(content, max_len);
    }

    let chars: Vec<char> = content.chars().collect();
    let first = usable_terms
        .iter()
        .flat_map(|term| find_char_offsets(&chars, term))
        .min();

    let Some(first) = first else {
        return truncate_with_ellipsis(content, max_len);
    };

    let start = first.saturating_sub(max_len / 2);
    let end = chars.len().min(start + max_len);

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str("...");
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str("...");
    }
    snippet
}

/// Wrap every occurrence of each term in `<mark>...</mark>`, preserving the
/// original casing of the matched text.
///
/// Terms are applied sequentially in the order given, each as a
/// case-insensitive literal (regex metacharacters escaped before
/// compilation). When terms overlap textually, a later term can re-wrap text
/// inside an earlier term's `<mark>`; that nesting is accepted behavior, not
/// repaired here.
///
/// Returns `text` unchanged for an empty or unusable term list. The output is
/// an HTML fragment meant to be inserted as raw markup; any sanitization
/// policy beyond the `<mark>` wrapping belongs to the caller.
pub fn highlight_terms(text: &str, terms: &[String]) -> String {
    let mut out = text.to_string();
    for term in terms.iter().filter(|t| usable(t)) {
        let Ok(re) = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        else {
            continue;
        };
        out = re.replace_all(&out, "<mark>$0</mark>").into_owned();
    }
    out
}
