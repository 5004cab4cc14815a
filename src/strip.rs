// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Text normalization: MDX/markdown stripping and query-term folding.
//!
//! [`strip_markdown`] turns raw article source into the plain text that gets
//! indexed and snippeted. It is a fixed pipeline of regex passes, each
//! operating on the output of the previous one, total over any input.
//!
//! [`normalize`] is the lighter-weight token/query normalizer shared by the
//! tokenizer and the query parser: lowercase, diacritic folding (behind the
//! `unicode-normalization` feature), whitespace collapse.

use regex::Regex;
use std::sync::LazyLock;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

// Pipeline passes, in application order. Compiled once per process.
static MDX_MODULE_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:import|export)\b[^\n]*$").unwrap());
static HTML_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static HEADING_MARKERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]*)`").unwrap());
static IMAGES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap());
static LINKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip MDX/markdown syntax down to plain text suitable for indexing.
///
/// Passes, in order:
///
/// 1. Remove `import`/`export` lines (MDX module syntax).
/// 2. Strip HTML tags.
/// 3. Strip heading markers (`#`–`######` plus following whitespace).
/// 4. Unwrap bold then italic emphasis, non-greedy, one pass each. Nested
///    emphasis is not fully resolved.
/// 5. Remove fenced code blocks entirely, content included.
/// 6. Unwrap inline code spans.
/// 7. Unwrap images (`![alt](url)` → `alt`) then links (`[text](url)` →
///    `text`). Images go first so the link pass never sees a stray `!`.
/// 8. Collapse blank lines to single newlines, then all whitespace runs to
///    single spaces, then trim.
///
/// Total over any string input; the empty string maps to the empty string.
pub fn strip_markdown(raw: &str) -> String {
    let text = MDX_MODULE_LINES.replace_all(raw, "");
    let text = HTML_TAGS.replace_all(&text, "");
    let text = HEADING_MARKERS.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = FENCED_CODE.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = IMAGES.replace_all(&text, "$1");
    let text = LINKS.replace_all(&text, "$1");
    let text = BLANK_LINES.replace_all(&text, "\n");
    let text = WHITESPACE_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}

/// Normalize a string for matching: fold diacritics, lowercase, collapse
/// whitespace.
///
/// Folding makes ASCII queries hit accented text ("cafe" finds "café").
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    let folded: String = value.nfd().filter(|c| !is_combining_mark(*c)).collect();
    collapse_lowercase(&folded)
}

/// Normalize a string for matching: lowercase and collapse whitespace.
///
/// Without the `unicode-normalization` feature, input is assumed ASCII or
/// pre-folded.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    collapse_lowercase(value)
}

fn collapse_lowercase(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Combining marks (Unicode category Mn) left over after NFD decomposition.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
