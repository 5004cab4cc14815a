// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! The search facade: query parsing, engine dispatch, result enrichment.
//!
//! [`perform_search`] is the one entry point UI layers call. It is
//! synchronous and total: for any string input it returns a (possibly empty)
//! result list and never panics — engine failures are logged and degrade to
//! "no results", because a broken search box must never take the page down
//! with it.

use crate::dedup;
use crate::index::ArticleIndex;
use crate::snippet::{extract_snippet, highlight_terms};
use crate::types::{Highlights, SearchResult};

/// Snippet window for description highlights, in characters.
const DESCRIPTION_SNIPPET_LEN: usize = 150;
/// Snippet window for content highlights, in characters.
const CONTENT_SNIPPET_LEN: usize = 200;

/// Split a raw query into highlightable terms.
///
/// Trims, splits on whitespace, and discards terms shorter than 2 characters
/// — those still reach the engine's normalizer elsewhere, but they are too
/// noisy to drive snippets or highlights.
pub fn parse_query(query: &str) -> Vec<String> {
    query
        .trim()
        .split_whitespace()
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Execute a free-text query against an index, returning at most `limit`
/// enriched, slug-unique results.
///
/// Steps: parse the query (empty parse → `[]` without touching the engine);
/// over-fetch from the engine to survive dedup losses; resolve each candidate
/// to its article (unknown ids are skipped — an index/corpus desync is
/// defensive territory, not an error); dedup by slug first-wins; attach
/// highlights; stop at `limit`.
///
/// Engine errors are caught here, logged at warn level, and returned as an
/// empty list.
pub fn perform_search(index: &ArticleIndex, query: &str, limit: usize) -> Vec<SearchResult> {
    let terms = parse_query(query);
    if terms.is_empty() || limit == 0 {
        return Vec::new();
    }

    // Over-fetch so in-call dedup and unknown-id skips cannot starve `limit`.
    let fetch = limit.saturating_mul(2).max(10);

    let matches = match index.query(&terms, fetch) {
        Ok(matches) => matches,
        Err(error) => {
            tracing::warn!(%error, query, "query execution failed; returning no results");
            return Vec::new();
        }
    };

    let mut results = Vec::with_capacity(limit);
    for matched in matches {
        let Some(article) = index.article(matched.doc) else {
            tracing::debug!(doc = matched.doc, "engine returned unknown document id");
            continue;
        };

        results.push(SearchResult {
            slug: article.slug.clone(),
            title: article.title.clone(),
            description: article.description.clone(),
            tags: article.tags.clone(),
            highlights: Highlights {
                title: Some(highlight_terms(&article.title, &terms)),
                description: Some(highlight_terms(
                    &extract_snippet(&article.description, &terms, DESCRIPTION_SNIPPET_LEN),
                    &terms,
                )),
                content: Some(highlight_terms(
                    &extract_snippet(&article.content, &terms, CONTENT_SNIPPET_LEN),
                    &terms,
                )),
            },
            score: matched.score,
        });
    }

    let mut results = dedup::dedup_results(results);
    results.truncate(limit);
    results
}
