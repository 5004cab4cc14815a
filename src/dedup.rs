// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Slug-keyed, first-wins deduplication.
//!
//! An article should appear at most once in a corpus and at most once in a
//! result list. Sounds obvious, but it is easy to lose when merging feeds or
//! when a build pipeline emits the same slug twice. Both operations here use
//! the slug — and only the slug — as the identity key.
//!
//! **Invariant**: output order equals order of first appearance in the input;
//! entries are never mutated; the operation is idempotent.

use std::collections::HashSet;

use crate::types::{SearchResult, SearchableArticle};

/// Drop duplicate articles, keeping the first occurrence of each slug.
///
/// Emits a warn-level diagnostic per dropped entry. Duplicates are a corpus
/// hygiene problem worth surfacing, not an error worth failing a build over.
pub fn dedup_articles(articles: Vec<SearchableArticle>) -> Vec<SearchableArticle> {
    let mut seen: HashSet<String> = HashSet::with_capacity(articles.len());
    let mut kept = Vec::with_capacity(articles.len());

    for article in articles {
        if seen.insert(article.slug.clone()) {
            kept.push(article);
        } else {
            tracing::warn!(slug = %article.slug, "dropping duplicate article");
        }
    }

    kept
}

/// Drop duplicate results, keeping the first occurrence of each slug.
///
/// Same algorithm as [`dedup_articles`], silent: duplicate results are an
/// expected consequence of over-fetching, not a diagnostic event.
pub fn dedup_results(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|result| seen.insert(result.slug.clone()))
        .collect()
}
