// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a blog search session.
//!
//! Three layers of types live here:
//!
//! - **Corpus**: [`SearchableArticle`] and [`SearchSnapshot`] — what the build
//!   pipeline produces and a search session consumes.
//! - **Index internals**: [`Posting`], [`PostingList`], [`FieldKind`] — the
//!   inverted-index plumbing behind [`crate::ArticleIndex`].
//! - **Results**: [`RankedMatch`] at the engine boundary, [`SearchResult`] and
//!   [`Highlights`] as the caller-facing view model.
//!
//! # Invariants
//!
//! - `slug` is the unique identity key: after deduplication no two articles or
//!   results in one collection share a slug.
//! - `Highlights` fields are derived strictly from the corresponding plain
//!   field plus the active query's terms; the only markup they may introduce
//!   is `<mark>`/`</mark>` wrapping.
//! - Tag order is insertion order from the source corpus. Not semantically
//!   significant, but preserved for display determinism.
//! - `PostingList.doc_freq` equals the number of unique documents in its
//!   postings, and postings are sorted by (doc, field, position).

use serde::{Deserialize, Serialize};

// =============================================================================
// CORPUS TYPES
// =============================================================================

/// One article as the indexer sees it: plain-text fields keyed by slug.
///
/// Produced once per build from the article corpus (markdown already stripped
/// from `content` via [`crate::strip_markdown`]), immutable for the lifetime
/// of a search session, held only in memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchableArticle {
    /// Unique identity key across the corpus.
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Plain text, markdown stripped.
    #[serde(default)]
    pub content: String,
    /// Insertion order preserved from the source corpus.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The fetched-once, read-only copy of the corpus used for a search session.
///
/// Serialized as `{"articles": [...], "generatedAt": "..."}`. The timestamp is
/// an RFC 3339 string stamped at build time and treated as opaque by the
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnapshot {
    pub articles: Vec<SearchableArticle>,
    pub generated_at: String,
}

// =============================================================================
// INDEX INTERNALS
// =============================================================================

/// Which of the four indexed fields a match occurred in.
///
/// Title matches beat tag matches beat description matches beat content
/// matches. The weight gaps are deliberately large (100 vs 10 vs 5 vs 1) so
/// position bonuses can never promote a match across tiers — see
/// `scoring::field_weight` and the dominance tests there.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Title,
    Tags,
    Description,
    Content,
}

impl FieldKind {
    /// Lowercase name, matching the serde `rename_all = "lowercase"` convention.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Title => "title",
            FieldKind::Tags => "tags",
            FieldKind::Description => "description",
            FieldKind::Content => "content",
        }
    }
}

/// A single occurrence of a term in the corpus.
///
/// Every time a word appears we record where (document, field, token
/// position) and precompute the base relevance weight, so single-term top-k
/// retrieval never re-derives scores.
///
/// Invariant: `doc` indexes into the corpus the posting was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    /// Document containing this term occurrence.
    pub doc: usize,
    /// Field the occurrence sits in (for scoring).
    pub field: FieldKind,
    /// Token ordinal within the field (0 = first word).
    pub position: usize,
    /// Precomputed `field_weight + position_bonus` for this occurrence.
    pub weight: f64,
}

/// All occurrences of a single term across the corpus.
///
/// Invariant: postings sorted by (doc, field, position); `doc_freq` equals the
/// count of unique `doc` values. Cached because counting unique documents in
/// a posting list is wasteful when done per query.
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    pub postings: Vec<Posting>,
    pub doc_freq: usize,
}

/// A ranked candidate at the engine boundary.
///
/// The engine hands back typed matches, not a duck-typed blob: `doc` indexes
/// into the corpus the index was built from, and resolving it to a full
/// [`SearchableArticle`] is the caller's (cheap) side lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatch {
    pub doc: usize,
    /// Relevance score, higher is better.
    pub score: f64,
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// HTML fragments with `<mark>` wrapping around matched substrings.
///
/// Each field, when present, contains only text drawn from the corresponding
/// plain field plus the wrapping markup. Consumers render these as raw HTML
/// and own any sanitization policy beyond that.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// What callers see per query hit: article metadata plus highlight fragments.
///
/// Created per query execution, discarded after render, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub highlights: Highlights,
    /// Relevance score from the engine, higher is better.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_round_trips_camel_case() {
        let article = SearchableArticle {
            slug: "react-guide".to_string(),
            title: "React Development Guide".to_string(),
            description: "A guide".to_string(),
            content: "React is a popular JavaScript library".to_string(),
            tags: vec!["react".to_string(), "javascript".to_string()],
        };

        let json = serde_json::to_string(&article).unwrap();
        let back: SearchableArticle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }

    #[test]
    fn snapshot_uses_generated_at_key() {
        let snapshot = SearchSnapshot {
            articles: vec![],
            generated_at: "2026-01-01T00:00:00+00:00".to_string(),
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"generatedAt\""));
    }

    #[test]
    fn article_missing_optional_fields_defaults_empty() {
        let article: SearchableArticle =
            serde_json::from_str(r#"{"slug":"a","title":"A"}"#).unwrap();
        assert!(article.description.is_empty());
        assert!(article.content.is_empty());
        assert!(article.tags.is_empty());
    }

    #[test]
    fn empty_highlights_serialize_to_empty_object() {
        let json = serde_json::to_string(&Highlights::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn field_kind_names_match_serde() {
        for kind in [
            FieldKind::Title,
            FieldKind::Tags,
            FieldKind::Description,
            FieldKind::Content,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
