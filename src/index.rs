// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Inverted index with a sorted vocabulary for prefix tokenization.
//!
//! [`ArticleIndex::build`] tokenizes each article's four fields (title, tags,
//! description, content) and records one [`Posting`] per occurrence, keyed by
//! normalized term. A sorted vocabulary sits beside the term map so a query
//! term can match every indexed term it prefixes via a `partition_point`
//! range scan — partial-word search without scanning raw text.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTING_LIST_SORTED**: each posting list is sorted by
//!    (doc, field, position)
//! 2. **DOC_FREQ_CORRECT**: `doc_freq` equals the count of unique docs
//! 3. **NON_EMPTY**: every term in the map has at least one posting
//! 4. **VOCAB_COMPLETE**: the vocabulary contains exactly the term map's keys,
//!    sorted lexicographically
//! 5. **POSTING_IN_BOUNDS**: every posting's `doc` indexes into `articles`

use std::collections::HashMap;

use thiserror::Error;

use crate::scoring::{match_score, posting_weight};
use crate::strip::normalize;
use crate::types::{FieldKind, Posting, PostingList, RankedMatch, SearchableArticle};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Failure modes of query execution.
///
/// Callers above the engine boundary (see [`crate::perform_search`]) catch
/// these, log, and degrade to an empty result list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("result limit must be at least 1")]
    ZeroLimit,
    #[error("posting for term '{term}' points at document {doc} outside the corpus")]
    CorruptPosting { term: String, doc: usize },
}

/// The queryable structure built once per corpus.
///
/// Owns a read-only copy of the deduplicated corpus so results are enrichable
/// without a second external lookup. Build-once, read-many: nothing here
/// mutates after construction.
#[derive(Debug, Clone, Default)]
pub struct ArticleIndex {
    articles: Vec<SearchableArticle>,
    by_slug: HashMap<String, usize>,
    terms: HashMap<String, PostingList>,
    /// All unique terms, sorted, for prefix range scans.
    vocabulary: Vec<String>,
}

/// Word boundary: anything non-alphanumeric separates tokens.
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Split a field into normalized tokens, in order.
///
/// Tokens are normalized with [`normalize`]; empty tokens (e.g. runs of
/// punctuation) are dropped.
fn tokenize(text: &str) -> Vec<String> {
    text.split(is_word_boundary)
        .filter(|w| !w.is_empty())
        .map(normalize)
        .filter(|w| !w.is_empty())
        .collect()
}

/// The four indexed views of one article. Tags are space-joined into a single
/// field, preserving tag order.
fn article_fields(article: &SearchableArticle) -> [(FieldKind, String); 4] {
    [
        (FieldKind::Title, article.title.clone()),
        (FieldKind::Tags, article.tags.join(" ")),
        (FieldKind::Description, article.description.clone()),
        (FieldKind::Content, article.content.clone()),
    ]
}

/// Tokenize one article into term → postings, with per-posting weights.
fn index_article(doc: usize, article: &SearchableArticle) -> HashMap<String, Vec<Posting>> {
    let mut doc_terms: HashMap<String, Vec<Posting>> = HashMap::new();

    for (field, text) in article_fields(article) {
        let tokens = tokenize(&text);
        let field_len = tokens.len();
        for (position, token) in tokens.into_iter().enumerate() {
            doc_terms.entry(token).or_default().push(Posting {
                doc,
                field,
                position,
                weight: posting_weight(field, position, field_len),
            });
        }
    }

    doc_terms
}

/// Merge per-document posting maps into the final index shape.
fn finish(
    articles: Vec<SearchableArticle>,
    per_doc: Vec<HashMap<String, Vec<Posting>>>,
) -> ArticleIndex {
    let mut merged: HashMap<String, Vec<Posting>> = HashMap::new();
    for doc_terms in per_doc {
        for (term, postings) in doc_terms {
            merged.entry(term).or_default().extend(postings);
        }
    }

    let mut terms: HashMap<String, PostingList> = HashMap::with_capacity(merged.len());
    for (term, mut postings) in merged {
        // INVARIANT: POSTING_LIST_SORTED
        postings.sort_by_key(|p| (p.doc, p.field, p.position));

        // INVARIANT: DOC_FREQ_CORRECT
        let mut docs: Vec<usize> = postings.iter().map(|p| p.doc).collect();
        docs.dedup();
        let doc_freq = docs.len();

        terms.insert(term, PostingList { postings, doc_freq });
    }

    // INVARIANT: VOCAB_COMPLETE
    let mut vocabulary: Vec<String> = terms.keys().cloned().collect();
    vocabulary.sort();

    let by_slug = articles
        .iter()
        .enumerate()
        .map(|(doc, a)| (a.slug.clone(), doc))
        .collect();

    ArticleIndex {
        articles,
        by_slug,
        terms,
        vocabulary,
    }
}

impl ArticleIndex {
    /// Build an index over a deduplicated corpus.
    ///
    /// The caller is expected to have run [`crate::dedup_articles`] first; if
    /// duplicate slugs slip through, `slug → doc` resolution keeps the last
    /// one, breaking the first-wins convention. Keep duplicates out.
    pub fn build(articles: &[SearchableArticle]) -> Self {
        let per_doc: Vec<_> = articles
            .iter()
            .enumerate()
            .map(|(doc, article)| index_article(doc, article))
            .collect();
        finish(articles.to_vec(), per_doc)
    }

    /// Build using parallel per-article tokenization (map phase), then a
    /// sequential merge. Worth it from a few hundred articles up.
    #[cfg(feature = "parallel")]
    pub fn build_parallel(articles: &[SearchableArticle]) -> Self {
        let per_doc: Vec<_> = articles
            .par_iter()
            .enumerate()
            .map(|(doc, article)| index_article(doc, article))
            .collect();
        finish(articles.to_vec(), per_doc)
    }

    /// Sequential fallback so callers can use one name regardless of features.
    #[cfg(not(feature = "parallel"))]
    pub fn build_parallel(articles: &[SearchableArticle]) -> Self {
        Self::build(articles)
    }

    /// Execute a free-text query, returning up to `limit` ranked candidates.
    ///
    /// Per term: O(1) exact lookup plus an O(log v) vocabulary range scan for
    /// prefix matches, then a walk over the matching postings only. Scores
    /// are summed across terms (a document matching more terms ranks higher);
    /// within a term, a document keeps its best single posting score. Ties
    /// break by slug for determinism.
    ///
    /// Terms that normalize to nothing are skipped; if no term matches, the
    /// result is empty. Never scans raw article text.
    pub fn query(&self, terms: &[String], limit: usize) -> Result<Vec<RankedMatch>, QueryError> {
        if limit == 0 {
            return Err(QueryError::ZeroLimit);
        }

        let mut doc_scores: HashMap<usize, f64> = HashMap::new();

        for raw in terms {
            let term = normalize(raw);
            if term.is_empty() {
                continue;
            }

            // Best single-posting score per document for this term.
            let mut best: HashMap<usize, f64> = HashMap::new();

            if let Some(list) = self.terms.get(&term) {
                self.fold_postings(&term, list, true, &mut best)?;
            }

            // Prefix matches: every vocabulary term this query term prefixes.
            let start = self.vocabulary.partition_point(|v| v.as_str() < term.as_str());
            for vocab_term in &self.vocabulary[start..] {
                if !vocab_term.starts_with(term.as_str()) {
                    break;
                }
                if *vocab_term == term {
                    continue; // already counted as exact
                }
                if let Some(list) = self.terms.get(vocab_term) {
                    self.fold_postings(vocab_term, list, false, &mut best)?;
                }
            }

            for (doc, score) in best {
                *doc_scores.entry(doc).or_insert(0.0) += score;
            }
        }

        let mut matches: Vec<RankedMatch> = doc_scores
            .into_iter()
            .map(|(doc, score)| RankedMatch { doc, score })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| self.articles[a.doc].slug.cmp(&self.articles[b.doc].slug))
        });
        matches.truncate(limit);

        Ok(matches)
    }

    fn fold_postings(
        &self,
        term: &str,
        list: &PostingList,
        exact: bool,
        best: &mut HashMap<usize, f64>,
    ) -> Result<(), QueryError> {
        for posting in &list.postings {
            if posting.doc >= self.articles.len() {
                return Err(QueryError::CorruptPosting {
                    term: term.to_string(),
                    doc: posting.doc,
                });
            }
            let score = match_score(posting.weight, exact);
            best.entry(posting.doc)
                .and_modify(|existing| *existing = existing.max(score))
                .or_insert(score);
        }
        Ok(())
    }

    /// Resolve an engine document id back to its article.
    pub fn article(&self, doc: usize) -> Option<&SearchableArticle> {
        self.articles.get(doc)
    }

    /// Side lookup by slug.
    pub fn doc_for_slug(&self, slug: &str) -> Option<usize> {
        self.by_slug.get(slug).copied()
    }

    /// Number of indexed articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Number of unique indexed terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Sorted vocabulary of all indexed terms.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Structural self-check (debug assertion helper).
    #[cfg(any(debug_assertions, test))]
    pub fn check_well_formed(&self) -> bool {
        if self.vocabulary.len() != self.terms.len() {
            return false;
        }
        if !self.vocabulary.windows(2).all(|w| w[0] < w[1]) {
            return false;
        }

        for (term, list) in &self.terms {
            if list.postings.is_empty() || self.vocabulary.binary_search(term).is_err() {
                return false;
            }
            let mut docs: Vec<usize> = list.postings.iter().map(|p| p.doc).collect();
            if !docs.windows(2).all(|w| w[0] <= w[1]) {
                return false;
            }
            docs.dedup();
            if list.doc_freq != docs.len() {
                return false;
            }
            if list.postings.iter().any(|p| p.doc >= self.articles.len()) {
                return false;
            }
        }

        true
    }
}
