// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Snapshot (de)serialization and the search session lifecycle.
//!
//! A [`SearchSnapshot`] is the build-time product: the deduplicated corpus
//! plus a generation timestamp, serialized as JSON and fetched once per
//! session by whatever transport the host uses (a file here, HTTP in a
//! browser — transport is the host's concern, this module consumes readers
//! and slices).
//!
//! [`SearchSession`] is the explicitly-passed, explicitly-initialized context
//! object that replaces any notion of a module-level corpus cache: load a
//! snapshot, build the session once, then query it read-only for the rest of
//! its life.

use std::io;

use chrono::Utc;
use thiserror::Error;

use crate::dedup::dedup_articles;
use crate::index::ArticleIndex;
use crate::search::perform_search;
use crate::types::{SearchResult, SearchSnapshot, SearchableArticle};

/// Why a snapshot could not be loaded or written.
///
/// All of these surface to the host as "search unavailable"; none of them are
/// panics.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl SearchSnapshot {
    /// Assemble a snapshot from freshly loaded articles: dedup (first-wins,
    /// with diagnostics) and stamp the generation time as RFC 3339.
    pub fn new(articles: Vec<SearchableArticle>) -> Self {
        SearchSnapshot {
            articles: dedup_articles(articles),
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    /// Parse a snapshot from a JSON byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse a snapshot from a reader.
    pub fn from_reader(reader: impl io::Read) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_writer(&self, writer: impl io::Write) -> Result<(), SnapshotError> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }
}

/// A loaded snapshot plus its built index: the one object a UI layer holds.
///
/// Build-once, read-many. Dedup runs again at session build so a snapshot
/// produced by another tool (or by hand) still upholds slug uniqueness
/// before indexing.
#[derive(Debug, Clone)]
pub struct SearchSession {
    snapshot: SearchSnapshot,
    index: ArticleIndex,
}

impl SearchSession {
    /// Build a session from a snapshot. The only initialization step.
    pub fn new(snapshot: SearchSnapshot) -> Self {
        let articles = dedup_articles(snapshot.articles.clone());
        let index = ArticleIndex::build(&articles);
        SearchSession { snapshot, index }
    }

    /// Load a session straight from snapshot JSON.
    pub fn from_reader(reader: impl io::Read) -> Result<Self, SnapshotError> {
        Ok(Self::new(SearchSnapshot::from_reader(reader)?))
    }

    /// Run a query against this session. Total; see [`perform_search`].
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        perform_search(&self.index, query, limit)
    }

    pub fn index(&self) -> &ArticleIndex {
        &self.index
    }

    pub fn snapshot(&self) -> &SearchSnapshot {
        &self.snapshot
    }

    /// When the underlying snapshot was generated (opaque RFC 3339 string).
    pub fn generated_at(&self) -> &str {
        &self.snapshot.generated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(slug: &str, title: &str) -> SearchableArticle {
        SearchableArticle {
            slug: slug.to_string(),
            title: title.to_string(),
            description: String::new(),
            content: String::new(),
            tags: vec![],
        }
    }

    #[test]
    fn new_snapshot_dedups_and_stamps() {
        let snapshot = SearchSnapshot::new(vec![
            article("a", "first"),
            article("a", "duplicate"),
            article("b", "second"),
        ]);
        assert_eq!(snapshot.articles.len(), 2);
        assert_eq!(snapshot.articles[0].title, "first");
        assert!(!snapshot.generated_at.is_empty());
    }

    #[test]
    fn snapshot_json_round_trip() {
        let snapshot = SearchSnapshot::new(vec![article("a", "First Post")]);
        let mut buf = Vec::new();
        snapshot.to_writer(&mut buf).unwrap();

        let back = SearchSnapshot::from_slice(&buf).unwrap();
        assert_eq!(back.articles, snapshot.articles);
        assert_eq!(back.generated_at, snapshot.generated_at);
    }

    #[test]
    fn malformed_json_is_a_typed_error() {
        let err = SearchSnapshot::from_slice(b"{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Malformed(_)));
    }

    #[test]
    fn session_searches_its_snapshot() {
        let session = SearchSession::new(SearchSnapshot::new(vec![article("hello", "Hello World")]));
        let results = session.search("hello", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slug, "hello");
    }

    #[test]
    fn session_redundantly_dedups_foreign_snapshots() {
        // A snapshot assembled by hand, bypassing SearchSnapshot::new.
        let snapshot = SearchSnapshot {
            articles: vec![article("x", "One"), article("x", "Two")],
            generated_at: "2026-01-01T00:00:00+00:00".to_string(),
        };
        let session = SearchSession::new(snapshot);
        assert_eq!(session.index().len(), 1);
    }
}
