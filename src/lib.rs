//! In-memory full-text search for static blogs.
//!
//! talpa turns a build-time article corpus into a queryable, per-session
//! search index with prefix matching, weighted multi-field ranking, snippet
//! extraction, and `<mark>` highlighting.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌───────────┐    ┌────────────┐
//! │ strip.rs │───▶│ dedup.rs │───▶│ index.rs  │───▶│ search.rs  │
//! │ (markdown│    │ (slug    │    │ (inverted │    │ (perform_  │
//! │  → text) │    │  dedup)  │    │  + prefix)│    │  search)   │
//! └──────────┘    └──────────┘    └───────────┘    └─────┬──────┘
//!                                                        │
//!                      ┌────────────┐    ┌────────────┐  │
//!                      │ snippet.rs │◀───│ scoring.rs │◀─┘
//!                      │ (windows,  │    │ (field     │
//!                      │  <mark>)   │    │  weights)  │
//!                      └────────────┘    └────────────┘
//! ```
//!
//! Corpus flows in once per session ([`SearchSnapshot`] → [`SearchSession`]),
//! queries flow through per keystroke (debounced by the host via
//! [`Debouncer`]). Everything downstream of snapshot load is synchronous,
//! CPU-bound, and read-only.
//!
//! # Usage
//!
//! ```
//! use talpa::{SearchSession, SearchSnapshot, SearchableArticle};
//!
//! let snapshot = SearchSnapshot::new(vec![SearchableArticle {
//!     slug: "react-guide".into(),
//!     title: "React Development Guide".into(),
//!     description: "Getting started with React".into(),
//!     content: "React is a popular JavaScript library".into(),
//!     tags: vec!["react".into()],
//! }]);
//!
//! let session = SearchSession::new(snapshot);
//! let results = session.search("react", 10);
//! assert_eq!(results[0].slug, "react-guide");
//! ```

// Module declarations
mod debounce;
mod dedup;
mod index;
mod scoring;
mod search;
mod snapshot;
mod strip;
mod types;
pub mod snippet;

// Re-exports for public API
pub use debounce::Debouncer;
pub use dedup::{dedup_articles, dedup_results};
pub use index::{ArticleIndex, QueryError};
pub use scoring::{field_weight, match_score, position_bonus, EXACT_MULTIPLIER, MAX_POSITION_BONUS};
pub use search::{parse_query, perform_search};
pub use snippet::{extract_snippet, highlight_terms};
pub use snapshot::{SearchSession, SnapshotError};
pub use strip::{normalize, strip_markdown};
pub use types::{
    FieldKind, Highlights, Posting, PostingList, RankedMatch, SearchResult, SearchSnapshot,
    SearchableArticle,
};
