// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests: corpus in, ranked highlighted results out.

use std::fs::File;

use talpa::{
    dedup_articles, perform_search, ArticleIndex, SearchSession, SearchSnapshot, SearchableArticle,
};

fn article(slug: &str, title: &str, content: &str, tags: &[&str]) -> SearchableArticle {
    SearchableArticle {
        slug: slug.to_string(),
        title: title.to_string(),
        description: String::new(),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn reference_corpus() -> Vec<SearchableArticle> {
    vec![
        article(
            "react-guide",
            "React Development Guide",
            "React is a popular JavaScript library for building user interfaces",
            &["react"],
        ),
        article(
            "ts-basics",
            "TypeScript Basics",
            "TypeScript is a typed superset of JavaScript that compiles to plain JavaScript",
            &["typescript"],
        ),
    ]
}

#[test]
fn react_query_returns_only_the_react_article() {
    let index = ArticleIndex::build(&reference_corpus());
    let results = perform_search(&index, "React", 10);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].slug, "react-guide");
    assert!(results[0]
        .highlights
        .title
        .as_deref()
        .unwrap()
        .contains("<mark>React</mark>"));
}

#[test]
fn shared_term_returns_both_articles_without_duplicates() {
    let index = ArticleIndex::build(&reference_corpus());
    let results = perform_search(&index, "JavaScript", 10);

    let slugs: Vec<&str> = results.iter().map(|r| r.slug.as_str()).collect();
    assert_eq!(slugs.len(), 2);
    assert!(slugs.contains(&"react-guide"));
    assert!(slugs.contains(&"ts-basics"));

    let unique: std::collections::HashSet<&str> = slugs.iter().copied().collect();
    assert_eq!(unique.len(), slugs.len());
}

#[test]
fn nonexistent_term_returns_empty() {
    let index = ArticleIndex::build(&reference_corpus());
    assert!(perform_search(&index, "nonexistent-term-xyz", 10).is_empty());
}

#[test]
fn hostile_queries_never_panic() {
    let index = ArticleIndex::build(&reference_corpus());
    for query in ["", "   ", "a.*b", "((((", "\\", "<script>", "a", "🦀🦀🦀"] {
        let _ = perform_search(&index, query, 10);
    }
}

#[test]
fn duplicate_corpus_entries_resolve_first_wins() {
    let mut corpus = reference_corpus();
    corpus.push(article("react-guide", "Impostor", "different text", &[]));

    let deduped = dedup_articles(corpus);
    assert_eq!(deduped.len(), 2);
    assert_eq!(deduped[0].title, "React Development Guide");

    let index = ArticleIndex::build(&deduped);
    let results = perform_search(&index, "React", 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "React Development Guide");
}

#[test]
fn prefix_query_matches_partial_words() {
    let index = ArticleIndex::build(&reference_corpus());
    let results = perform_search(&index, "typescr", 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].slug, "ts-basics");
}

#[test]
fn snapshot_file_round_trip_preserves_search_behavior() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("search-index.json");

    let snapshot = SearchSnapshot::new(reference_corpus());
    snapshot.to_writer(File::create(&path).unwrap()).unwrap();

    let session = SearchSession::from_reader(File::open(&path).unwrap()).unwrap();
    assert_eq!(session.generated_at(), snapshot.generated_at);

    let results = session.search("React", 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].slug, "react-guide");
}

#[test]
fn highlights_draw_only_from_source_fields() {
    let index = ArticleIndex::build(&reference_corpus());
    let results = perform_search(&index, "JavaScript", 10);

    for result in results {
        let source = index
            .article(index.doc_for_slug(&result.slug).unwrap())
            .unwrap();
        let title = result.highlights.title.unwrap();
        assert_eq!(
            title.replace("<mark>", "").replace("</mark>", ""),
            source.title
        );
    }
}

#[test]
fn empty_corpus_is_queryable() {
    let index = ArticleIndex::build(&[]);
    assert!(index.is_empty());
    assert!(perform_search(&index, "anything", 10).is_empty());
}
