// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Index construction and query benchmarks over a synthetic blog corpus.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use talpa::{perform_search, ArticleIndex, SearchableArticle};

/// A corpus shaped like a real blog: a few hundred articles, a few hundred
/// words each, with a shared vocabulary so queries actually hit.
fn synthetic_corpus(n: usize) -> Vec<SearchableArticle> {
    let vocab = [
        "rust", "search", "index", "blog", "typescript", "react", "parser",
        "snippet", "prefix", "token", "article", "content", "query", "result",
    ];

    (0..n)
        .map(|i| {
            let words: Vec<&str> = (0..300).map(|j| vocab[(i * 7 + j * 13) % vocab.len()]).collect();
            SearchableArticle {
                slug: format!("post-{i}"),
                title: format!("{} deep dive {}", vocab[i % vocab.len()], i),
                description: format!("Notes on {}", vocab[(i + 3) % vocab.len()]),
                content: words.join(" "),
                tags: vec![vocab[i % vocab.len()].to_string()],
            }
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let corpus = synthetic_corpus(300);
    c.bench_function("build_300_articles", |b| {
        b.iter(|| ArticleIndex::build(black_box(&corpus)));
    });
}

fn bench_query(c: &mut Criterion) {
    let corpus = synthetic_corpus(300);
    let index = ArticleIndex::build(&corpus);

    c.bench_function("query_exact_term", |b| {
        b.iter(|| perform_search(black_box(&index), "typescript", 10));
    });

    c.bench_function("query_prefix_term", |b| {
        b.iter(|| perform_search(black_box(&index), "typ", 10));
    });

    c.bench_function("query_multi_term", |b| {
        b.iter(|| perform_search(black_box(&index), "rust search index", 10));
    });
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
