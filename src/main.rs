// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use talpa::{strip_markdown, SearchSession, SearchSnapshot, SearchableArticle};

mod cli;
use cli::{Cli, Commands};

/// An article as the build pipeline emits it: content still markdown/MDX.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    slug: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    tags: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Build { input, output } => run_build(&input, &output),
        Commands::Search {
            snapshot,
            query,
            limit,
        } => run_search(&snapshot, &query, limit),
        Commands::Inspect { snapshot } => run_inspect(&snapshot),
    };

    if let Err(e) = outcome {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn load_session(path: &str) -> anyhow::Result<SearchSession> {
    let file = File::open(path).with_context(|| format!("opening snapshot {path}"))?;
    SearchSession::from_reader(BufReader::new(file))
        .with_context(|| format!("loading snapshot {path}"))
}

fn run_build(input: &str, output: &str) -> anyhow::Result<()> {
    let file = File::open(input).with_context(|| format!("opening {input}"))?;
    let raw: Vec<RawArticle> =
        serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {input}"))?;
    let count = raw.len();

    let articles: Vec<SearchableArticle> = raw
        .into_iter()
        .map(|a| SearchableArticle {
            slug: a.slug,
            title: a.title,
            description: a.description,
            content: strip_markdown(&a.content),
            tags: a.tags,
        })
        .collect();

    let snapshot = SearchSnapshot::new(articles);
    let out = File::create(output).with_context(|| format!("creating {output}"))?;
    snapshot.to_writer(out)?;

    println!(
        "wrote {} ({} articles in, {} after dedup)",
        output,
        count,
        snapshot.articles.len()
    );
    Ok(())
}

fn run_search(snapshot: &str, query: &str, limit: usize) -> anyhow::Result<()> {
    let session = load_session(snapshot)?;
    let results = session.search(query, limit);

    if results.is_empty() {
        println!("no results for '{query}'");
        return Ok(());
    }

    for (rank, result) in results.iter().enumerate() {
        println!("{:>2}. {} ({:.2})", rank + 1, result.title, result.score);
        println!("    /{}", result.slug);
        if let Some(snippet) = result
            .highlights
            .content
            .as_deref()
            .filter(|s| !s.is_empty())
        {
            println!("    {snippet}");
        }
    }
    Ok(())
}

fn run_inspect(snapshot: &str) -> anyhow::Result<()> {
    let session = load_session(snapshot)?;
    let index = session.index();

    println!("generated at: {}", session.generated_at());
    println!("articles:     {}", index.len());
    println!("unique terms: {}", index.term_count());

    let vocab = index.vocabulary();
    if let (Some(first), Some(last)) = (vocab.first(), vocab.last()) {
        println!("vocabulary:   {first} .. {last}");
    }
    Ok(())
}
