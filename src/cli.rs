// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "talpa",
    about = "Build and query full-text search snapshots for static blogs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a search snapshot from a JSON file of raw articles
    Build {
        /// Input JSON file: an array of articles with markdown content
        #[arg(short, long)]
        input: String,

        /// Output path for the snapshot JSON
        #[arg(short, long)]
        output: String,
    },

    /// Query a snapshot and print ranked results
    Search {
        /// Path to a snapshot JSON file
        snapshot: String,

        /// Free-text query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Print corpus and index statistics for a snapshot
    Inspect {
        /// Path to a snapshot JSON file
        snapshot: String,
    },
}
