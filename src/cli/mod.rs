// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the wikidex command-line interface.
//!
//! Three subcommands: `index` builds a snapshot from a crawler corpus,
//! `search` answers queries against a snapshot (one query, or a whole batch
//! file), and `stats` prints what a snapshot holds.

pub mod display;

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

#[derive(Parser)]
#[command(
    name = "wikidex",
    about = "Boolean retrieval over crawled Wikipedia articles",
    version
)]
pub struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a snapshot from a corpus file or directory
    Index {
        /// Corpus: a newline-delimited JSON file or a directory of them
        corpus: PathBuf,

        /// Where to write the snapshot
        snapshot: PathBuf,

        /// Index title, summary, section-name and url besides all
        #[arg(short, long)]
        multifield: bool,

        /// Store token offsets, enabling phrase queries
        #[arg(short = 'O', long)]
        positional: bool,

        /// Build the stem index
        #[arg(short, long)]
        stem: bool,

        /// Build the permuterm index, enabling wildcard queries
        #[arg(short = 'W', long)]
        permuterm: bool,

        /// Skip malformed corpus lines instead of aborting
        #[arg(long)]
        permissive: bool,
    },

    /// Query a snapshot
    #[command(group(
        ArgGroup::new("input")
            .required(true)
            .args(["query", "count", "test"])
    ))]
    Search {
        /// Snapshot written by `wikidex index`
        snapshot: PathBuf,

        /// Solve one query and list the matching articles
        #[arg(short, long)]
        query: Option<String>,

        /// Solve every query in FILE and print its result count
        #[arg(short = 'C', long, value_name = "FILE")]
        count: Option<PathBuf>,

        /// Check every `query<TAB>count` line in FILE
        #[arg(short = 'T', long, value_name = "FILE")]
        test: Option<PathBuf>,

        /// Resolve plain terms through the stem index
        #[arg(short, long)]
        stem: bool,

        /// Show every result instead of the first --max
        #[arg(short = 'A', long)]
        all: bool,

        /// Maximum number of results to show
        #[arg(long, default_value = "10")]
        max: usize,

        /// Show the start of each article's summary under its result
        #[arg(short = 'N', long)]
        snippet: bool,
    },

    /// Print index statistics for a snapshot
    Stats {
        snapshot: PathBuf,
    },
}

/// Install the global `tracing` subscriber for the binary.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wikidex={},warn", level)));

    let fmt_layer = fmt::layer()
        .with_target(verbose)
        .with_writer(std::io::stderr);

    Registry::default().with(env_filter).with(fmt_layer).init();
}
