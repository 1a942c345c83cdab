// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Building an engine from a crawler corpus on disk.
//!
//! A corpus is a single `.json` file or a directory tree of them. Each file is
//! newline-delimited JSON, one article per line. The build runs in three
//! steps:
//!
//! 1. collect the corpus files in a stable order (sorted names, files before
//!    subdirectories),
//! 2. parse them, concurrently with the `parallel` feature,
//! 3. feed the articles into the engine one at a time, then build the stem
//!    and permuterm indexes once over the finished base index.

pub mod document;
pub mod parallel;

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::engine::Engine;
use crate::error::{Error, Result};

pub use document::*;
pub use parallel::{load_corpus, read_corpus_file, CorpusFile};

/// Corpus file extension.
pub const CORPUS_EXTENSION: &str = "json";

/// How a build reacts to bad input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Skip malformed lines with a warning instead of aborting the build.
    pub permissive: bool,
}

/// What a build did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub files: usize,
    /// Articles that got a new id.
    pub indexed: usize,
    /// Records whose URL was already indexed.
    pub duplicates: usize,
    /// Malformed records dropped in permissive mode.
    pub skipped: usize,
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("━━╸"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Corpus files under `path`, in indexing order.
pub fn corpus_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(Error::io(
            path,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "corpus path is neither a file nor a directory",
            ),
        ));
    }

    let mut files = Vec::new();
    walk(path, &mut files)?;
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()).map_err(|e| Error::io(dir, e)))
        .collect::<Result<_>>()?;
    entries.sort();

    let (dirs, plain): (Vec<PathBuf>, Vec<PathBuf>) =
        entries.into_iter().partition(|entry| entry.is_dir());

    files.extend(plain.into_iter().filter(|entry| {
        entry
            .extension()
            .is_some_and(|ext| ext == CORPUS_EXTENSION)
    }));
    for sub in dirs {
        walk(&sub, files)?;
    }
    Ok(())
}

/// Index every article under `path` into `engine`.
///
/// A malformed record aborts the build before any article is added unless
/// `options.permissive` is set.
pub fn index_path(engine: &mut Engine, path: &Path, options: &BuildOptions) -> Result<BuildSummary> {
    let files = corpus_files(path)?;
    info!(path = %path.display(), files = files.len(), "loading corpus");

    #[cfg(feature = "parallel")]
    let load_pb = {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(create_progress_style());
        pb.set_prefix("Loading");
        pb.set_message("corpus...");
        pb
    };

    let corpus = load_corpus(
        &files,
        options,
        #[cfg(feature = "parallel")]
        &load_pb,
    )?;

    #[cfg(feature = "parallel")]
    load_pb.finish_and_clear();

    let mut summary = BuildSummary {
        files: files.len(),
        ..BuildSummary::default()
    };
    for file in &corpus {
        let before = summary.indexed;
        for article in &file.articles {
            match engine.index_article(article) {
                Some(_) => summary.indexed += 1,
                None => summary.duplicates += 1,
            }
        }
        summary.skipped += file.skipped;
        debug!(
            file = %file.path.display(),
            indexed = summary.indexed - before,
            skipped = file.skipped,
            "indexed corpus file"
        );
    }

    engine.build_derived_indexes();
    info!(
        indexed = summary.indexed,
        duplicates = summary.duplicates,
        skipped = summary.skipped,
        articles = engine.article_count(),
        "build complete"
    );
    Ok(summary)
}
