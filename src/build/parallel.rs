// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel corpus loading.
//!
//! Reading and parsing corpus files is the slow part of a build and every file
//! is independent, so with the `parallel` feature each file becomes one rayon
//! task. Workers only produce normalized articles. They never touch the
//! engine: ids are handed out later, on one thread, in file order and then
//! line order.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::warn;

use crate::error::{Error, Result};

use super::{parse_record, BuildOptions, NormalizedArticle};

/// The parsed contents of one corpus file, in line order.
#[derive(Debug, Clone)]
pub struct CorpusFile {
    pub path: PathBuf,
    pub articles: Vec<NormalizedArticle>,
    /// Malformed lines dropped in permissive mode.
    pub skipped: usize,
}

/// Read one newline-delimited JSON file. Blank lines are ignored.
pub fn read_corpus_file(path: &Path, options: &BuildOptions) -> Result<CorpusFile> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    let mut articles = Vec::new();
    let mut skipped = 0;
    for (n, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let location = format!("{}:{}", path.display(), n + 1);
        match parse_record(line, &location) {
            Ok(article) => articles.push(article),
            Err(err) if options.permissive => {
                warn!(%err, "skipping malformed record");
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(CorpusFile {
        path: path.to_path_buf(),
        articles,
        skipped,
    })
}

/// Load every file concurrently. The output keeps the order of `files`.
#[cfg(feature = "parallel")]
pub fn load_corpus(
    files: &[PathBuf],
    options: &BuildOptions,
    progress: &ProgressBar,
) -> Result<Vec<CorpusFile>> {
    let counter = AtomicUsize::new(0);
    let total = files.len();

    files
        .par_iter()
        .map(|path| {
            let file = read_corpus_file(path, options)?;

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count.is_multiple_of(10) || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }

            Ok(file)
        })
        .collect()
}

/// Sequential fallback.
#[cfg(not(feature = "parallel"))]
pub fn load_corpus(files: &[PathBuf], options: &BuildOptions) -> Result<Vec<CorpusFile>> {
    files
        .iter()
        .map(|path| read_corpus_file(path, options))
        .collect()
}
