// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors surfaced by indexing and query resolution.
//!
//! Absent terms are not errors. A term (or stem) that was never indexed simply
//! resolves to an empty posting list, which is what boolean retrieval expects.
//! Everything here means the *input* was wrong: a broken corpus line, a query
//! the grammar can't parse, or a query that needs an index that was never built.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A corpus line is not a valid article record.
    #[error("malformed record at {location}: {reason}")]
    MalformedRecord { location: String, reason: String },

    /// The query string doesn't follow the boolean grammar.
    #[error("unsupported query: {0}")]
    UnsupportedQuery(String),

    /// The query needs an index variant that this build doesn't have.
    #[error("{feature} requested but the index was built without it")]
    ModeMismatch { feature: &'static str },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot bytes are truncated, corrupted or from another format version.
    #[error("invalid snapshot: {0}")]
    Snapshot(String),
}

impl Error {
    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Error::UnsupportedQuery(reason.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
