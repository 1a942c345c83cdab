//! Placeholder tokens standing in for already-resolved sub-queries.
//!
//! Parenthesized groups and quoted phrases are resolved before the flat
//! token pass. Each one is replaced in the query text by a single token like
//! `%1c2b3a4d`, and the token maps back to its result here.

use std::collections::HashMap;

use crc32fast::Hasher;

use crate::types::ArticleId;

/// First character of every placeholder token.
pub const PLACEHOLDER_MARK: char = '%';

#[derive(Debug, Default)]
pub struct SubResults {
    results: HashMap<String, Vec<ArticleId>>,
}

impl SubResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `ids` for the span `source` found at byte `position` of `query`.
    ///
    /// The token is derived from a CRC32 of the span and its position. If it
    /// is already taken, or already appears in the query text, it is
    /// rerolled with an increasing salt until it is fresh.
    pub fn insert(
        &mut self,
        source: &str,
        position: usize,
        query: &str,
        ids: Vec<ArticleId>,
    ) -> String {
        let mut salt: u32 = 0;
        loop {
            let token = placeholder_token(source, position, salt);
            if !self.results.contains_key(&token) && !query.contains(&token) {
                self.results.insert(token.clone(), ids);
                return token;
            }
            salt += 1;
        }
    }

    pub fn get(&self, token: &str) -> Option<&[ArticleId]> {
        self.results.get(token).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}

fn placeholder_token(source: &str, position: usize, salt: u32) -> String {
    let mut hasher = Hasher::new();
    hasher.update(source.as_bytes());
    hasher.update(&(position as u64).to_le_bytes());
    hasher.update(&salt.to_le_bytes());
    format!("{}{:08x}", PLACEHOLDER_MARK, hasher.finalize())
}
