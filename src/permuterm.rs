// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Permuterm index for single-wildcard terms.
//!
//! Every term `t` is stored as all left rotations of `t$`. A wildcard pattern
//! is rotated the same way until its wildcard sits at the end; what comes
//! before the wildcard is then a plain prefix, and prefix search over a
//! sorted table is a binary search plus a forward scan.
//!
//! ```text
//! car$  →  car$  $car  r$ca  ar$c
//! c*r   →  c*r$  →  r$c*      prefix "r$c" matches "r$ca"
//! ```
//!
//! `*` matches zero or more characters, `?` exactly one. Lengths are counted
//! in characters, not bytes, so `?` matches one `ñ`.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::postings::normalize_ids;
use crate::types::{ArticleId, Field, InvertedIndex, PermutermIndex, Rotation};

/// End-of-term marker appended before rotating.
pub const SENTINEL: char = '$';

/// Zero-or-more wildcard.
pub const MULTI_WILDCARD: char = '*';

/// Exactly-one wildcard.
pub const SINGLE_WILDCARD: char = '?';

#[inline]
pub fn is_wildcard(c: char) -> bool {
    c == MULTI_WILDCARD || c == SINGLE_WILDCARD
}

/// Whether a query operand should go through wildcard resolution.
pub fn has_wildcard(term: &str) -> bool {
    term.chars().any(is_wildcard)
}

/// All `len + 1` rotations of `term$`, each made by moving the last
/// character of the previous one to the front.
fn rotations(term: &str) -> Vec<String> {
    let mut chars: Vec<char> = term.chars().collect();
    chars.push(SENTINEL);

    let mut result = Vec::with_capacity(chars.len());
    for _ in 0..chars.len() {
        result.push(chars.iter().collect());
        chars.rotate_right(1);
    }
    result
}

/// Build one sorted rotation table per field of `index`.
pub fn build_permuterm_index(index: &InvertedIndex) -> PermutermIndex {
    let mut fields = BTreeMap::new();

    for (field, terms) in &index.fields {
        let mut table: Vec<Rotation> = Vec::new();
        for term in terms.keys() {
            table.extend(rotations(term).into_iter().map(|rotation| Rotation {
                rotation,
                term: term.clone(),
            }));
        }
        table.sort_unstable();
        fields.insert(*field, table);
    }

    PermutermIndex { fields }
}

/// A validated wildcard pattern rotated into prefix form.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RotatedPattern {
    prefix: String,
    wildcard: char,
}

fn rotate_pattern(pattern: &str) -> Result<RotatedPattern> {
    if pattern.contains('"') {
        return Err(Error::unsupported(format!(
            "wildcards are not allowed inside phrases: {}",
            pattern
        )));
    }
    let wildcards = pattern.chars().filter(|c| is_wildcard(*c)).count();
    if wildcards != 1 {
        return Err(Error::unsupported(format!(
            "expected exactly one wildcard in '{}', found {}",
            pattern, wildcards
        )));
    }

    let mut chars: Vec<char> = pattern.chars().collect();
    chars.push(SENTINEL);
    while let Some(last) = chars.last().copied() {
        if is_wildcard(last) {
            break;
        }
        chars.rotate_right(1);
    }

    // The loop always stops on the wildcard: there is exactly one.
    let wildcard = chars.pop().unwrap_or(MULTI_WILDCARD);
    Ok(RotatedPattern {
        prefix: chars.into_iter().collect(),
        wildcard,
    })
}

impl PermutermIndex {
    /// Distinct terms of `field` matching a single-wildcard `pattern`, sorted.
    pub fn matching_terms(&self, field: Field, pattern: &str) -> Result<Vec<&str>> {
        let RotatedPattern { prefix, wildcard } = rotate_pattern(pattern)?;
        let Some(table) = self.fields.get(&field) else {
            return Ok(Vec::new());
        };

        let exact_len = prefix.chars().count() + 1;
        let start = table.partition_point(|row| row.rotation.as_str() < prefix.as_str());

        let mut terms: Vec<&str> = table[start..]
            .iter()
            .take_while(|row| row.rotation.starts_with(prefix.as_str()))
            .filter(|row| {
                wildcard == MULTI_WILDCARD || row.rotation.chars().count() == exact_len
            })
            .map(|row| row.term.as_str())
            .collect();

        terms.sort_unstable();
        terms.dedup();
        Ok(terms)
    }

    pub fn rotation_counts(&self) -> BTreeMap<Field, usize> {
        self.fields
            .iter()
            .map(|(field, table)| (*field, table.len()))
            .collect()
    }
}

/// Union of the postings of every term in `field` matching `pattern`.
pub fn resolve_wildcard(
    permuterm: &PermutermIndex,
    index: &InvertedIndex,
    field: Field,
    pattern: &str,
) -> Result<Vec<ArticleId>> {
    let mut ids: Vec<ArticleId> = Vec::new();
    for term in permuterm.matching_terms(field, pattern)? {
        if let Some(postings) = index.get(field, term) {
            ids.extend(postings.article_ids());
        }
    }
    normalize_ids(&mut ids);
    Ok(ids)
}
