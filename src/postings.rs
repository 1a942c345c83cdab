// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Set algebra over sorted posting lists.
//!
//! Every function takes sorted, duplicate-free inputs and returns a sorted,
//! duplicate-free output in a single two-pointer pass. Nothing here looks
//! anything up by membership; `reverse_posting` walks the universe alongside
//! the list instead.

use std::cmp::Ordering;

use crate::types::ArticleId;

/// Articles in both `p1` and `p2`.
pub fn and_posting(p1: &[ArticleId], p2: &[ArticleId]) -> Vec<ArticleId> {
    let mut result = Vec::with_capacity(p1.len().min(p2.len()));
    let (mut i, mut j) = (0, 0);

    while i < p1.len() && j < p2.len() {
        match p1[i].cmp(&p2[j]) {
            Ordering::Equal => {
                result.push(p1[i]);
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }

    result
}

/// Articles in `p1`, `p2`, or both.
pub fn or_posting(p1: &[ArticleId], p2: &[ArticleId]) -> Vec<ArticleId> {
    let mut result = Vec::with_capacity(p1.len() + p2.len());
    let (mut i, mut j) = (0, 0);

    while i < p1.len() && j < p2.len() {
        match p1[i].cmp(&p2[j]) {
            Ordering::Equal => {
                result.push(p1[i]);
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                result.push(p1[i]);
                i += 1;
            }
            Ordering::Greater => {
                result.push(p2[j]);
                j += 1;
            }
        }
    }

    result.extend_from_slice(&p1[i..]);
    result.extend_from_slice(&p2[j..]);
    result
}

/// Articles in `p1` but not in `p2`.
pub fn minus_posting(p1: &[ArticleId], p2: &[ArticleId]) -> Vec<ArticleId> {
    let mut result = Vec::with_capacity(p1.len());
    let (mut i, mut j) = (0, 0);

    while i < p1.len() && j < p2.len() {
        match p1[i].cmp(&p2[j]) {
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                result.push(p1[i]);
                i += 1;
            }
            Ordering::Greater => j += 1,
        }
    }

    result.extend_from_slice(&p1[i..]);
    result
}

/// Every article of `universe` that is not in `p` (logical NOT).
///
/// `universe` must yield all known ids in increasing order.
pub fn reverse_posting<I>(p: &[ArticleId], universe: I) -> Vec<ArticleId>
where
    I: IntoIterator<Item = ArticleId>,
{
    let mut result = Vec::new();
    let mut j = 0;

    for id in universe {
        while j < p.len() && p[j] < id {
            j += 1;
        }
        if j < p.len() && p[j] == id {
            j += 1;
        } else {
            result.push(id);
        }
    }

    result
}

/// Sort and deduplicate in place.
pub(crate) fn normalize_ids(ids: &mut Vec<ArticleId>) {
    ids.sort_unstable();
    ids.dedup();
}
