// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction.
//!
//! Articles arrive one at a time in increasing id order, and within an
//! article each field's tokens are visited left to right. That ordering is
//! what keeps every posting list sorted without a final sort pass: a new
//! article id is always larger than anything already stored, and a new
//! offset is always larger than the previous one for the same article.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTING_LIST_SORTED**: plain lists strictly increasing by id
//! 2. **OFFSETS_SORTED**: positional offsets strictly increasing per article
//! 3. **NON_EMPTY**: every stored term has at least one article
//! 4. **ALL_PRESENT**: the `all` field exists in every index

use std::collections::BTreeMap;

use crate::build::NormalizedArticle;
use crate::tokenize::tokenize;
use crate::types::{
    ArticleId, Field, IndexOptions, InvertedIndex, PostingList, TermPostings, TokenOffset,
};

/// Terms of one field in document order.
///
/// Tokenized fields go through `tokenize`; the URL field is a single literal
/// term.
pub fn field_terms(field: Field, article: &NormalizedArticle) -> Vec<String> {
    let text = article.field_text(field);
    if field.is_tokenized() {
        tokenize(text)
    } else {
        vec![text.to_string()]
    }
}

impl InvertedIndex {
    /// Empty index with one sub-index per field selected by `options`.
    pub fn new(options: &IndexOptions) -> Self {
        let fields: BTreeMap<Field, TermPostings> = options
            .fields()
            .into_iter()
            .map(|field| (field, TermPostings::new()))
            .collect();

        InvertedIndex {
            shape: options.shape(),
            fields,
        }
    }

    /// Record every term occurrence of `article` under `id`.
    ///
    /// `id` must be larger than every id added before.
    pub fn add_article(&mut self, id: ArticleId, article: &NormalizedArticle) {
        let shape = self.shape;
        for (field, terms) in self.fields.iter_mut() {
            for (offset, term) in field_terms(*field, article).into_iter().enumerate() {
                let list = terms
                    .entry(term)
                    .or_insert_with(|| PostingList::empty(shape));
                push_occurrence(list, id, offset as TokenOffset);
            }
        }
    }

    /// Postings of `term` in `field`, if the field is indexed and the term occurs.
    pub fn get(&self, field: Field, term: &str) -> Option<&PostingList> {
        self.fields.get(&field).and_then(|terms| terms.get(term))
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// Distinct terms per field.
    pub fn term_counts(&self) -> BTreeMap<Field, usize> {
        self.fields
            .iter()
            .map(|(field, terms)| (*field, terms.len()))
            .collect()
    }
}

fn push_occurrence(list: &mut PostingList, id: ArticleId, offset: TokenOffset) {
    match list {
        PostingList::Plain(ids) => {
            // Appended in id order, so "already present" means "is last".
            if ids.last() != Some(&id) {
                debug_assert!(ids.last().is_none_or(|last| *last < id));
                ids.push(id);
            }
        }
        PostingList::Positional(map) => {
            let offsets = map.entry(id).or_default();
            debug_assert!(offsets.last().is_none_or(|last| *last < offset));
            offsets.push(offset);
        }
    }
}
