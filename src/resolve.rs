// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Operand → posting list.
//!
//! One operand, one field, one sorted list of article ids. Dispatch order
//! matters and is fixed: wildcard first, then quoted phrase, then stem
//! lookup (when stemming is on), then a direct lookup. A term that isn't in
//! the index is not an error; it just matches nothing.

use tracing::trace;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::permuterm::{has_wildcard, resolve_wildcard};
use crate::tokenize::tokenize;
use crate::types::{ArticleId, Field, PostingList, PostingShape};

/// A `"…"` operand.
pub fn is_phrase(term: &str) -> bool {
    term.len() >= 2 && term.starts_with('"') && term.ends_with('"')
}

/// Query terms for tokenized fields are matched case-insensitively; URLs are
/// matched verbatim.
fn normalize_term(term: &str, field: Field) -> String {
    if field.is_tokenized() {
        term.to_lowercase()
    } else {
        term.to_string()
    }
}

impl Engine {
    /// Sorted ids of the articles whose `field` matches `term`.
    pub fn resolve(&self, term: &str, field: Field) -> Result<Vec<ArticleId>> {
        if !self.index.has_field(field) {
            return Err(Error::ModeMismatch {
                feature: "multi-field query",
            });
        }

        if has_wildcard(term) {
            if term.contains('"') {
                return Err(Error::unsupported(format!(
                    "wildcards are not allowed inside phrases: {}",
                    term
                )));
            }
            let permuterm = self
                .permuterm_index
                .as_ref()
                .ok_or(Error::ModeMismatch {
                    feature: "wildcard query",
                })?;
            let pattern = normalize_term(term, field);
            trace!(%pattern, %field, "wildcard lookup");
            return resolve_wildcard(permuterm, &self.index, field, &pattern);
        }

        if is_phrase(term) {
            return self.resolve_phrase(&term[1..term.len() - 1], field);
        }

        let term = normalize_term(term, field);
        if self.use_stemming && field.is_tokenized() {
            let stems = self.stem_index.as_ref().ok_or(Error::ModeMismatch {
                feature: "stemmed query",
            })?;
            let stem = self.stemmer.stem(&term);
            trace!(%term, %stem, %field, "stem lookup");
            return Ok(stems
                .get(field, &stem)
                .map(<[ArticleId]>::to_vec)
                .unwrap_or_default());
        }

        Ok(self
            .index
            .get(field, &term)
            .map(PostingList::article_ids)
            .unwrap_or_default())
    }

    /// Articles where the words of `phrase` occur at consecutive offsets.
    fn resolve_phrase(&self, phrase: &str, field: Field) -> Result<Vec<ArticleId>> {
        let words = if field.is_tokenized() {
            tokenize(phrase)
        } else {
            vec![phrase.to_string()]
        };

        match words.as_slice() {
            [] => Err(Error::unsupported("empty phrase")),
            [word] => Ok(self
                .index
                .get(field, word)
                .map(PostingList::article_ids)
                .unwrap_or_default()),
            [first, rest @ ..] => {
                if self.index.shape != PostingShape::Positional {
                    return Err(Error::ModeMismatch {
                        feature: "phrase query",
                    });
                }

                let Some(PostingList::Positional(head)) = self.index.get(field, first) else {
                    return Ok(Vec::new());
                };
                let Some(tail) = rest
                    .iter()
                    .map(|word| self.index.get(field, word))
                    .collect::<Option<Vec<&PostingList>>>()
                else {
                    return Ok(Vec::new());
                };

                trace!(words = words.len(), %field, "phrase lookup");
                let result = head
                    .iter()
                    .filter(|(id, offsets)| {
                        offsets.iter().any(|&start| {
                            tail.iter().enumerate().all(|(k, list)| {
                                let wanted = start + k as u32 + 1;
                                list.positions(**id)
                                    .is_some_and(|p| p.binary_search(&wanted).is_ok())
                            })
                        })
                    })
                    .map(|(id, _)| *id)
                    .collect();
                Ok(result)
            }
        }
    }
}
