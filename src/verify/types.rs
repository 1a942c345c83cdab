// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Invariant checks over an `Engine` and the error they report.

use thiserror::Error;

use crate::engine::Engine;
use crate::types::{ArticleId, Field, PostingList};

/// The first invariant violation found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// Article ids are not dense from 1 in table order.
    #[error("article at position {position} has id {id}")]
    SparseArticleIds { position: usize, id: ArticleId },

    /// The URL set and the article table disagree.
    #[error("url set holds {urls} entries for {articles} articles")]
    UrlSetMismatch { urls: usize, articles: usize },

    /// The indexed fields differ from what the options ask for.
    #[error("indexed fields {found:?} do not match configured fields {expected:?}")]
    FieldSetMismatch {
        expected: Vec<Field>,
        found: Vec<Field>,
    },

    #[error("posting list for '{term}' in {field} has the wrong shape")]
    ShapeMismatch { field: Field, term: String },

    #[error("posting list for '{term}' in {field} is empty")]
    EmptyPostingList { field: Field, term: String },

    #[error("posting list for '{term}' in {field} is not strictly increasing")]
    UnsortedPostingList { field: Field, term: String },

    #[error("offsets of '{term}' in {field} for article {article} are not strictly increasing")]
    UnsortedOffsets {
        field: Field,
        term: String,
        article: ArticleId,
    },

    #[error("'{term}' in {field} references unknown article {article}")]
    UnknownArticle {
        field: Field,
        term: String,
        article: ArticleId,
    },

    /// A derived index exists although its mode is off.
    #[error("{index} index present but not enabled")]
    UnexpectedDerivedIndex { index: &'static str },

    #[error("stem list for '{stem}' in {field} is empty or not strictly increasing")]
    UnsortedStemList { field: Field, stem: String },

    #[error("permuterm table for {field} is not sorted at row {row}")]
    UnsortedPermuterm { field: Field, row: usize },
}

fn strictly_increasing<T: Ord>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

/// Walk every structure of `engine` and check its invariants.
pub fn check_well_formed(engine: &Engine) -> Result<(), InvariantError> {
    let articles = engine.articles();

    for (position, article) in articles.iter().enumerate() {
        if article.id.get() as usize != position + 1 {
            return Err(InvariantError::SparseArticleIds {
                position,
                id: article.id,
            });
        }
    }
    let max_id = ArticleId(articles.len() as u32);
    let known = |id: ArticleId| id >= ArticleId::FIRST && id <= max_id;

    let urls_match = engine.urls.len() == articles.len()
        && articles.iter().all(|article| engine.contains_url(&article.url));
    if !urls_match {
        return Err(InvariantError::UrlSetMismatch {
            urls: engine.urls.len(),
            articles: articles.len(),
        });
    }

    let index = engine.index();
    let expected = engine.options().fields();
    let found: Vec<Field> = index.fields.keys().copied().collect();
    let mut expected_sorted = expected.clone();
    expected_sorted.sort();
    if found != expected_sorted {
        return Err(InvariantError::FieldSetMismatch { expected, found });
    }

    for (field, terms) in &index.fields {
        for (term, postings) in terms {
            let field = *field;
            if postings.shape() != index.shape || index.shape != engine.options().shape() {
                return Err(InvariantError::ShapeMismatch {
                    field,
                    term: term.clone(),
                });
            }
            if postings.doc_freq() == 0 {
                return Err(InvariantError::EmptyPostingList {
                    field,
                    term: term.clone(),
                });
            }

            match postings {
                PostingList::Plain(ids) => {
                    if !strictly_increasing(ids) {
                        return Err(InvariantError::UnsortedPostingList {
                            field,
                            term: term.clone(),
                        });
                    }
                }
                PostingList::Positional(map) => {
                    for (article, offsets) in map {
                        if offsets.is_empty() || !strictly_increasing(offsets) {
                            return Err(InvariantError::UnsortedOffsets {
                                field,
                                term: term.clone(),
                                article: *article,
                            });
                        }
                    }
                }
            }

            if let Some(article) = postings.article_ids().into_iter().find(|id| !known(*id)) {
                return Err(InvariantError::UnknownArticle {
                    field,
                    term: term.clone(),
                    article,
                });
            }
        }
    }

    if let Some(stems) = engine.stem_index() {
        if !engine.options().stemming {
            return Err(InvariantError::UnexpectedDerivedIndex { index: "stem" });
        }
        for (field, table) in &stems.fields {
            for (stem, ids) in table {
                if ids.is_empty() || !strictly_increasing(ids) || !ids.iter().all(|id| known(*id))
                {
                    return Err(InvariantError::UnsortedStemList {
                        field: *field,
                        stem: stem.clone(),
                    });
                }
            }
        }
    }

    if let Some(permuterm) = engine.permuterm_index() {
        if !engine.options().permuterm {
            return Err(InvariantError::UnexpectedDerivedIndex { index: "permuterm" });
        }
        for (field, table) in &permuterm.fields {
            if let Some(row) = table.windows(2).position(|w| w[0] > w[1]) {
                return Err(InvariantError::UnsortedPermuterm { field: *field, row });
            }
        }
    }

    Ok(())
}
