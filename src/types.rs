// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the boolean index.
//!
//! Articles, fields, posting lists and the three index structures (base,
//! stem, permuterm) fit together here. The builders live in their own
//! modules; this file only says what the data looks like.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **ArticleId**: dense, assigned from 1 in first-seen order, never reused.
//!
//! - **PostingList::Plain**: strictly increasing article ids.
//!
//! - **PostingList::Positional**: keyed by article id (so enumeration is
//!   strictly increasing), and every offset list is strictly increasing.
//!
//! - **InvertedIndex**: every list in it has the same shape, picked once when
//!   the index is created. The `all` field is always present.
//!
//! - **StemIndex / PermutermIndex**: derived from a finished base index and
//!   rebuilt wholesale, never patched.
//!
//! `verify::check_well_formed` walks all of these and reports the first
//! violation it finds.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe article identifier.
///
/// Identifiers start at 1 and grow by one per newly seen URL, so the set of
/// all ids is always `1..=article_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ArticleId(pub u32);

impl ArticleId {
    /// The first id handed out by an empty index.
    pub const FIRST: ArticleId = ArticleId(1);

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// The id assigned after this one.
    #[inline]
    pub fn next(self) -> Self {
        ArticleId(self.0 + 1)
    }
}

impl From<u32> for ArticleId {
    fn from(id: u32) -> Self {
        ArticleId(id)
    }
}

impl From<ArticleId> for u32 {
    fn from(id: ArticleId) -> Self {
        id.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Zero-based token offset within one field of one article.
pub type TokenOffset = u32;

// =============================================================================
// ARTICLES AND FIELDS
// =============================================================================

/// What users see when they get a result back.
///
/// The summary is kept for result snippets. Section text is not: once
/// tokenized it only lives in the postings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub url: String,
    pub title: String,
    pub summary: String,
}

/// A named slice of an article, indexed independently in multi-field mode.
///
/// `All` is the concatenation of everything else except the URL and is
/// always indexed. `Url` is the only field that is not tokenized: the whole
/// URL becomes a single term, matched verbatim. A `url:` operand containing
/// `*` or `?` is still a wildcard pattern and needs the permuterm index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    All,
    Title,
    Summary,
    SectionName,
    Url,
}

impl Field {
    /// Every field, in indexing order.
    pub const ALL_FIELDS: [Field; 5] = [
        Field::All,
        Field::Title,
        Field::Summary,
        Field::SectionName,
        Field::Url,
    ];

    /// Field used by unqualified query terms.
    pub const DEFAULT: Field = Field::All;

    /// Whether the field's text goes through the tokenizer.
    pub fn is_tokenized(self) -> bool {
        !matches!(self, Field::Url)
    }

    /// Name as written in `field:term` queries.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::All => "all",
            Field::Title => "title",
            Field::Summary => "summary",
            Field::SectionName => "section-name",
            Field::Url => "url",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL_FIELDS
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| Error::unsupported(format!("unknown field '{}'", s)))
    }
}

// =============================================================================
// BUILD OPTIONS
// =============================================================================

/// Language handed to the Snowball stemmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemLanguage {
    #[default]
    Spanish,
    English,
    French,
    German,
    Italian,
    Portuguese,
}

/// Which index variants to build. Fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexOptions {
    /// Index `title`, `summary`, `section-name` and `url` besides `all`.
    pub multifield: bool,
    /// Store token offsets instead of bare article ids.
    pub positional: bool,
    /// Derive the stem index after the base index is built.
    pub stemming: bool,
    /// Derive the permuterm index after the base index is built.
    pub permuterm: bool,
    #[serde(default)]
    pub stem_language: StemLanguage,
}

impl IndexOptions {
    /// Fields this configuration indexes, `all` first.
    pub fn fields(&self) -> Vec<Field> {
        if self.multifield {
            Field::ALL_FIELDS.to_vec()
        } else {
            vec![Field::All]
        }
    }

    pub fn shape(&self) -> PostingShape {
        if self.positional {
            PostingShape::Positional
        } else {
            PostingShape::Plain
        }
    }
}

// =============================================================================
// POSTINGS
// =============================================================================

/// The shape every posting list in one index shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostingShape {
    Plain,
    Positional,
}

/// Articles (and optionally token offsets) where a term occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostingList {
    /// Strictly increasing article ids.
    Plain(Vec<ArticleId>),
    /// Article id → strictly increasing token offsets.
    Positional(BTreeMap<ArticleId, Vec<TokenOffset>>),
}

impl PostingList {
    pub fn empty(shape: PostingShape) -> Self {
        match shape {
            PostingShape::Plain => PostingList::Plain(Vec::new()),
            PostingShape::Positional => PostingList::Positional(BTreeMap::new()),
        }
    }

    pub fn shape(&self) -> PostingShape {
        match self {
            PostingList::Plain(_) => PostingShape::Plain,
            PostingList::Positional(_) => PostingShape::Positional,
        }
    }

    /// Sorted article ids, regardless of shape.
    pub fn article_ids(&self) -> Vec<ArticleId> {
        match self {
            PostingList::Plain(ids) => ids.clone(),
            PostingList::Positional(map) => map.keys().copied().collect(),
        }
    }

    /// Number of distinct articles.
    pub fn doc_freq(&self) -> usize {
        match self {
            PostingList::Plain(ids) => ids.len(),
            PostingList::Positional(map) => map.len(),
        }
    }

    /// Token offsets of the term inside `id`. `None` for plain lists.
    pub fn positions(&self, id: ArticleId) -> Option<&[TokenOffset]> {
        match self {
            PostingList::Plain(_) => None,
            PostingList::Positional(map) => map.get(&id).map(Vec::as_slice),
        }
    }
}

// =============================================================================
// INDEXES
// =============================================================================

/// Term → postings for one field.
pub type TermPostings = HashMap<String, PostingList>;

/// field → term → postings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedIndex {
    pub shape: PostingShape,
    pub fields: BTreeMap<Field, TermPostings>,
}

/// field → stem → union of the postings of every term with that stem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemIndex {
    pub fields: BTreeMap<Field, HashMap<String, Vec<ArticleId>>>,
}

/// One row of the permuterm table.
///
/// Ordering compares `rotation` first and `term` second, so a sorted table is
/// deterministic even when two terms share a rotation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rotation {
    /// A left rotation of `term$`.
    pub rotation: String,
    /// The term the rotation came from.
    pub term: String,
}

/// field → rotations sorted by `Rotation`'s ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutermIndex {
    pub fields: BTreeMap<Field, Vec<Rotation>>,
}

/// Size summary of a built engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub articles: usize,
    pub options: IndexOptions,
    pub terms: BTreeMap<Field, usize>,
    pub stems: Option<BTreeMap<Field, usize>>,
    pub permuterms: Option<BTreeMap<Field, usize>>,
}
