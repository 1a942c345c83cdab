// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Stem equivalence classes derived from the base index.
//!
//! Every term of every tokenized field is stemmed, and terms that collapse to
//! the same stem have their article sets unioned. Two terms with one stem
//! often occur in the same article, so each union is deduplicated and
//! re-sorted before it is stored.
//!
//! The URL field is skipped: a URL is a literal key, and stemming it would
//! only produce surprising matches.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use rust_stemmers::{Algorithm, Stemmer as Snowball};

use crate::postings::normalize_ids;
use crate::types::{ArticleId, Field, InvertedIndex, StemIndex, StemLanguage};

/// Maps a term to its linguistic root.
pub trait Stemmer: Send + Sync {
    fn stem(&self, term: &str) -> String;
}

/// Snowball stemmer for one language.
pub struct SnowballStemmer {
    language: StemLanguage,
    inner: Snowball,
}

impl SnowballStemmer {
    pub fn new(language: StemLanguage) -> Self {
        let algorithm = match language {
            StemLanguage::Spanish => Algorithm::Spanish,
            StemLanguage::English => Algorithm::English,
            StemLanguage::French => Algorithm::French,
            StemLanguage::German => Algorithm::German,
            StemLanguage::Italian => Algorithm::Italian,
            StemLanguage::Portuguese => Algorithm::Portuguese,
        };
        SnowballStemmer {
            language,
            inner: Snowball::create(algorithm),
        }
    }

    pub fn language(&self) -> StemLanguage {
        self.language
    }
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, term: &str) -> String {
        self.inner.stem(term).into_owned()
    }
}

/// Build the stem index for every tokenized field of `index`.
pub fn build_stem_index(index: &InvertedIndex, stemmer: &dyn Stemmer) -> StemIndex {
    let mut fields = BTreeMap::new();

    for (field, terms) in &index.fields {
        if !field.is_tokenized() {
            continue;
        }

        let mut stems: HashMap<String, Vec<ArticleId>> = HashMap::new();
        for (term, postings) in terms {
            stems
                .entry(stemmer.stem(term))
                .or_default()
                .extend(postings.article_ids());
        }
        for ids in stems.values_mut() {
            normalize_ids(ids);
        }

        fields.insert(*field, stems);
    }

    StemIndex { fields }
}

impl StemIndex {
    /// Articles whose `field` contains any term with stem `stem`.
    pub fn get(&self, field: Field, stem: &str) -> Option<&[ArticleId]> {
        self.fields
            .get(&field)
            .and_then(|stems| stems.get(stem))
            .map(Vec::as_slice)
    }

    pub fn stem_counts(&self) -> BTreeMap<Field, usize> {
        self.fields
            .iter()
            .map(|(field, stems)| (*field, stems.len()))
            .collect()
    }
}
