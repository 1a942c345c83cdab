// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The engine: one owned index object instead of ambient global state.
//!
//! An `Engine` owns the article table, the URL set used for deduplication,
//! the base inverted index and the two optional derived indexes. Indexing
//! mutates it; queries only borrow it. There is no internal locking: callers
//! that share an engine across threads must keep writers away from readers
//! themselves (a `&mut` borrow already does this in safe code).
//!
//! Derived indexes are rebuilt wholesale. Adding an article after they were
//! built drops them, and `build_derived_indexes` must run again before a
//! stemmed or wildcard query can succeed.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::build::{parse_record, NormalizedArticle};
use crate::error::Result;
use crate::permuterm::build_permuterm_index;
use crate::stem::{build_stem_index, SnowballStemmer, Stemmer};
use crate::types::{
    Article, ArticleId, IndexOptions, IndexStats, InvertedIndex, PermutermIndex, StemIndex,
};

/// Everything a snapshot needs to resume answering queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EngineState {
    pub options: IndexOptions,
    pub articles: Vec<Article>,
    pub urls: HashSet<String>,
    pub index: InvertedIndex,
    pub stem_index: Option<StemIndex>,
    pub permuterm_index: Option<PermutermIndex>,
}

pub struct Engine {
    pub(crate) options: IndexOptions,
    pub(crate) articles: Vec<Article>,
    pub(crate) urls: HashSet<String>,
    pub(crate) index: InvertedIndex,
    pub(crate) stem_index: Option<StemIndex>,
    pub(crate) permuterm_index: Option<PermutermIndex>,
    /// Resolve plain terms through the stem index.
    pub(crate) use_stemming: bool,
    pub(crate) stemmer: Arc<dyn Stemmer>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("articles", &self.articles.len())
            .field("stem_index", &self.stem_index.is_some())
            .field("permuterm_index", &self.permuterm_index.is_some())
            .field("use_stemming", &self.use_stemming)
            .finish()
    }
}

impl Engine {
    /// Empty engine using the Snowball stemmer for `options.stem_language`.
    pub fn new(options: IndexOptions) -> Self {
        let stemmer = Arc::new(SnowballStemmer::new(options.stem_language));
        Self::with_stemmer(options, stemmer)
    }

    /// Empty engine with a caller-provided stemmer.
    pub fn with_stemmer(options: IndexOptions, stemmer: Arc<dyn Stemmer>) -> Self {
        Engine {
            index: InvertedIndex::new(&options),
            options,
            articles: Vec::new(),
            urls: HashSet::new(),
            stem_index: None,
            permuterm_index: None,
            use_stemming: false,
            stemmer,
        }
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Index one article unless its URL was seen before.
    ///
    /// Returns the new id, or `None` for a repeated URL (a silent no-op).
    pub fn index_article(&mut self, article: &NormalizedArticle) -> Option<ArticleId> {
        if self.urls.contains(&article.url) {
            debug!(url = %article.url, "skipping already indexed article");
            return None;
        }

        let id = self
            .articles
            .last()
            .map_or(ArticleId::FIRST, |last| last.id.next());
        self.index.add_article(id, article);
        self.urls.insert(article.url.clone());
        self.articles.push(Article {
            id,
            url: article.url.clone(),
            title: article.title.clone(),
            summary: article.summary.clone(),
        });

        if self.stem_index.is_some() || self.permuterm_index.is_some() {
            debug!("base index changed; dropping derived indexes");
            self.stem_index = None;
            self.permuterm_index = None;
        }

        Some(id)
    }

    /// Parse one corpus line and index it.
    ///
    /// A malformed line is reported and leaves the engine untouched.
    pub fn index_record(&mut self, line: &str, location: &str) -> Result<Option<ArticleId>> {
        let article = parse_record(line, location)?;
        Ok(self.index_article(&article))
    }

    /// (Re)build the stem and permuterm indexes requested by the options.
    pub fn build_derived_indexes(&mut self) {
        if self.options.stemming {
            let stems = build_stem_index(&self.index, self.stemmer.as_ref());
            info!(stems = ?stems.stem_counts(), "built stem index");
            self.stem_index = Some(stems);
        }
        if self.options.permuterm {
            let permuterm = build_permuterm_index(&self.index);
            info!(rotations = ?permuterm.rotation_counts(), "built permuterm index");
            self.permuterm_index = Some(permuterm);
        }
    }

    /// Resolve unqualified terms through the stem index by default.
    pub fn set_stemming(&mut self, enabled: bool) {
        self.use_stemming = enabled;
    }

    pub fn use_stemming(&self) -> bool {
        self.use_stemming
    }

    /// Replace the stemmer. Derived indexes built with the old one are dropped.
    pub fn set_stemmer(&mut self, stemmer: Arc<dyn Stemmer>) {
        self.stemmer = stemmer;
        self.stem_index = None;
    }

    pub fn article(&self, id: ArticleId) -> Option<&Article> {
        // Ids are dense from 1, so the id is the position plus one.
        let position = id.get().checked_sub(1)? as usize;
        self.articles.get(position)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    /// Every article id in increasing order.
    pub fn universe(&self) -> impl Iterator<Item = ArticleId> + '_ {
        self.articles.iter().map(|article| article.id)
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn stem_index(&self) -> Option<&StemIndex> {
        self.stem_index.as_ref()
    }

    pub fn permuterm_index(&self) -> Option<&PermutermIndex> {
        self.permuterm_index.as_ref()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            articles: self.articles.len(),
            options: self.options,
            terms: self.index.term_counts(),
            stems: self.stem_index.as_ref().map(StemIndex::stem_counts),
            permuterms: self
                .permuterm_index
                .as_ref()
                .map(PermutermIndex::rotation_counts),
        }
    }

    pub(crate) fn to_state(&self) -> EngineState {
        EngineState {
            options: self.options,
            articles: self.articles.clone(),
            urls: self.urls.clone(),
            index: self.index.clone(),
            stem_index: self.stem_index.clone(),
            permuterm_index: self.permuterm_index.clone(),
        }
    }

    pub(crate) fn from_state(state: EngineState) -> Self {
        let stemmer = Arc::new(SnowballStemmer::new(state.options.stem_language));
        Engine {
            options: state.options,
            articles: state.articles,
            urls: state.urls,
            index: state.index,
            stem_index: state.stem_index,
            permuterm_index: state.permuterm_index,
            use_stemming: false,
            stemmer,
        }
    }
}
