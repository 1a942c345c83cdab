//! Boolean retrieval over a crawled Wikipedia corpus.
//!
//! Articles are indexed into one inverted index per field. Queries combine
//! terms, `field:term` qualifiers, quoted phrases, single-wildcard patterns
//! and parenthesized groups with `AND`, `OR` and `NOT`, and come back as
//! sorted sets of article ids. There is no ranking.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────────┐
//! │   build/    │──▶│ inverted.rs │──▶│   stem.rs    │  derived, optional
//! │ (corpus IO, │   │ (per-field  │   │ permuterm.rs │
//! │  normalize) │   │  postings)  │   └──────────────┘
//! └─────────────┘   └─────────────┘          │
//!        │                 │                  │
//!        ▼                 ▼                  ▼
//! ┌─────────────────────────────────────────────────┐
//! │                   engine.rs                     │
//! │     (articles, URL set, base + derived indexes) │
//! └─────────────────────────────────────────────────┘
//!        │                                    │
//!        ▼                                    ▼
//! ┌─────────────┐   ┌─────────────┐   ┌──────────────┐
//! │   query/    │──▶│ resolve.rs  │──▶│ postings.rs  │
//! │ (groups,    │   │ (operand →  │   │ (AND/OR/NOT  │
//! │  phrases)   │   │  postings)  │   │  merges)     │
//! └─────────────┘   └─────────────┘   └──────────────┘
//! ```
//!
//! `snapshot` persists an engine; `verify` checks a loaded one.
//!
//! # Usage
//!
//! ```
//! use wikidex::{Engine, IndexOptions};
//!
//! let options = IndexOptions { positional: true, ..IndexOptions::default() };
//! let mut engine = Engine::new(options);
//! engine
//!     .index_record(
//!         r#"{"url": "https://es.wikipedia.org/wiki/Gato",
//!             "title": "Gato", "summary": "El gato doméstico", "sections": []}"#,
//!         "inline:1",
//!     )
//!     .unwrap();
//! engine.build_derived_indexes();
//!
//! let ids = engine.solve_query("\"gato doméstico\" AND NOT perro").unwrap();
//! assert_eq!(ids.len(), 1);
//! ```

pub mod build;
mod engine;
mod error;
mod inverted;
pub mod permuterm;
mod postings;
pub mod query;
mod resolve;
pub mod snapshot;
pub mod stem;
mod tokenize;
mod types;
pub mod verify;

pub use build::{index_path, BuildOptions, BuildSummary, NormalizedArticle, RawArticle};
pub use engine::Engine;
pub use error::{Error, Result};
pub use inverted::field_terms;
pub use permuterm::{build_permuterm_index, resolve_wildcard};
pub use postings::{and_posting, minus_posting, or_posting, reverse_posting};
pub use query::{
    count_queries, test_queries, QueryCount, QueryEvaluator, QueryTest, QueryTestReport,
};
pub use resolve::is_phrase;
pub use stem::{build_stem_index, SnowballStemmer, Stemmer};
pub use tokenize::tokenize;
pub use types::{
    Article, ArticleId, Field, IndexOptions, IndexStats, InvertedIndex, PermutermIndex,
    PostingList, PostingShape, Rotation, StemIndex, StemLanguage, TermPostings, TokenOffset,
};
pub use verify::{check_well_formed, InvariantError};
