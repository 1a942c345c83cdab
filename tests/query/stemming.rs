//! Stemmed lookups.

use std::sync::Arc;

use super::common::{engine_from_texts, ids, options};
use wikidex::{Engine, Error, IndexOptions, StemLanguage, Stemmer};

fn stemmed(texts: &[&str]) -> Engine {
    let mut engine = engine_from_texts(options(false, false, true, false), texts);
    engine.set_stemming(true);
    engine
}

#[test]
fn correr_corriendo() {
    let engine = stemmed(&["correr", "corriendo", "saltar"]);
    assert_eq!(engine.solve_query("correr").unwrap(), ids(&[1, 2]));
    assert_eq!(engine.solve_query("corriendo").unwrap(), ids(&[1, 2]));
}

#[test]
fn stemming_is_opt_in_at_query_time() {
    let mut engine = stemmed(&["correr", "corriendo"]);
    engine.set_stemming(false);
    assert_eq!(engine.solve_query("correr").unwrap(), ids(&[1]));
}

#[test]
fn stemmed_boolean_query() {
    let engine = stemmed(&["los gatos corren", "un gato", "perros"]);
    assert_eq!(
        engine.solve_query("gato AND NOT corriendo").unwrap(),
        ids(&[2])
    );
    assert_eq!(engine.solve_query("perro OR gatos").unwrap(), ids(&[1, 2, 3]));
}

#[test]
fn phrases_bypass_stemming() {
    let mut engine = engine_from_texts(
        options(false, true, true, false),
        &["gatos negros", "gato negro"],
    );
    engine.set_stemming(true);
    assert_eq!(engine.solve_query("\"gato negro\"").unwrap(), ids(&[2]));
    assert_eq!(engine.solve_query("gato").unwrap(), ids(&[1, 2]));
}

#[test]
fn stem_index_not_built() {
    let mut engine = engine_from_texts(IndexOptions::default(), &["correr"]);
    engine.set_stemming(true);
    assert!(matches!(
        engine.solve_query("correr"),
        Err(Error::ModeMismatch { .. })
    ));
}

#[test]
fn english_stemmer() {
    let mut engine = engine_from_texts(
        IndexOptions {
            stemming: true,
            stem_language: StemLanguage::English,
            ..IndexOptions::default()
        },
        &["running fast", "the runner runs"],
    );
    engine.set_stemming(true);
    assert_eq!(engine.solve_query("run").unwrap(), ids(&[1, 2]));
}

/// Strips a trailing "s".
struct Singular;

impl Stemmer for Singular {
    fn stem(&self, term: &str) -> String {
        term.strip_suffix('s').unwrap_or(term).to_string()
    }
}

#[test]
fn custom_stemmer() {
    let mut engine = Engine::with_stemmer(options(false, false, true, false), Arc::new(Singular));
    for (i, text) in ["casa", "casas", "cosa"].iter().enumerate() {
        engine.index_article(&super::common::article(i + 1, text));
    }
    engine.build_derived_indexes();
    engine.set_stemming(true);
    assert_eq!(engine.solve_query("casas").unwrap(), ids(&[1, 2]));
    assert_eq!(engine.solve_query("cosas").unwrap(), ids(&[3]));
}
