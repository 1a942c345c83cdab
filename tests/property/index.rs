//! Random corpora build well-formed engines in every mode.

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::select;

use super::common::{all_modes, article, assert_engine_well_formed, engine_from_texts};
use wikidex::Engine;

const WORDS: &[&str] = &[
    "gato", "gatos", "perro", "perros", "casa", "casas", "correr", "corriendo", "el", "la",
    "Árbol", "niño",
];

fn text() -> impl Strategy<Value = String> {
    vec(select(WORDS), 0..8).prop_map(|words| words.join(" "))
}

fn corpus() -> impl Strategy<Value = Vec<String>> {
    vec(text(), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_mode_is_well_formed(texts in corpus()) {
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        for options in all_modes() {
            let engine = engine_from_texts(options, &refs);
            assert_engine_well_formed(&engine);
            prop_assert_eq!(engine.article_count(), texts.len());
        }
    }

    #[test]
    fn reindexing_is_a_no_op(texts in corpus(), mode in 0usize..16) {
        let options = all_modes()[mode];
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut engine = engine_from_texts(options, &refs);
        let index = engine.index().clone();
        let articles = engine.articles().to_vec();

        for (i, text) in refs.iter().enumerate() {
            prop_assert!(engine.index_article(&article(i + 1, text)).is_none());
        }
        engine.build_derived_indexes();

        prop_assert_eq!(engine.index(), &index);
        prop_assert_eq!(engine.articles(), articles.as_slice());
        assert_engine_well_formed(&engine);
    }

    #[test]
    fn build_order_does_not_matter_for_terms(texts in corpus()) {
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let forward = engine_from_texts(Default::default(), &refs);

        let mut backward = Engine::new(Default::default());
        for (i, text) in refs.iter().enumerate().rev() {
            backward.index_article(&article(i + 1, text));
        }
        backward.build_derived_indexes();

        prop_assert_eq!(forward.stats().terms, backward.stats().terms);
    }
}
