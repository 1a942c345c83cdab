// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the boolean query evaluator.
//!
//! Arbitrary text goes through every pass (groups, phrases, placeholders,
//! field qualifiers, wildcards). A query may be rejected, but it must never
//! panic, and an accepted one must return sorted ids of known articles.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;
use wikidex::{Engine, IndexOptions, NormalizedArticle};

const TEXTS: &[(&str, &str)] = &[
    ("Gato", "El gato doméstico es un mamífero carnívoro"),
    ("Perro", "El perro corre por la casa"),
    ("Madrid", "Capital de España, ciudad con historia"),
    ("Toledo", "Ciudad cerca de Madrid junto al río Tajo"),
    ("Canción", "Una canción es una composición musical"),
];

fn engine() -> Engine {
    let mut engine = Engine::new(IndexOptions {
        multifield: true,
        positional: true,
        stemming: true,
        permuterm: true,
        ..IndexOptions::default()
    });
    for (title, text) in TEXTS {
        engine.index_article(&NormalizedArticle {
            url: format!("https://es.wikipedia.org/wiki/{}", title),
            title: title.to_string(),
            summary: text.to_string(),
            all_text: format!("{}\n\n{}", title, text),
            section_name_text: String::new(),
        });
    }
    engine.build_derived_indexes();
    engine.set_stemming(true);
    engine
}

fuzz_target!(|query: &[u8]| {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    let engine = ENGINE.get_or_init(engine);

    let query = String::from_utf8_lossy(query);
    let query: String = query.chars().take(4096).collect();

    if let Ok(ids) = engine.solve_query(&query) {
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "unsorted result for {:?}", query);
        assert!(
            ids.iter().all(|id| engine.article(*id).is_some()),
            "unknown article for {:?}",
            query
        );
    }
});
