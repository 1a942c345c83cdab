//! `index_path` over corpus trees.

use std::fs;

use super::common::{assert_engine_well_formed, ids, options, record, simple_record, write_corpus};
use wikidex::{index_path, ArticleId, BuildOptions, Engine, Error};

fn url(name: &str) -> String {
    format!("https://es.wikipedia.org/wiki/{}", name)
}

#[test]
fn ids_follow_file_order() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path(), "b.json", &[simple_record(&url("B1"), "B1", "")]);
    write_corpus(
        dir.path(),
        "a.json",
        &[
            simple_record(&url("A1"), "A1", ""),
            simple_record(&url("A2"), "A2", ""),
        ],
    );
    write_corpus(dir.path(), "sub/c.json", &[simple_record(&url("C1"), "C1", "")]);
    fs::write(dir.path().join("README.txt"), "not a corpus file").unwrap();

    let mut engine = Engine::new(options(false, false, false, false));
    let summary = index_path(&mut engine, dir.path(), &BuildOptions::default()).unwrap();

    assert_eq!(summary.files, 3);
    assert_eq!(summary.indexed, 4);
    let urls: Vec<&str> = engine.articles().iter().map(|a| a.url.as_str()).collect();
    assert_eq!(urls, vec![url("A1"), url("A2"), url("B1"), url("C1")]);
    assert_eq!(engine.article(ArticleId(3)).unwrap().title, "B1");
    assert_engine_well_formed(&engine);
}

#[test]
fn single_file_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_corpus(
        dir.path(),
        "corpus.json",
        &[simple_record(&url("Gato"), "Gato", "Un felino doméstico")],
    );
    let mut engine = Engine::new(Default::default());
    let summary = index_path(&mut engine, &path, &BuildOptions::default()).unwrap();
    assert_eq!(summary.files, 1);
    assert_eq!(engine.solve_query("felino").unwrap(), ids(&[1]));
    assert_eq!(engine.article(ArticleId(1)).unwrap().summary, "Un felino doméstico");
}

#[test]
fn duplicate_urls_keep_the_first_article() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path(), "1.json", &[simple_record(&url("Gato"), "Gato", "felino")]);
    write_corpus(
        dir.path(),
        "2.json",
        &[
            simple_record(&url("Gato"), "Gato repetido", "perro"),
            simple_record(&url("Perro"), "Perro", "canino"),
        ],
    );

    let mut engine = Engine::new(Default::default());
    let summary = index_path(&mut engine, dir.path(), &BuildOptions::default()).unwrap();
    assert_eq!(summary.indexed, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(engine.article(ArticleId(1)).unwrap().title, "Gato");
    assert_eq!(engine.solve_query("perro").unwrap(), ids(&[2]));
    assert!(engine.solve_query("repetido").unwrap().is_empty());
}

#[test]
fn malformed_record_aborts_strict_build() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(
        dir.path(),
        "corpus.json",
        &[
            simple_record(&url("Gato"), "Gato", "felino"),
            "{\"url\": \"sin titulo\"}".to_string(),
        ],
    );

    let mut engine = Engine::new(Default::default());
    let err = index_path(&mut engine, dir.path(), &BuildOptions::default()).unwrap_err();
    match err {
        Error::MalformedRecord { location, .. } => {
            assert!(location.ends_with("corpus.json:2"), "{}", location)
        }
        other => panic!("expected a malformed record, got {:?}", other),
    }
    assert_eq!(engine.article_count(), 0);
}

#[test]
fn permissive_build_skips_bad_lines() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(
        dir.path(),
        "corpus.json",
        &[
            "not json at all".to_string(),
            simple_record(&url("Gato"), "Gato", "felino"),
            String::new(),
            "{\"url\": 3}".to_string(),
        ],
    );

    let mut engine = Engine::new(Default::default());
    let summary = index_path(&mut engine, dir.path(), &BuildOptions { permissive: true }).unwrap();
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.indexed, 1);
    assert_eq!(engine.solve_query("felino").unwrap(), ids(&[1]));
}

#[test]
fn sections_feed_all_and_section_name() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(
        dir.path(),
        "corpus.json",
        &[record(
            &url("Madrid"),
            "Madrid",
            "Capital de España",
            &[("Historia", "Fundada por Muhammad I", &[("Edad Media", "Mayrit")])],
        )],
    );

    let mut engine = Engine::new(options(true, false, false, false));
    index_path(&mut engine, dir.path(), &BuildOptions::default()).unwrap();
    assert_eq!(engine.solve_query("mayrit").unwrap(), ids(&[1]));
    assert_eq!(engine.solve_query("section-name:media").unwrap(), ids(&[1]));
    assert!(engine.solve_query("section-name:mayrit").unwrap().is_empty());
    assert!(engine.solve_query("summary:historia").unwrap().is_empty());
}

#[test]
fn build_produces_derived_indexes() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(
        dir.path(),
        "corpus.json",
        &[
            simple_record(&url("Correr"), "Correr", "corriendo por el parque"),
            simple_record(&url("Saltar"), "Saltar", "saltando"),
        ],
    );

    let mut engine = Engine::new(options(false, false, true, true));
    index_path(&mut engine, dir.path(), &BuildOptions::default()).unwrap();
    assert!(engine.stem_index().is_some());
    assert!(engine.permuterm_index().is_some());
    assert_eq!(engine.solve_query("salt*").unwrap(), ids(&[2]));
    engine.set_stemming(true);
    assert_eq!(engine.solve_query("correr").unwrap(), ids(&[1]));
}

#[test]
fn missing_corpus_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = Engine::new(Default::default());
    assert!(matches!(
        index_path(&mut engine, &dir.path().join("missing"), &BuildOptions::default()),
        Err(Error::Io { .. })
    ));
}
