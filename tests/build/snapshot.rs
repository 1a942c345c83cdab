//! Saving and loading engines.

use std::fs;

use super::common::{all_modes, assert_engine_well_formed, engine_from_texts, options};
use wikidex::{snapshot, Engine, Error};

const TEXTS: &[&str] = &[
    "el gato negro duerme en la casa",
    "los gatos negros corren",
    "un perro blanco ladra",
    "gato y perro juegan",
    "la casa blanca",
];

const QUERIES: &[&str] = &[
    "gato",
    "gato OR perro",
    "casa AND NOT blanca",
    "NOT gato",
    "(negro OR blanco) AND NOT (gato OR gatos)",
    "\"gato negro\"",
    "title:perro",
    "gat*",
    "cas?",
    "url:https://es.wikipedia.org/wiki/3",
];

fn answers(engine: &Engine) -> Vec<Result<Vec<u32>, String>> {
    QUERIES
        .iter()
        .map(|q| {
            engine
                .solve_query(q)
                .map(|ids| ids.into_iter().map(u32::from).collect())
                .map_err(|e| e.to_string())
        })
        .collect()
}

#[test]
fn round_trip_in_every_mode() {
    let dir = tempfile::tempdir().unwrap();
    for (n, options) in all_modes().into_iter().enumerate() {
        let engine = engine_from_texts(options, TEXTS);
        let path = dir.path().join(format!("{}.wkdx", n));
        snapshot::save(&engine, &path).unwrap();
        let loaded = snapshot::load(&path).unwrap();

        assert_engine_well_formed(&loaded);
        assert_eq!(loaded.options(), engine.options());
        assert_eq!(loaded.articles(), engine.articles());
        assert_eq!(loaded.index(), engine.index());
        assert_eq!(loaded.stem_index(), engine.stem_index());
        assert_eq!(loaded.permuterm_index(), engine.permuterm_index());
        assert_eq!(loaded.stats(), engine.stats());
        assert_eq!(answers(&loaded), answers(&engine), "{:?}", options);
    }
}

#[test]
fn stemming_toggle_is_not_persisted() {
    let mut engine = engine_from_texts(options(false, false, true, false), &["correr", "corriendo"]);
    engine.set_stemming(true);
    let loaded = snapshot::from_bytes(&snapshot::to_bytes(&engine).unwrap()).unwrap();
    assert!(!loaded.use_stemming());

    let mut loaded = loaded;
    loaded.set_stemming(true);
    assert_eq!(
        loaded.solve_query("correr").unwrap(),
        engine.solve_query("correr").unwrap()
    );
}

#[test]
fn loaded_engine_accepts_new_articles() {
    let engine = engine_from_texts(options(false, false, false, true), &["gato"]);
    let mut loaded = snapshot::from_bytes(&snapshot::to_bytes(&engine).unwrap()).unwrap();
    let id = loaded.index_article(&super::common::article(2, "gata"));
    assert_eq!(id.map(u32::from), Some(2));
    assert!(loaded.index_article(&super::common::article(1, "otra vez")).is_none());
    loaded.build_derived_indexes();
    assert_eq!(loaded.solve_query("gat*").unwrap().len(), 2);
}

#[test]
fn corrupted_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.wkdx");
    let engine = engine_from_texts(options(true, true, true, true), TEXTS);
    snapshot::save(&engine, &path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xff;
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(snapshot::load(&path), Err(Error::Snapshot(_))));
}

#[test]
fn foreign_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "definitely not an index, just some text on disk").unwrap();
    assert!(matches!(snapshot::load(&path), Err(Error::Snapshot(_))));

    fs::write(&path, b"").unwrap();
    assert!(matches!(snapshot::load(&path), Err(Error::Snapshot(_))));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        snapshot::load(&dir.path().join("missing.wkdx")),
        Err(Error::Io { .. })
    ));
}
