//! `field:term` qualifiers over multi-field indexes.

use super::common::{ids, options, record, simple_record};
use wikidex::{Engine, Error, IndexOptions};

fn wiki(options: IndexOptions) -> Engine {
    let mut engine = Engine::new(options);
    let records = [
        record(
            "https://es.wikipedia.org/wiki/Madrid",
            "Madrid",
            "Capital de España",
            &[(
                "Historia",
                "Fundada en el siglo IX",
                &[("Edad Media", "Una fortaleza musulmana")],
            )],
        ),
        record(
            "https://es.wikipedia.org/wiki/Toledo",
            "Toledo",
            "Ciudad cerca de Madrid",
            &[("Geografía", "Junto al río Tajo", &[])],
        ),
        simple_record(
            "https://es.wikipedia.org/wiki/Historia",
            "Historia",
            "Ciencia que estudia el pasado",
        ),
    ];
    for (i, line) in records.iter().enumerate() {
        engine
            .index_record(line, &format!("fixture:{}", i + 1))
            .unwrap();
    }
    engine.build_derived_indexes();
    engine
}

fn multifield() -> Engine {
    wiki(options(true, true, false, false))
}

#[test]
fn default_field_is_all() {
    let engine = multifield();
    assert_eq!(engine.solve_query("madrid").unwrap(), ids(&[1, 2]));
    assert_eq!(engine.solve_query("all:madrid").unwrap(), ids(&[1, 2]));
}

#[test]
fn title_field() {
    let engine = multifield();
    assert_eq!(engine.solve_query("title:madrid").unwrap(), ids(&[1]));
    assert_eq!(engine.solve_query("title:historia").unwrap(), ids(&[3]));
}

#[test]
fn summary_field() {
    let engine = multifield();
    assert_eq!(engine.solve_query("summary:madrid").unwrap(), ids(&[2]));
}

#[test]
fn section_name_field_includes_subsections() {
    let engine = multifield();
    assert_eq!(engine.solve_query("section-name:historia").unwrap(), ids(&[1]));
    assert_eq!(engine.solve_query("section-name:media").unwrap(), ids(&[1]));
    assert!(engine.solve_query("section-name:tajo").unwrap().is_empty());
}

#[test]
fn all_field_includes_section_bodies() {
    let engine = multifield();
    assert_eq!(engine.solve_query("fortaleza").unwrap(), ids(&[1]));
    assert_eq!(engine.solve_query("tajo").unwrap(), ids(&[2]));
}

#[test]
fn url_is_one_literal_term() {
    let engine = multifield();
    assert_eq!(
        engine
            .solve_query("url:https://es.wikipedia.org/wiki/Toledo")
            .unwrap(),
        ids(&[2])
    );
    // not tokenized, not lower-cased
    assert!(engine.solve_query("url:toledo").unwrap().is_empty());
    assert!(engine
        .solve_query("url:https://es.wikipedia.org/wiki/toledo")
        .unwrap()
        .is_empty());
}

#[test]
fn mixed_fields() {
    let engine = multifield();
    assert_eq!(
        engine
            .solve_query("title:madrid OR summary:madrid AND NOT section-name:geografía")
            .unwrap(),
        ids(&[1])
    );
}

#[test]
fn field_qualified_phrase() {
    let engine = multifield();
    assert_eq!(
        engine.solve_query("summary:\"capital de españa\"").unwrap(),
        ids(&[1])
    );
    assert!(engine
        .solve_query("title:\"capital de españa\"")
        .unwrap()
        .is_empty());
    assert_eq!(
        engine.solve_query("section-name:\"edad media\"").unwrap(),
        ids(&[1])
    );
}

#[test]
fn field_inside_group() {
    let engine = multifield();
    assert_eq!(
        engine
            .solve_query("(title:toledo OR title:historia) AND ciudad")
            .unwrap(),
        ids(&[2])
    );
}

#[test]
fn unknown_field() {
    let engine = multifield();
    assert!(matches!(
        engine.solve_query("body:madrid"),
        Err(Error::UnsupportedQuery(_))
    ));
    assert!(matches!(
        engine.solve_query("body:\"capital de\""),
        Err(Error::UnsupportedQuery(_))
    ));
}

#[test]
fn field_not_built() {
    let engine = wiki(IndexOptions::default());
    assert!(matches!(
        engine.solve_query("title:madrid"),
        Err(Error::ModeMismatch { .. })
    ));
    assert_eq!(engine.solve_query("all:madrid").unwrap(), ids(&[1, 2]));
}
