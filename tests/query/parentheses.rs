//! Parenthesized groups resolve innermost first.

use super::common::{engine_from_texts, ids, options};
use wikidex::query::MAX_GROUP_DEPTH;
use wikidex::{Engine, Error, IndexOptions};

/// a: 1 2 5, b: 1 3, c: 2 4, d: 1 2 3
fn letters() -> Engine {
    engine_from_texts(
        IndexOptions::default(),
        &["a b d", "a c d", "b d", "c", "a"],
    )
}

#[test]
fn nested_groups() {
    let engine = letters();
    // (a AND b) = 1; OR c = 1 2 4; AND d = 1 2
    assert_eq!(
        engine.solve_query("((a AND b) OR c) AND d").unwrap(),
        ids(&[1, 2])
    );
}

#[test]
fn group_changes_meaning() {
    let engine = letters();
    assert_eq!(engine.solve_query("a OR b AND c").unwrap(), ids(&[2]));
    assert_eq!(engine.solve_query("a OR (b AND c)").unwrap(), ids(&[1, 2, 5]));
}

#[test]
fn negated_group() {
    let engine = letters();
    assert_eq!(engine.solve_query("NOT (a OR c)").unwrap(), ids(&[3]));
    assert_eq!(engine.solve_query("d AND NOT (a AND b)").unwrap(), ids(&[2, 3]));
}

#[test]
fn sibling_groups() {
    let engine = letters();
    assert_eq!(
        engine.solve_query("(a AND d) OR (b AND NOT a)").unwrap(),
        ids(&[1, 2, 3])
    );
}

#[test]
fn deeply_nested() {
    let engine = letters();
    assert_eq!(engine.solve_query("((((a))))").unwrap(), ids(&[1, 2, 5]));
    assert_eq!(
        engine.solve_query("(a AND (b OR (c AND (d)))) OR c").unwrap(),
        ids(&[1, 2, 4])
    );
}

#[test]
fn group_without_spaces() {
    let engine = letters();
    assert_eq!(engine.solve_query("(a)AND(c)").unwrap(), ids(&[2]));
}

#[test]
fn identical_groups() {
    let engine = letters();
    assert_eq!(engine.solve_query("(a) AND (a)").unwrap(), ids(&[1, 2, 5]));
}

#[test]
fn text_that_looks_like_a_placeholder() {
    let engine = letters();
    // never issued as a placeholder, so it is an ordinary (absent) term
    assert_eq!(engine.solve_query("(%1c2b3a4d) OR c").unwrap(), ids(&[2, 4]));
    assert_eq!(engine.solve_query("%1c2b3a4d OR (c)").unwrap(), ids(&[2, 4]));
}

#[test]
fn unbalanced() {
    let engine = letters();
    for query in ["(a AND b", "a AND b)", "((a)", "(a))", ")("] {
        assert!(
            matches!(engine.solve_query(query), Err(Error::UnsupportedQuery(_))),
            "{:?}",
            query
        );
    }
}

#[test]
fn empty_group() {
    let engine = letters();
    assert!(matches!(
        engine.solve_query("()"),
        Err(Error::UnsupportedQuery(_))
    ));
}

#[test]
fn malformed_inner_query() {
    let engine = letters();
    assert!(matches!(
        engine.solve_query("a AND (b c)"),
        Err(Error::UnsupportedQuery(_))
    ));
}

fn nested(depth: usize) -> String {
    format!("{}a{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn deep_nesting_up_to_the_limit() {
    let engine = letters();
    assert_eq!(
        engine.solve_query(&nested(MAX_GROUP_DEPTH)).unwrap(),
        ids(&[1, 2, 5])
    );
}

#[test]
fn nesting_past_the_limit_is_rejected() {
    let engine = letters();
    for depth in [MAX_GROUP_DEPTH + 1, 2000, 10_000] {
        match engine.solve_query(&nested(depth)) {
            Err(Error::UnsupportedQuery(reason)) => {
                assert!(reason.contains("nested too deeply"), "{}", reason)
            }
            other => panic!("depth {} gave {:?}", depth, other),
        }
    }
}

#[test]
fn parentheses_inside_a_phrase_are_rejected() {
    let engine = engine_from_texts(options(false, true, false, false), &["a b c d"]);
    assert!(matches!(
        engine.solve_query("\"a (b OR c) d\""),
        Err(Error::UnsupportedQuery(_))
    ));
    assert!(matches!(
        engine.solve_query("(\"a b)\" OR c"),
        Err(Error::UnsupportedQuery(_))
    ));
    assert_eq!(
        engine.solve_query("(\"a b\" OR x) AND d").unwrap(),
        ids(&[1])
    );
}
