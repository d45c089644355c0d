//! End-to-end query scenarios.

use findex_core::{CoreError, EngineConfig, IndexDeclaration, IndexEngine, Match, Query};
use findex_testkit::prelude::*;
use serde_json::json;

fn name(value: &str, match_kind: Match) -> Query {
    condition(IndexDeclaration::word("name"), value, match_kind)
}

#[test]
fn prefix_over_names() {
    let engine = names_engine(&["Adam", "Adalbert", "Adonis", "Andrea", "Antonidas"]);
    let found = engine.find(&name("ad", Match::Prefix)).unwrap();
    assert_eq!(names_of(&found), ["Adam", "Adalbert", "Adonis"]);

    let found = engine.find(&name("AN", Match::Prefix)).unwrap();
    assert_eq!(names_of(&found), ["Andrea", "Antonidas"]);
}

#[test]
fn fuzzy_over_names() {
    let engine = names_engine(&["halloween", "hallo", "hello"]);
    // nine letters allow four edits
    assert_eq!(
        names_of(&engine.find(&name("helloween", Match::Fuzzy)).unwrap()),
        ["halloween", "hello"]
    );
    // five letters allow two
    assert_eq!(
        names_of(&engine.find(&name("hullo", Match::Fuzzy)).unwrap()),
        ["hallo", "hello"]
    );
}

#[test]
fn wildcard_over_names() {
    let engine = names_engine(&["hello", "hell", "halloween", "helsinki", "halbert"]);
    assert_eq!(
        names_of(&engine.find(&name("hell.*", Match::Wildcard)).unwrap()),
        ["hello", "hell"]
    );
    assert_eq!(names_of(&engine.find(&name("hell.+", Match::Wildcard)).unwrap()), ["hello"]);
    assert_eq!(
        names_of(&engine.find(&name("ha?e?lloween", Match::Wildcard)).unwrap()),
        ["halloween"]
    );
}

#[test]
fn people_mixed_query() {
    let engine = people_engine();
    // (age > 26 and "cool") or born before 1990, named a...e
    let query = Query::and([
        Query::or([
            Query::and([
                condition(IndexDeclaration::number("age"), 26, Match::Gt),
                condition(IndexDeclaration::text("description"), "COOL", Match::Eq),
            ]),
            condition(IndexDeclaration::date("birthday"), "1990-01-01", Match::Lt),
        ]),
        name("a.*e", Match::Wildcard),
    ]);
    assert_eq!(names_of(&engine.find(&query).unwrap()), ["Alice"]);
}

#[test]
fn query_from_json_text() {
    let engine = people_engine();
    let query = Query::from_json(
        r#"{ "or": [
            { "condition": { "index": { "key": "age", "type": "NUMBER" }, "value": 35, "match": ">=" } },
            { "condition": { "index": { "key": "name", "type": "WORD" }, "value": "beat" } }
        ] }"#,
    )
    .unwrap();
    assert_eq!(names_of(&engine.find(&query).unwrap()), ["Beat", "Charlie"]);
}

#[test]
fn records_without_the_field_are_skipped() {
    let mut engine = people_engine();
    engine.add_data([json!({ "name": "Nobody" }), json!({ "name": "Blank", "age": "" })]);

    let found = engine
        .find(&condition(IndexDeclaration::number("age"), 0, Match::Gte))
        .unwrap();
    assert_eq!(names_of(&found), ["Alice", "Beat", "Charlie"]);
    assert_eq!(engine.record_count(), 5);
}

#[test]
fn late_declaration_needs_re_index() {
    let mut engine = IndexEngine::new(EngineConfig::new().strict_declarations(true));
    engine.add_data(people());

    let query = name("alice", Match::Eq);
    assert!(matches!(engine.find(&query), Err(CoreError::InvalidOperation { .. })));

    engine.add_index(IndexDeclaration::word("name"));
    assert!(engine.find(&query).unwrap().is_empty());

    engine.re_index();
    assert_eq!(names_of(&engine.find(&query).unwrap()), ["Alice"]);
}

#[test]
fn large_sorted_input() {
    let engine = scenarios::numbered_engine(5_000);
    let found = engine
        .find(&Query::and([
            condition(IndexDeclaration::number("n"), 4_990, Match::Gte),
            word_eq("tag", "green"),
        ]))
        .unwrap();
    let ns: Vec<_> = found.iter().map(|r| r["n"].as_u64().unwrap_or_default()).collect();
    assert_eq!(ns, [4_990, 4_993, 4_996, 4_999]);
}
