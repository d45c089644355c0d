//! Property-based test generators using proptest.
//!
//! Records follow the shape of [`crate::fixtures::people`] so generated
//! queries can target [`crate::fixtures::people_indexes`]. Values are drawn
//! from small vocabularies so that conditions actually hit.

use findex_core::{Condition, IndexDeclaration, Match, Query};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Names records are drawn from, besides random words.
pub const NAMES: [&str; 8] = [
    "Alice",
    "Beat",
    "Charlie",
    "Adam",
    "Adalbert",
    "Adonis",
    "Andrea",
    "Antonidas",
];

/// Vocabulary of generated descriptions.
pub const WORDS: [&str; 8] = ["she", "he", "is", "cool", "too", "very", "not", "hot"];

/// Strategy for generating lower-case words.
pub fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,8}").expect("Invalid regex")
}

/// Strategy for generating names, mostly from [`NAMES`].
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(NAMES.to_vec()).prop_map(String::from),
        1 => word_strategy(),
    ]
}

/// Strategy for generating a name prefix of one to three characters.
pub fn prefix_strategy() -> impl Strategy<Value = String> {
    (name_strategy(), 1usize..4).prop_map(|(name, len)| name.chars().take(len).collect())
}

/// Strategy for generating free text over [`WORDS`], with random
/// capitalization and punctuation.
pub fn description_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::sample::select(WORDS.to_vec()), any::<bool>(), prop::sample::select(vec![" ", ", ", "! "])),
        1..5,
    )
    .prop_map(|words| {
        words
            .into_iter()
            .map(|(word, upper, sep)| {
                let word = if upper { word.to_uppercase() } else { word.to_owned() };
                format!("{word}{sep}")
            })
            .collect()
    })
}

/// Strategy for generating finite ages, whole and half.
pub fn age_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        (0u32..100).prop_map(f64::from),
        (0u32..200).prop_map(|n| f64::from(n) / 2.0),
    ]
}

/// Strategy for generating `YYYY-MM-DD` dates.
pub fn date_strategy() -> impl Strategy<Value = String> {
    (1950i32..2020, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

/// Strategy for generating a record; every field but the name may be
/// missing.
pub fn record_strategy() -> impl Strategy<Value = Value> {
    (
        name_strategy(),
        prop::option::of(age_strategy()),
        prop::option::of(date_strategy()),
        prop::option::of(description_strategy()),
    )
        .prop_map(|(name, age, birthday, description)| {
            let mut record = Map::new();
            record.insert("name".into(), Value::from(name));
            if let Some(age) = age {
                record.insert("age".into(), Value::from(age));
            }
            if let Some(birthday) = birthday {
                record.insert("birthday".into(), Value::from(birthday));
            }
            if let Some(description) = description {
                record.insert("description".into(), Value::from(description));
            }
            Value::Object(record)
        })
}

/// Strategy for generating a batch of records.
pub fn record_batch_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(record_strategy(), min..max)
}

/// Strategy for generating one of the four range operators.
pub fn range_match_strategy() -> impl Strategy<Value = Match> {
    prop::sample::select(vec![Match::Gt, Match::Gte, Match::Lt, Match::Lte])
}

/// Strategy for generating wildcard patterns over names.
pub fn pattern_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["a", "ad", "b", "ch", "an", "."]),
        prop::sample::select(vec![".*", ".+", "...", "[a-m]*", "?", "[^d]+", "l?.*"]),
    )
        .prop_map(|(head, tail)| format!("{head}{tail}"))
}

fn leaf(index: IndexDeclaration, value: impl Into<Value>, match_kind: Match) -> Query {
    Query::condition(Condition::new(index, value).with_match(match_kind))
}

/// Strategy for generating a valid condition on one of
/// [`crate::fixtures::people_indexes`].
pub fn condition_strategy() -> impl Strategy<Value = Query> {
    prop_oneof![
        (name_strategy(), prop::sample::select(vec![Match::Eq, Match::Fuzzy]))
            .prop_map(|(name, m)| leaf(IndexDeclaration::word("name"), name, m)),
        prefix_strategy()
            .prop_map(|prefix| leaf(IndexDeclaration::word("name"), prefix, Match::Prefix)),
        pattern_strategy()
            .prop_map(|pattern| leaf(IndexDeclaration::word("name"), pattern, Match::Wildcard)),
        (age_strategy(), prop_oneof![range_match_strategy(), Just(Match::Eq), Just(Match::Fuzzy)])
            .prop_map(|(age, m)| leaf(IndexDeclaration::number("age"), age, m)),
        (date_strategy(), prop_oneof![range_match_strategy(), Just(Match::Eq)])
            .prop_map(|(date, m)| leaf(IndexDeclaration::date("birthday"), date, m)),
        (
            description_strategy(),
            prop::sample::select(vec![Match::Eq, Match::Fuzzy, Match::Prefix])
        )
            .prop_map(|(text, m)| leaf(IndexDeclaration::text("description"), text, m)),
    ]
}

/// Strategy for generating AND/OR trees over [`condition_strategy`].
pub fn query_strategy() -> impl Strategy<Value = Query> {
    condition_strategy().prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Query::And),
            prop::collection::vec(inner, 0..4).prop_map(Query::Or),
        ]
    })
}

/// A proptest configuration for quick runs.
#[must_use]
pub fn quick_config() -> ProptestConfig {
    ProptestConfig {
        cases: 32,
        max_shrink_iters: 100,
        ..ProptestConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findex_core::{key, IndexType};

    proptest! {
        #![proptest_config(quick_config())]

        #[test]
        fn dates_normalize(date in date_strategy()) {
            let keys = key::transform(IndexType::Date, &Value::from(date.clone()));
            prop_assert_eq!(keys, vec![date]);
        }

        #[test]
        fn descriptions_have_words(text in description_strategy()) {
            let keys = key::transform(IndexType::Text, &Value::from(text));
            prop_assert!(!keys.is_empty());
            prop_assert!(keys.iter().all(|k| WORDS.contains(&k.as_str())));
        }

        #[test]
        fn records_always_have_a_name(record in record_strategy()) {
            prop_assert!(record["name"].is_string());
        }

        #[test]
        fn patterns_parse(pattern in pattern_strategy()) {
            prop_assert!(findex_core::pattern::Pattern::parse(&pattern).is_ok());
        }
    }
}
