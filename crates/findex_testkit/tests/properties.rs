//! Property tests across findex_core and the testkit oracle.

use findex_core::ordered::{NumberOrder, OrderedSet, OrderedTree, SortedArray};
use findex_core::{levenshtein, EngineConfig, IndexDeclaration, IndexEngine, Match, OrderedBackend, Query, Trie};
use findex_testkit::prelude::*;
use proptest::prelude::*;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

fn engine_over(records: Vec<Value>, backend: OrderedBackend) -> IndexEngine {
    let mut engine = IndexEngine::new(EngineConfig::new().ordered_backend(backend));
    for declaration in people_indexes() {
        engine.add_index(declaration);
    }
    engine.add_data(records);
    engine
}

fn pointers(results: &[Arc<Value>]) -> BTreeSet<usize> {
    results.iter().map(|r| Arc::as_ptr(r) as usize).collect()
}

fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values
}

proptest! {
    #![proptest_config(quick_config())]

    #[test]
    fn engine_agrees_with_oracle(
        records in record_batch_strategy(0, 24),
        query in query_strategy(),
    ) {
        let engine = engine_over(records, OrderedBackend::Tree);
        assert_agrees(&engine, &query);
    }

    #[test]
    fn backends_agree(records in record_batch_strategy(1, 24), query in query_strategy()) {
        let tree = engine_over(records.clone(), OrderedBackend::Tree);
        let sorted = engine_over(records, OrderedBackend::SortedArray);
        prop_assert_eq!(tree.find(&query).unwrap(), sorted.find(&query).unwrap());
    }

    #[test]
    fn gte_is_gt_or_eq(records in record_batch_strategy(1, 24), age in age_strategy()) {
        let engine = engine_over(records, OrderedBackend::Tree);
        let age_index = IndexDeclaration::number("age");

        let gte = engine.find(&condition(age_index.clone(), age, Match::Gte)).unwrap();
        let gt = engine.find(&condition(age_index.clone(), age, Match::Gt)).unwrap();
        let eq = engine.find(&condition(age_index, age, Match::Eq)).unwrap();

        let union: BTreeSet<usize> = pointers(&gt).union(&pointers(&eq)).copied().collect();
        prop_assert_eq!(pointers(&gte), union);
        prop_assert!(pointers(&gt).is_disjoint(&pointers(&eq)));
    }

    #[test]
    fn and_is_intersection_or_is_union(
        records in record_batch_strategy(1, 24),
        a in condition_strategy(),
        b in condition_strategy(),
    ) {
        let engine = engine_over(records, OrderedBackend::Tree);
        let left = pointers(&engine.find(&a).unwrap());
        let right = pointers(&engine.find(&b).unwrap());

        let and = pointers(&engine.find(&Query::and([a.clone(), b.clone()])).unwrap());
        let or = pointers(&engine.find(&Query::or([a, b])).unwrap());

        prop_assert_eq!(and, left.intersection(&right).copied().collect::<BTreeSet<_>>());
        prop_assert_eq!(or, left.union(&right).copied().collect::<BTreeSet<_>>());
    }

    #[test]
    fn results_keep_submission_order(records in record_batch_strategy(1, 24), query in query_strategy()) {
        let engine = engine_over(records, OrderedBackend::Tree);
        let position = |r: &Arc<Value>| engine.records().iter().position(|x| Arc::ptr_eq(x, r));

        let found = engine.find(&query).unwrap();
        let positions: Vec<_> = found.iter().map(position).collect();
        let mut expected = positions.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(positions, expected);
    }

    #[test]
    fn prefix_results_start_with_prefix(records in record_batch_strategy(1, 24), prefix in prefix_strategy()) {
        let engine = engine_over(records, OrderedBackend::Tree);
        let found = engine
            .find(&condition(IndexDeclaration::word("name"), prefix.as_str(), Match::Prefix))
            .unwrap();
        let prefix = prefix.to_lowercase();
        for name in names_of(&found) {
            prop_assert!(name.to_lowercase().starts_with(&prefix), "{} / {}", name, prefix);
        }
    }

    #[test]
    fn every_name_fuzzy_matches_itself(records in record_batch_strategy(1, 24)) {
        let engine = engine_over(records, OrderedBackend::Tree);
        for record in engine.records() {
            let name = record["name"].as_str().unwrap_or_default();
            let found = engine
                .find(&condition(IndexDeclaration::word("name"), name, Match::Fuzzy))
                .unwrap();
            prop_assert!(found.iter().any(|r| Arc::ptr_eq(r, record)));
        }
    }

    #[test]
    fn re_index_changes_nothing(records in record_batch_strategy(0, 24), query in query_strategy()) {
        let mut engine = engine_over(records, OrderedBackend::Tree);
        let before = engine.find(&query).unwrap();
        engine.re_index();
        prop_assert_eq!(engine.find(&query).unwrap(), before);
    }

    #[test]
    fn ordered_sets_hold_distinct_values(values in prop::collection::vec(age_strategy(), 0..64)) {
        let mut tree = OrderedTree::new(NumberOrder);
        let mut array = SortedArray::new(NumberOrder);
        for v in &values {
            prop_assert_eq!(tree.insert(*v), array.insert(*v));
        }

        let mut distinct = sorted(values);
        distinct.dedup();
        prop_assert_eq!(sorted(tree.values()), distinct.clone());
        prop_assert_eq!(array.values(), distinct);
    }

    #[test]
    fn tree_ranges_match_filter(
        values in prop::collection::vec(age_strategy(), 0..64),
        reference in age_strategy(),
    ) {
        let mut tree = OrderedTree::new(NumberOrder);
        for v in &values {
            tree.insert(*v);
        }
        let mut all = sorted(values);
        all.dedup();
        let filter = |keep: fn(f64, f64) -> bool| -> Vec<f64> {
            all.iter().copied().filter(|v| keep(*v, reference)).collect()
        };

        prop_assert_eq!(sorted(tree.greater_than(&reference)), filter(|v, r| v > r));
        prop_assert_eq!(sorted(tree.greater_than_or_equal(&reference)), filter(|v, r| v >= r));
        prop_assert_eq!(sorted(tree.less_than(&reference)), filter(|v, r| v < r));
        prop_assert_eq!(sorted(tree.less_than_or_equal(&reference)), filter(|v, r| v <= r));
    }

    #[test]
    fn trie_fuzzy_is_bounded_edit_distance(
        words in prop::collection::vec(word_strategy(), 1..16),
        query in word_strategy(),
        max in 0usize..3,
    ) {
        let mut trie = Trie::new();
        for word in &words {
            trie.insert(word);
        }
        let expected: BTreeSet<String> = words
            .iter()
            .filter(|w| levenshtein::levenshtein(&query, w) <= max)
            .cloned()
            .collect();
        let found: BTreeSet<String> = trie.find_fuzzy(&query, max).into_iter().collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn levenshtein_is_a_metric(a in word_strategy(), b in word_strategy(), c in word_strategy()) {
        use findex_core::levenshtein::levenshtein as d;
        prop_assert_eq!(d(&a, &a), 0);
        prop_assert_eq!(d(&a, &b), d(&b, &a));
        prop_assert!(d(&a, &c) <= d(&a, &b) + d(&b, &c));
    }
}
