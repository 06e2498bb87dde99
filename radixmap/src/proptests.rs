use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::ops::ControlFlow;

fn validate_node<V>(node: &Node<V>, is_root: bool) -> usize {
    if is_root {
        assert!(node.prefix().is_empty(), "root must have an empty prefix");
    } else {
        assert!(!node.prefix().is_empty(), "non-root node with empty prefix");
        assert!(
            node.has_value() || node.num_children() >= 2,
            "valueless node with {} children must have been compacted",
            node.num_children()
        );
    }

    let mut values = usize::from(node.has_value());
    let mut prev: Option<u8> = None;
    for edge in node.edges() {
        assert_eq!(
            edge.label(),
            edge.node().prefix()[0],
            "edge label must be the child's first prefix byte"
        );
        if let Some(p) = prev {
            assert!(p < edge.label(), "edge labels must be strictly increasing");
        }
        prev = Some(edge.label());
        values += validate_node(edge.node(), false);
    }
    values
}

fn validate_tree<V>(t: &RadixTree<V>) {
    assert_eq!(
        validate_node(t.root(), true),
        t.len(),
        "value-bearing node count must match RadixTree::len"
    );
}

fn longest_prefix_model<'a>(m: &'a BTreeMap<Vec<u8>, u64>, q: &[u8]) -> Option<(usize, &'a u64)> {
    (0..=q.len())
        .rev()
        .find_map(|len| m.get(&q[..len]).map(|v| (len, v)))
}

#[derive(Clone, Debug)]
enum Op {
    Insert(Vec<u8>, u64),
    Remove(Vec<u8>),
    RemovePrefix(Vec<u8>),
    Get(Vec<u8>),
    LongestPrefix(Vec<u8>),
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A narrow alphabet so keys share prefixes and exercise splits and merges, with the
    // occasional arbitrary byte for the extremes of the label range.
    let byte = prop_oneof![
        10 => prop::sample::select(vec![b'a', b'b', b'c']),
        1 => any::<u8>(),
    ];
    prop::collection::vec(byte, 0..=8)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        3 => key.clone().prop_map(Op::RemovePrefix),
        12 => key.clone().prop_map(Op::Get),
        10 => key.clone().prop_map(Op::LongestPrefix),
    ];
    prop::collection::vec(op, 0..=500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t: RadixTree<u64> = RadixTree::new();
        let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let old_t = t.insert(&key, value);
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Remove(key) => {
                    let old_t = t.remove(&key);
                    let old_m = m.remove(key.as_slice());
                    prop_assert_eq!(old_t, old_m);
                    prop_assert_eq!(t.get(&key), None);
                }
                Op::RemovePrefix(prefix) => {
                    let before = m.len();
                    m.retain(|k, _| !k.starts_with(&prefix));
                    prop_assert_eq!(t.remove_prefix(&prefix), before - m.len());
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key), m.get(key.as_slice()));
                }
                Op::LongestPrefix(key) => {
                    let got = t.longest_prefix(&key).map(|(k, v)| (k.len(), v));
                    prop_assert_eq!(got, longest_prefix_model(&m, &key));
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);

        let got: Vec<(Vec<u8>, u64)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(Vec<u8>, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(&got, &expected);

        let mut walked = vec![];
        let _ = t.walk(|k, v| {
            walked.push((k.to_vec(), *v));
            ControlFlow::Continue(())
        });
        prop_assert_eq!(&walked, &expected);

        prop_assert_eq!(t.minimum().map(|(k, v)| (k, *v)), expected.first().cloned());
        prop_assert_eq!(t.maximum().map(|(k, v)| (k, *v)), expected.last().cloned());
    }

    #[test]
    fn prop_prefix_iter_matches_filter(
        entries in prop::collection::vec((key_strategy(), any::<u64>()), 0..=200),
        prefix in key_strategy(),
    ) {
        let t: RadixTree<u64> = entries.iter().map(|(k, v)| (k, *v)).collect();
        let m: BTreeMap<Vec<u8>, u64> = entries.into_iter().collect();

        let expected: Vec<(Vec<u8>, u64)> = m
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        let got: Vec<(Vec<u8>, u64)> = t.prefix_iter(&prefix).map(|(k, v)| (k, *v)).collect();
        prop_assert_eq!(&got, &expected);

        let mut walked = vec![];
        let _ = t.walk_prefix(&prefix, |k, v| {
            walked.push((k.to_vec(), *v));
            ControlFlow::Continue(())
        });
        prop_assert_eq!(&walked, &expected);

        // Ancestors: stored keys that are prefixes of the query, shortest first.
        let expected_path: Vec<Vec<u8>> = (0..=prefix.len())
            .map(|len| prefix[..len].to_vec())
            .filter(|k| m.contains_key(k))
            .collect();
        let mut path = vec![];
        let _ = t.walk_path(&prefix, |k, _| {
            path.push(k.to_vec());
            ControlFlow::Continue(())
        });
        prop_assert_eq!(path, expected_path);
    }

    #[test]
    fn prop_remove_prefix_matches_single_removes(
        entries in prop::collection::vec((key_strategy(), any::<u64>()), 0..=200),
        prefix in key_strategy(),
    ) {
        let mut bulk: RadixTree<u64> = entries.iter().map(|(k, v)| (k, *v)).collect();
        let mut single: RadixTree<u64> = entries.iter().map(|(k, v)| (k, *v)).collect();

        let doomed: Vec<Vec<u8>> = single.prefix_iter(&prefix).map(|(k, _)| k).collect();
        for k in &doomed {
            prop_assert!(single.remove(k).is_some());
        }

        prop_assert_eq!(bulk.remove_prefix(&prefix), doomed.len());
        validate_tree(&bulk);
        validate_tree(&single);
        prop_assert_eq!(bulk.len(), single.len());
        prop_assert_eq!(bulk.to_map(), single.to_map());
    }
}
