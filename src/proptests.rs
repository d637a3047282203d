use std::collections::HashSet;

use proptest::prelude::*;

use crate::node::Node;
use crate::sink::ResultSink;
use crate::tree::PathSet;

/// Walk the whole tree and assert the structural invariants: children
/// strictly ordered by fragment, no two siblings sharing a first byte,
/// and no empty fragment anywhere below the root.
fn validate(set: &PathSet) {
    let mut stack: Vec<(&Node, bool)> = vec![(&set.root, true)];
    while let Some((node, is_root)) = stack.pop() {
        if !is_root {
            assert!(
                !node.fragment.is_empty(),
                "non-root node with an empty fragment"
            );
        }
        let mut prev: Option<&[u8]> = None;
        let mut first_bytes = HashSet::new();
        for child in node.children.iter() {
            let frag = child.fragment.as_slice();
            if let Some(prev) = prev {
                assert!(prev < frag, "children out of order: {prev:?} !< {frag:?}");
            }
            let first = *frag.first().expect("child with empty fragment");
            assert!(
                first_bytes.insert(first),
                "siblings share first byte {first:#04x}"
            );
            prev = Some(frag);
            stack.push((child, false));
        }
    }
}

fn full_results(set: &PathSet, prefix: &str) -> Option<Vec<Vec<u8>>> {
    let mut sink = ResultSink::new();
    set.find_prefix_full(prefix, &mut sink)
        .unwrap()
        .then(|| sink.into_results())
}

/// Keys the structure will expose as leaves: those no other key extends.
fn maximal_keys<'a>(keys: &'a HashSet<String>) -> Vec<&'a String> {
    keys.iter()
        .filter(|k| !keys.iter().any(|o| o != *k && o.starts_with(k.as_str())))
        .collect()
}

fn path_keys() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set("[a-c]{1,3}(/[a-c]{1,3}){0,3}", 1..24)
}

proptest! {
    #[test]
    fn prop_roundtrip_contains(keys in path_keys()) {
        let mut set = PathSet::new();
        for key in &keys {
            // A key can already sit at a boundary another pair of keys
            // split out, so the insert result is not asserted here.
            set.insert(key).unwrap();
            validate(&set);
        }
        for key in &keys {
            prop_assert!(set.contains(key));
            // Re-inserting is a no-op and must not disturb anything.
            prop_assert!(!set.insert(key).unwrap());
        }
        validate(&set);
        prop_assert_eq!(set.key_count(), maximal_keys(&keys).len());
    }

    #[test]
    fn prop_absent_probes_not_found(keys in path_keys()) {
        let mut set = PathSet::new();
        for key in &keys {
            set.insert(key).unwrap();
        }
        // '~' never occurs in a stored key, so these probes are neither
        // keys nor interior boundaries.
        for key in &keys {
            let probe = format!("{key}~");
            prop_assert!(!set.contains(&probe));
            prop_assert!(!set.remove(&probe));
        }
    }

    #[test]
    fn prop_full_enumeration_matches_model(keys in path_keys()) {
        let mut set = PathSet::new();
        for key in &keys {
            set.insert(key).unwrap();
        }

        // Every inserted key is a fragment boundary, so enumeration from
        // it must succeed and yield exactly the leaves below it, in
        // lexicographic order.
        for prefix in &keys {
            let results = full_results(&set, prefix).expect("inserted key not a boundary");
            let mut expected: Vec<Vec<u8>> = maximal_keys(&keys)
                .into_iter()
                .filter(|k| k.starts_with(prefix.as_str()))
                .map(|k| k.as_bytes().to_vec())
                .collect();
            expected.sort();
            prop_assert_eq!(results, expected);
        }
    }

    #[test]
    fn prop_partial_results_are_a_set(keys in path_keys()) {
        let mut set = PathSet::new();
        for key in &keys {
            set.insert(key).unwrap();
        }
        for prefix in &keys {
            let mut sink = ResultSink::new();
            if set.find_prefix_partial(prefix, &mut sink).unwrap() {
                let unique: HashSet<&[u8]> = sink.iter().collect();
                prop_assert_eq!(unique.len(), sink.len());
            }
        }
    }

    #[test]
    fn prop_remove_maximal_key_is_isolated(keys in path_keys()) {
        let mut set = PathSet::new();
        for key in &keys {
            set.insert(key).unwrap();
        }

        let maximal: Vec<String> = maximal_keys(&keys).into_iter().cloned().collect();
        for (idx, victim) in maximal.iter().enumerate() {
            prop_assert!(set.remove(victim));
            validate(&set);
            prop_assert!(!set.contains(victim));
            // Maximal keys map to single leaves, so nothing else rides on
            // the removed subtree.
            for other in &maximal[idx + 1..] {
                prop_assert!(set.contains(other));
            }
        }
        for key in &keys {
            if !maximal.contains(key) {
                // Interior boundaries survive their leaves.
                prop_assert!(set.contains(key));
            }
        }
    }
}
