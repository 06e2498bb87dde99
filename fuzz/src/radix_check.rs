#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use radixmap::RadixTree;

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: Vec<u8> },
    Insert { key: Vec<u8>, val: usize },
    Update { key: Vec<u8>, val: usize },
    Delete { key: Vec<u8> },
    DeletePrefix { prefix: Vec<u8> },
    LongestPrefix { key: Vec<u8> },
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut tree = RadixTree::<usize>::new();
    let mut bt_map = BTreeMap::<Vec<u8>, usize>::new();

    for m in methods {
        match m {
            MapMethod::Get { key } => {
                assert_eq!(tree.get(&key), bt_map.get(&key));
            }
            MapMethod::Insert { key, val } => {
                let r_insert = tree.insert(&key, val);
                let bt_insert = bt_map.insert(key, val);
                assert_eq!(r_insert, bt_insert);
            }
            MapMethod::Update { key, val } => {
                let old_bt = bt_map.get_mut(&key);
                let old_tree = tree.get_mut(&key);
                assert_eq!(old_tree, old_bt);
                if let (Some(old_bt), Some(old_tree)) = (old_bt, old_tree) {
                    *old_bt = val;
                    *old_tree = val;
                }
                assert_eq!(tree.get(&key), bt_map.get(&key));
            }
            MapMethod::Delete { key } => {
                assert_eq!(tree.remove(&key), bt_map.remove(&key));
            }
            MapMethod::DeletePrefix { prefix } => {
                let before = bt_map.len();
                bt_map.retain(|k, _| !k.starts_with(&prefix));
                assert_eq!(tree.remove_prefix(&prefix), before - bt_map.len());
            }
            MapMethod::LongestPrefix { key } => {
                let expected = (0..=key.len())
                    .rev()
                    .find_map(|len| bt_map.get(&key[..len]).map(|v| (len, v)));
                let got = tree.longest_prefix(&key).map(|(k, v)| (k.len(), v));
                assert_eq!(got, expected);
            }
        }
        assert_eq!(tree.len(), bt_map.len());
    }

    let tree_entries: Vec<(Vec<u8>, usize)> = tree.iter().map(|(k, v)| (k, *v)).collect();
    let bt_entries: Vec<(Vec<u8>, usize)> = bt_map.into_iter().collect();
    assert_eq!(tree_entries, bt_entries);
});
