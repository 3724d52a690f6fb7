//! Property-based tests for the ordered keyed map
//!
//! Every positional operation is checked against a plain `Vec` of keys.

use gridcraft_core::OrderedMap;
use proptest::prelude::*;

/// Strategy for a set of distinct short keys in random order
fn distinct_keys() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,4}", 1..20)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

fn keys_of(map: &OrderedMap<String, usize>) -> Vec<String> {
    map.keys().cloned().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Appending without reordering keeps insertion order.
    #[test]
    fn prop_push_preserves_insertion_order(keys in distinct_keys()) {
        let mut map = OrderedMap::new();
        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(map.push(key.clone(), i), Ok(i));
        }
        let entries = map.to_ordered_entries();
        let expected: Vec<_> = keys.iter().cloned().zip(0..).collect();
        prop_assert_eq!(entries, expected);
    }

    /// `insert_at` lands exactly where `Vec::insert` would after clamping.
    #[test]
    fn prop_insert_at_matches_vec_model(
        keys in distinct_keys(),
        indices in prop::collection::vec(0usize..40, 20),
    ) {
        let mut map = OrderedMap::new();
        let mut model: Vec<String> = Vec::new();
        for (key, index) in keys.iter().zip(indices) {
            let clamped = index.min(model.len());
            prop_assert_eq!(map.insert_at(key.clone(), 0, index), Ok(clamped));
            model.insert(clamped, key.clone());
        }
        prop_assert_eq!(keys_of(&map), model);
    }

    /// Re-inserting any present key fails and leaves the map unchanged.
    #[test]
    fn prop_duplicate_insert_is_rejected(keys in distinct_keys(), pick in any::<prop::sample::Index>()) {
        let mut map = OrderedMap::try_from_entries(keys.iter().cloned().zip(0..)).unwrap();
        let before = map.clone();
        let key = pick.get(&keys).clone();
        prop_assert!(map.insert_at(key, 99, 0).is_err());
        prop_assert_eq!(map, before);
    }

    /// `move_key` is remove-then-insert at the post-removal index.
    #[test]
    fn prop_move_key_matches_remove_then_insert(
        keys in distinct_keys(),
        pick in any::<prop::sample::Index>(),
        target in 0usize..40,
    ) {
        let mut map = OrderedMap::try_from_entries(keys.iter().cloned().zip(0..)).unwrap();
        let key = pick.get(&keys).clone();

        let mut model = keys.clone();
        let from = model.iter().position(|k| *k == key).unwrap();
        let moved = model.remove(from);
        let to = target.min(model.len());
        model.insert(to, moved);

        prop_assert_eq!(map.move_key(key.as_str(), target), Some(to));
        prop_assert_eq!(keys_of(&map), model);
    }

    /// Removing reports the former position and keeps the rest in order.
    #[test]
    fn prop_remove_keeps_relative_order(keys in distinct_keys(), pick in any::<prop::sample::Index>()) {
        let mut map = OrderedMap::try_from_entries(keys.iter().cloned().zip(0..)).unwrap();
        let index = pick.index(keys.len());
        let removed = map.remove_by_key(keys[index].as_str()).unwrap();
        prop_assert_eq!(removed.index, index);
        let mut model = keys.clone();
        model.remove(index);
        prop_assert_eq!(keys_of(&map), model);
    }
}
