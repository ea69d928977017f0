use crate::decode::ordered::{OrderedMap, OrderedSet};

#[test]
fn test_set_iterates_in_insertion_order() {
    let set: OrderedSet<i32> = [3, 1, 2].into_iter().collect();

    let items: Vec<i32> = set.iter().copied().collect();
    assert_eq!(vec![3, 1, 2], items);
}

#[test]
fn test_set_rejects_duplicates() {
    let mut set = OrderedSet::new();

    assert!(set.insert("a"));
    assert!(!set.insert("a"));
    assert_eq!(1, set.len());
}

#[test]
fn test_set_equality_is_order_insensitive() {
    let left: OrderedSet<i32> = [1, 2].into_iter().collect();
    let right: OrderedSet<i32> = [2, 1].into_iter().collect();

    assert_eq!(left, right);
}

#[test]
fn test_map_iterates_in_insertion_order() {
    let mut map = OrderedMap::new();
    map.insert("z", 1);
    map.insert("a", 2);

    let keys: Vec<&str> = map.iter().map(|(key, _)| *key).collect();
    assert_eq!(vec!["z", "a"], keys);
}

#[test]
fn test_map_replace_keeps_position() {
    let mut map = OrderedMap::new();
    map.insert("first", 1);
    map.insert("second", 2);

    assert_eq!(Some(1), map.insert("first", 10));

    let entries: Vec<(&str, i32)> = map.iter().map(|(key, value)| (*key, *value)).collect();
    assert_eq!(vec![("first", 10), ("second", 2)], entries);
}

#[test]
fn test_map_lookup_by_borrowed_key() {
    let mut map = OrderedMap::new();
    map.insert("field".to_string(), 5);

    assert_eq!(Some(&5), map.get("field"));
    assert!(!map.contains_key("missing"));
}
