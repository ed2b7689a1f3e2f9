use balanced_trees::{AvlTree, BTree, BinaryHeap, SnapshotError};

#[test]
fn avl_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut tree = AvlTree::new();
    for k in ["delta", "alpha", "charlie", "bravo"] {
        tree.put(k.to_string(), k.len());
    }
    let json = tree.to_json().unwrap();
    assert_eq!(json, r#"{"alpha":5,"bravo":5,"charlie":7,"delta":5}"#);

    let mut restored = AvlTree::<String, usize>::new();
    restored.put("stale".to_string(), 0);
    restored.from_json(&json).unwrap();
    restored.verify().unwrap();
    assert_eq!(restored.keys(), tree.keys());
    assert_eq!(restored.values(), tree.values());
}

#[test]
fn integer_keys_come_back_as_strings() {
    let mut tree = BTree::new(3);
    for k in [1, 2, 10] {
        tree.put(k, k * 2);
    }
    let json = tree.to_json().unwrap();

    let mut restored = BTree::<String, i32>::new(3);
    restored.from_json(&json).unwrap();
    restored.verify().unwrap();
    // Keys now compare as text.
    assert_eq!(restored.keys(), vec!["1", "10", "2"]);
    assert_eq!(restored.get(&"10".to_string()), Some(&20));
}

#[test]
fn malformed_snapshot_leaves_tree_untouched() {
    let mut tree = BTree::<String, i32>::new(4);
    tree.put("kept".to_string(), 1);

    let err = tree.from_json(r#"{"a": 1, "b": "#).unwrap_err();
    assert!(matches!(err, SnapshotError::Decode(_)));
    let err = tree.from_json(r#"{"a": "not a number"}"#).unwrap_err();
    assert!(matches!(err, SnapshotError::Decode(_)));
    assert_eq!(tree.keys(), vec!["kept"]);

    let mut avl = AvlTree::<String, i32>::new();
    avl.put("kept".to_string(), 1);
    assert!(avl.from_json("[1, 2]").is_err());
    assert_eq!(avl.len(), 1);
}

#[test]
fn heap_round_trip_restores_order() {
    let mut heap = BinaryHeap::new();
    heap.push_all([5, 1, 4]);
    let json = heap.to_json().unwrap();

    let mut restored = BinaryHeap::<i32>::new();
    restored.from_json(&json).unwrap();
    assert_eq!(restored.values(), heap.values());

    // An unordered array is heapified on import.
    restored.from_json("[9, 8, 7, 6]").unwrap();
    assert_eq!(restored.pop(), Some(6));
    assert_eq!(restored.pop(), Some(7));

    assert!(restored.from_json("{}").is_err());
    assert_eq!(restored.len(), 2);
}
