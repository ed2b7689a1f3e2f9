use std::collections::{BTreeMap, HashSet};

use balanced_trees::{AvlTree, Container, TreeIterator};
use rand::{seq::SliceRandom, thread_rng, Rng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn avl_tree_works() {
    init_logger();
    let mut tree = AvlTree::<i32, i32>::new();

    for i in 0..1000 {
        assert_eq!(tree.put(i, i + 1), None);
    }
    tree.verify().unwrap();

    for i in 0..1000 {
        assert_eq!(tree.get(&i), Some(&(i + 1)));
    }

    assert_eq!(tree.remove(&12), Some(13));
    assert!(tree.get(&12).is_none());
    assert_eq!(tree.remove(&12), None);
    assert_eq!(tree.put(12, 24), None);
    assert_eq!(tree.put(12, 25), Some(24));
    assert_eq!(tree.len(), 1000);
    tree.verify().unwrap();

    // 1000 sorted inserts keep the height within the AVL bound.
    assert!(tree.height() <= 14);
}

#[test]
fn random_op_test() {
    init_logger();
    let mut tree = AvlTree::<i32, i32>::new();
    let mut reference = BTreeMap::new();
    let mut rng = thread_rng();

    let n = 5000;
    let mut keys = HashSet::new();
    while keys.len() < n {
        keys.insert(rng.gen::<u16>() as i32);
    }
    let mut keys: Vec<_> = keys.into_iter().collect();

    for &key in keys.iter() {
        tree.put(key, key + 1);
        reference.insert(key, key + 1);
    }
    tree.verify().unwrap();

    keys.shuffle(&mut rng);
    let removed_keys = keys.split_off(n / 2);
    for (i, &key) in removed_keys.iter().enumerate() {
        assert_eq!(tree.remove(&key), reference.remove(&key));
        if i % 97 == 0 {
            tree.verify().unwrap();
        }
    }
    tree.verify().unwrap();

    for &key in removed_keys.iter() {
        assert!(tree.get(&key).is_none());
    }
    for &key in keys.iter() {
        assert_eq!(tree.get(&key), Some(&(key + 1)));
    }
    assert_eq!(tree.len(), reference.len());

    let ours: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
    let theirs: Vec<_> = reference.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(ours, theirs);
}

#[test]
fn mixed_operations_keep_invariants() {
    init_logger();
    let mut tree = AvlTree::<u8, u32>::new();
    let mut reference = BTreeMap::new();
    let mut rng = thread_rng();

    for step in 0..3000u32 {
        let key = rng.gen::<u8>() % 64;
        if rng.gen_bool(0.6) {
            assert_eq!(tree.put(key, step), reference.insert(key, step));
        } else {
            assert_eq!(tree.remove(&key), reference.remove(&key));
        }
        tree.verify().unwrap();
        assert_eq!(tree.len(), reference.len());
    }
}

#[test]
fn cursor_walks_both_directions() {
    init_logger();
    let mut tree = AvlTree::new();
    for k in [5, 3, 8, 1, 4, 7, 9] {
        tree.put(k, k * 10);
    }

    let mut it = tree.iterator();
    assert_eq!(it.key(), None);
    let mut forward = Vec::new();
    while it.forward() {
        forward.push(*it.key().unwrap());
    }
    assert_eq!(forward, vec![1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(it.key(), None);
    assert!(!it.forward());

    let mut backward = Vec::new();
    while it.backward() {
        backward.push(*it.value().unwrap());
    }
    assert_eq!(backward, vec![90, 80, 70, 50, 40, 30, 10]);
    assert!(!it.backward());

    assert!(it.last());
    assert_eq!(it.key(), Some(&9));
    assert!(it.first());
    assert_eq!(it.key(), Some(&1));
    assert!(!it.backward());
    assert_eq!(it.key(), None);
}

#[test]
fn cursor_on_empty_tree() {
    let tree = AvlTree::<i32, i32>::new();
    let mut it = tree.iterator();
    assert!(!it.forward());
    assert!(!it.backward());
    assert!(!it.first());
    assert!(!it.last());
    assert_eq!(it.value(), None);
    assert_eq!(tree.iter().next(), None);
}

#[test]
fn iter_meets_in_the_middle() {
    let mut tree = AvlTree::new();
    for k in 0..10 {
        tree.put(k, ());
    }
    let mut iter = tree.iter();
    assert_eq!(iter.len(), 10);
    assert_eq!(iter.next().map(|(k, _)| *k), Some(0));
    assert_eq!(iter.next_back().map(|(k, _)| *k), Some(9));
    let rest: Vec<_> = iter.map(|(k, _)| *k).collect();
    assert_eq!(rest, (1..9).collect::<Vec<_>>());

    let reversed: Vec<_> = tree.iter().rev().map(|(k, _)| *k).collect();
    assert_eq!(reversed, (0..10).rev().collect::<Vec<_>>());
}

#[test]
fn floor_ceiling_first_last() {
    let mut tree = AvlTree::new();
    for k in [10, 20, 30, 40] {
        tree.put(k, k.to_string());
    }

    assert_eq!(tree.floor(&25), Some((&20, &"20".to_string())));
    assert_eq!(tree.floor(&20).map(|(k, _)| *k), Some(20));
    assert_eq!(tree.floor(&5), None);
    assert_eq!(tree.ceiling(&25).map(|(k, _)| *k), Some(30));
    assert_eq!(tree.ceiling(&40).map(|(k, _)| *k), Some(40));
    assert_eq!(tree.ceiling(&41), None);

    assert_eq!(tree.first().map(|(k, _)| *k), Some(10));
    assert_eq!(tree.last().map(|(k, _)| *k), Some(40));
    assert_eq!(tree.keys(), vec![10, 20, 30, 40]);
}

#[test]
fn custom_comparator_reverses_order() {
    let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    for k in 0..20 {
        tree.put(k, k);
    }
    tree.verify().unwrap();
    assert_eq!(tree.first().map(|(k, _)| *k), Some(19));
    let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, (0..20).rev().collect::<Vec<_>>());
}

#[test]
fn get_mut_and_container() {
    let mut tree = AvlTree::new();
    tree.put("a", 1);
    tree.put("b", 2);
    *tree.get_mut(&"a").unwrap() += 10;
    assert_eq!(tree.get(&"a"), Some(&11));
    assert!(tree.get_mut(&"z").is_none());

    assert_eq!(Container::values(&tree), vec![11, 2]);
    assert_eq!(Container::len(&tree), 2);
    Container::clear(&mut tree);
    assert!(Container::is_empty(&tree));
    assert_eq!(tree.height(), 0);
}

#[test]
fn debug_prints_structure() {
    let mut tree = AvlTree::new();
    for k in [2, 1, 3] {
        tree.put(k, ());
    }
    let printed = format!("{tree:?}");
    assert!(printed.starts_with("AvlTree\n"));
    assert!(printed.contains("┌── 3"));
    assert!(printed.contains("└── 2"));
    assert!(printed.contains("└── 1"));
}
