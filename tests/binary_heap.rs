use balanced_trees::{BinaryHeap, Container};
use rand::{thread_rng, Rng};

#[test]
fn random_pushes_pop_sorted() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = thread_rng();
    let mut heap = BinaryHeap::new();
    let mut expected: Vec<i64> = (0..2000).map(|_| rng.gen_range(-500..500)).collect();

    let (singles, bulk) = expected.split_at(700);
    for &v in singles {
        heap.push(v);
    }
    heap.push_all(bulk.to_vec());
    assert_eq!(heap.len(), expected.len());

    expected.sort();
    let mut drained = Vec::with_capacity(expected.len());
    while let Some(v) = heap.pop() {
        drained.push(v);
    }
    assert_eq!(drained, expected);
    assert!(heap.is_empty());
}

#[test]
fn comparator_builds_max_heap() {
    let mut heap = BinaryHeap::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    heap.push_all([3, 9, 1, 7]);
    assert_eq!(heap.peek(), Some(&9));
    assert_eq!(heap.pop(), Some(9));
    assert_eq!(heap.pop(), Some(7));
}

#[test]
fn iterator_walks_array_slots() {
    let mut heap = BinaryHeap::new();
    heap.push_all([4, 2, 6]);
    let slots = Container::values(&heap);

    let mut it = heap.iterator();
    assert_eq!(it.index(), -1);
    assert_eq!(it.value(), None);
    let mut seen = Vec::new();
    while it.forward() {
        seen.push(*it.value().unwrap());
    }
    assert_eq!(seen, slots);
    assert_eq!(it.index(), 3);
    assert!(!it.forward());

    assert!(it.backward());
    assert_eq!(it.index(), 2);
    assert!(it.first());
    assert_eq!(it.value(), Some(&2));
    assert!(!it.backward());
    assert_eq!(it.index(), -1);
    assert!(it.last());
    assert_eq!(it.index(), 2);
}

#[test]
fn empty_heap() {
    let mut heap = BinaryHeap::<i32>::new();
    assert_eq!(heap.pop(), None);
    assert_eq!(heap.peek(), None);
    heap.push_all(Vec::new());
    assert!(heap.is_empty());
    assert!(!heap.iterator().first());
    assert_eq!(format!("{heap:?}"), "BinaryHeap\n");
}
