use std::cmp::Ordering;

/// Total order over keys, supplied once when a tree is built.
///
/// The order must stay consistent across calls; a comparator that
/// contradicts itself leaves the tree structure undefined.
pub trait KeyComparator<K: ?Sized> {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;
}

/// Comparator backed by the key's [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultKeyComparator;

impl<K: Ord + ?Sized> KeyComparator<K> for DefaultKeyComparator {
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<K: ?Sized, F> KeyComparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self(lhs, rhs)
    }
}

/// Capabilities every structure in the crate provides.
pub trait Container {
    type Value;

    fn is_empty(&self) -> bool;
    fn len(&self) -> usize;
    fn clear(&mut self);
    /// Values in the structure's natural order: in-order for trees, array
    /// order for the heap.
    fn values(&self) -> Vec<Self::Value>;
}

/// Stateful cursor over a tree.
///
/// A cursor sits before the first element, on an element, or after the last
/// element. `key` and `value` return `None` unless it sits on an element.
pub trait TreeIterator<'a> {
    type Key: 'a;
    type Value: 'a;

    /// Steps to the next element. Returns `false` and parks after the last
    /// element when there is none.
    fn forward(&mut self) -> bool;
    /// Steps to the previous element. Returns `false` and parks before the
    /// first element when there is none.
    fn backward(&mut self) -> bool;
    fn key(&self) -> Option<&'a Self::Key>;
    fn value(&self) -> Option<&'a Self::Value>;
    /// Parks the cursor before the first element.
    fn begin(&mut self);
    /// Parks the cursor after the last element.
    fn end(&mut self);

    fn first(&mut self) -> bool {
        self.begin();
        self.forward()
    }

    fn last(&mut self) -> bool {
        self.end();
        self.backward()
    }
}

#[cfg(test)]
#[test]
fn test_comparators() {
    assert_eq!(DefaultKeyComparator.compare(&1, &2), Ordering::Less);
    assert_eq!(DefaultKeyComparator.compare("b", "a"), Ordering::Greater);

    let reversed = |a: &i32, b: &i32| b.cmp(a);
    assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
    assert_eq!(reversed.compare(&3, &3), Ordering::Equal);
}
