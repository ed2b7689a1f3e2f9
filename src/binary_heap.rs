//! Array-backed binary min-heap ordered by a [`KeyComparator`].
//!
//! Children of slot `i` live at `2i + 1` and `2i + 2`.

use std::{
    cmp::Ordering,
    fmt::{self, Debug},
};

use crate::tree_traits::{Container, DefaultKeyComparator, KeyComparator};

pub struct BinaryHeap<T, C = DefaultKeyComparator> {
    list: Vec<T>,
    comparator: C,
}

impl<T: Ord> BinaryHeap<T> {
    pub fn new() -> Self {
        Self::with_comparator(DefaultKeyComparator)
    }
}

impl<T: Ord> Default for BinaryHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: KeyComparator<T>> BinaryHeap<T, C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            list: Vec::new(),
            comparator,
        }
    }

    pub fn push(&mut self, value: T) {
        self.list.push(value);
        self.bubble_up();
    }

    /// Appends all values, then restores the heap bottom-up starting at the
    /// last parent.
    pub fn push_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let mut values = values.into_iter().peekable();
        let Some(first) = values.next() else {
            return;
        };
        if values.peek().is_none() {
            self.push(first);
            return;
        }

        self.list.push(first);
        self.list.extend(values);
        for i in (0..self.list.len() / 2).rev() {
            self.bubble_down_from(i);
        }
    }

    /// Removes and returns the smallest value.
    pub fn pop(&mut self) -> Option<T> {
        if self.list.is_empty() {
            return None;
        }
        let last = self.list.len() - 1;
        self.list.swap(0, last);
        let value = self.list.pop();
        self.bubble_down_from(0);
        value
    }

    pub fn peek(&self) -> Option<&T> {
        self.list.first()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Values in array order.
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.list.clone()
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.list
    }

    /// Cursor parked before the first slot.
    pub fn iterator(&self) -> HeapIterator<'_, T, C> {
        HeapIterator {
            heap: self,
            index: -1,
        }
    }

    #[inline]
    fn greater(&self, a: usize, b: usize) -> bool {
        self.comparator.compare(&self.list[a], &self.list[b]) == Ordering::Greater
    }

    fn bubble_up(&mut self) {
        let mut index = self.list.len() - 1;
        while index > 0 {
            let parent = (index - 1) >> 1;
            if !self.greater(parent, index) {
                break;
            }
            self.list.swap(index, parent);
            index = parent;
        }
    }

    fn bubble_down_from(&mut self, index: usize) {
        let size = self.list.len();
        let mut index = index;
        loop {
            let left = (index << 1) + 1;
            if left >= size {
                break;
            }
            let right = left + 1;
            let smaller = if right < size && self.greater(left, right) {
                right
            } else {
                left
            };
            if !self.greater(index, smaller) {
                break;
            }
            self.list.swap(index, smaller);
            index = smaller;
        }
    }
}

impl<T: Clone, C: KeyComparator<T>> Container for BinaryHeap<T, C> {
    type Value = T;

    fn is_empty(&self) -> bool {
        BinaryHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        BinaryHeap::len(self)
    }

    fn clear(&mut self) {
        BinaryHeap::clear(self)
    }

    fn values(&self) -> Vec<T> {
        BinaryHeap::values(self)
    }
}

impl<T: Debug, C> Debug for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BinaryHeap")?;
        let values: Vec<String> = self.list.iter().map(|v| format!("{v:?}")).collect();
        write!(f, "{}", values.join(", "))
    }
}

/// Cursor over the heap's array slots. Index -1 is before the first slot and
/// `len` is after the last.
pub struct HeapIterator<'a, T, C> {
    heap: &'a BinaryHeap<T, C>,
    index: isize,
}

impl<'a, T, C> HeapIterator<'a, T, C> {
    fn within_range(&self) -> bool {
        self.index >= 0 && (self.index as usize) < self.heap.list.len()
    }

    pub fn forward(&mut self) -> bool {
        if self.index < self.heap.list.len() as isize {
            self.index += 1;
        }
        self.within_range()
    }

    pub fn backward(&mut self) -> bool {
        if self.index >= 0 {
            self.index -= 1;
        }
        self.within_range()
    }

    pub fn value(&self) -> Option<&'a T> {
        let heap = self.heap;
        usize::try_from(self.index)
            .ok()
            .and_then(|i| heap.list.get(i))
    }

    pub fn index(&self) -> isize {
        self.index
    }

    pub fn begin(&mut self) {
        self.index = -1;
    }

    pub fn end(&mut self) {
        self.index = self.heap.list.len() as isize;
    }

    pub fn first(&mut self) -> bool {
        self.begin();
        self.forward()
    }

    pub fn last(&mut self) -> bool {
        self.end();
        self.backward()
    }
}
