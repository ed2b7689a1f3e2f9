use std::{iter::FusedIterator, marker::PhantomData};

use crate::tree_traits::TreeIterator;

/// Where a cursor currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Position {
    Begin,
    Between,
    End,
}

/// Borrowing iterator over `(key, value)` pairs in comparator order.
///
/// Built from two cursors over the same tree, one walking forward from the
/// front and one walking backward from the back; `remaining` keeps them from
/// crossing.
#[derive(Clone, Debug)]
pub struct Iter<'a, I> {
    front: I,
    back: I,
    remaining: usize,
    _marker: PhantomData<&'a ()>,
}

impl<'a, I: TreeIterator<'a>> Iter<'a, I> {
    pub(crate) fn new(front: I, mut back: I, len: usize) -> Self {
        back.end();
        Self {
            front,
            back,
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, I: TreeIterator<'a>> Iterator for Iter<'a, I> {
    type Item = (&'a I::Key, &'a I::Value);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || !self.front.forward() {
            return None;
        }
        self.remaining -= 1;
        Some((self.front.key()?, self.front.value()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, I: TreeIterator<'a>> DoubleEndedIterator for Iter<'a, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || !self.back.backward() {
            return None;
        }
        self.remaining -= 1;
        Some((self.back.key()?, self.back.value()?))
    }
}

impl<'a, I: TreeIterator<'a>> ExactSizeIterator for Iter<'a, I> {}

impl<'a, I: TreeIterator<'a>> FusedIterator for Iter<'a, I> {}
