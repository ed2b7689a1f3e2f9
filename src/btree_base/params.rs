use std::mem::size_of;

const fn _max(a: usize, b: usize) -> usize {
    [a, b][(a < b) as usize]
}

/// Fanout bounds derived from the order `m` (maximum children per node).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BTreeParams {
    order: usize,
}

impl BTreeParams {
    /// # Panics
    ///
    /// Panics when `order` is below 3.
    pub fn new(order: usize) -> Self {
        assert!(order >= 3, "invalid B-tree order {order}, should be at least 3");
        Self { order }
    }

    /// Order sized so that a node's keys and child ids fill roughly 256
    /// bytes, never below 8.
    pub fn for_key<K>() -> Self {
        Self::new(_max(8, 256 / (size_of::<K>() + size_of::<usize>())))
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn max_children(&self) -> usize {
        self.order
    }

    /// ceil(m / 2)
    pub fn min_children(&self) -> usize {
        (self.order + 1) / 2
    }

    pub fn max_entries(&self) -> usize {
        self.max_children() - 1
    }

    pub fn min_entries(&self) -> usize {
        self.min_children() - 1
    }

    /// Index of the entry promoted when a node splits.
    pub fn middle(&self) -> usize {
        (self.order - 1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_btree_params() {
        let p = BTreeParams::new(3);
        assert_eq!((p.min_entries(), p.max_entries(), p.middle()), (1, 2, 1));

        let p = BTreeParams::new(4);
        assert_eq!((p.min_entries(), p.max_entries(), p.middle()), (1, 3, 1));

        let p = BTreeParams::new(5);
        assert_eq!((p.min_children(), p.max_children()), (3, 5));
        assert_eq!((p.min_entries(), p.max_entries(), p.middle()), (2, 4, 2));

        assert_eq!(BTreeParams::for_key::<u64>().order(), 16);
        assert_eq!(BTreeParams::for_key::<[u8; 512]>().order(), 8);
    }

    #[test]
    #[should_panic(expected = "at least 3")]
    fn order_below_three_panics() {
        BTreeParams::new(2);
    }
}
