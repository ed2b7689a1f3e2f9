use crate::arena::NodeId;

pub(crate) const LEFT: usize = 0;
pub(crate) const RIGHT: usize = 1;

#[derive(Clone, Debug)]
pub(crate) struct AvlNode<K, V> {
    pub key: K,
    pub value: V,
    pub parent: Option<NodeId>,
    pub children: [Option<NodeId>; 2],
    /// height(right) - height(left)
    pub balance: i8,
}

impl<K, V> AvlNode<K, V> {
    pub fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            parent,
            children: [None, None],
            balance: 0,
        }
    }
}

/// Child slot on the side a balance direction points to: -1 is left, +1 is
/// right.
#[inline]
pub(crate) fn side(c: i8) -> usize {
    debug_assert!(c == -1 || c == 1);
    ((c + 1) / 2) as usize
}
