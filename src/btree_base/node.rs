use crate::arena::NodeId;

#[derive(Clone, Debug)]
pub(crate) struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// Entries sorted by key; `children` is empty for a leaf and holds
/// `entries.len() + 1` ids otherwise. `children[i]` covers the keys between
/// `entries[i - 1]` and `entries[i]`.
#[derive(Clone, Debug)]
pub(crate) struct BTreeNode<K, V> {
    pub parent: Option<NodeId>,
    pub entries: Vec<Entry<K, V>>,
    pub children: Vec<NodeId>,
}

impl<K, V> BTreeNode<K, V> {
    pub fn new(parent: Option<NodeId>, entries: Vec<Entry<K, V>>, children: Vec<NodeId>) -> Self {
        Self {
            parent,
            entries,
            children,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
