use std::fmt::{self, Debug};

use super::{btree::BTree, node::Entry};
use crate::{
    arena::NodeId,
    iter::Position,
    tree_traits::{KeyComparator, TreeIterator},
};

/// Cursor over a [`BTree`].
///
/// The cursor remembers the node and the entry it sits on. Each step finds
/// the entry's index again by searching its node for the entry's key, and
/// climbing to an ancestor searches that ancestor for the same key.
pub struct BTreeIterator<'a, K, V, C> {
    tree: &'a BTree<K, V, C>,
    node: Option<NodeId>,
    entry: Option<&'a Entry<K, V>>,
    position: Position,
}

impl<'a, K, V, C> BTreeIterator<'a, K, V, C> {
    pub(crate) fn new(tree: &'a BTree<K, V, C>) -> Self {
        Self {
            tree,
            node: None,
            entry: None,
            position: Position::Begin,
        }
    }

    fn land(&mut self, node: NodeId, entry: Option<&'a Entry<K, V>>) -> bool {
        self.node = Some(node);
        self.entry = entry;
        self.position = Position::Between;
        true
    }
}

impl<'a, K, V, C> Clone for BTreeIterator<'a, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            node: self.node,
            entry: self.entry,
            position: self.position,
        }
    }
}

impl<'a, K, V, C> Debug for BTreeIterator<'a, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTreeIterator")
            .field("node", &self.node)
            .field("position", &self.position)
            .finish()
    }
}

impl<'a, K, V, C: KeyComparator<K>> TreeIterator<'a> for BTreeIterator<'a, K, V, C> {
    type Key = K;
    type Value = V;

    fn forward(&mut self) -> bool {
        let tree = self.tree;
        match self.position {
            Position::End => return false,
            Position::Begin => {
                let Some(root) = tree.root() else {
                    self.end();
                    return false;
                };
                let leaf = tree.leftmost_leaf(root);
                return self.land(leaf, tree.node(leaf).entries.first());
            }
            Position::Between => {}
        }

        let (Some(mut node), Some(entry)) = (self.node, self.entry) else {
            self.end();
            return false;
        };

        let current = tree.node(node);
        let e = tree.search_index(node, &entry.key);
        if let Some(&child) = current.children.get(e + 1) {
            let leaf = tree.leftmost_leaf(child);
            return self.land(leaf, tree.node(leaf).entries.first());
        }
        if let Some(next) = current.entries.get(e + 1) {
            return self.land(node, Some(next));
        }

        while let Some(parent) = tree.node(node).parent {
            node = parent;
            let e = tree.search_index(node, &entry.key);
            if let Some(next) = tree.node(node).entries.get(e) {
                return self.land(node, Some(next));
            }
        }

        self.end();
        false
    }

    fn backward(&mut self) -> bool {
        let tree = self.tree;
        match self.position {
            Position::Begin => return false,
            Position::End => {
                let Some(root) = tree.root() else {
                    self.begin();
                    return false;
                };
                let leaf = tree.rightmost_leaf(root);
                return self.land(leaf, tree.node(leaf).entries.last());
            }
            Position::Between => {}
        }

        let (Some(mut node), Some(entry)) = (self.node, self.entry) else {
            self.begin();
            return false;
        };

        let current = tree.node(node);
        let e = tree.search_index(node, &entry.key);
        if let Some(&child) = current.children.get(e) {
            let leaf = tree.rightmost_leaf(child);
            return self.land(leaf, tree.node(leaf).entries.last());
        }
        if e >= 1 {
            return self.land(node, current.entries.get(e - 1));
        }

        while let Some(parent) = tree.node(node).parent {
            node = parent;
            let e = tree.search_index(node, &entry.key);
            if e >= 1 {
                return self.land(node, tree.node(node).entries.get(e - 1));
            }
        }

        self.begin();
        false
    }

    fn key(&self) -> Option<&'a K> {
        self.entry.map(|e| &e.key)
    }

    fn value(&self) -> Option<&'a V> {
        self.entry.map(|e| &e.value)
    }

    fn begin(&mut self) {
        self.node = None;
        self.entry = None;
        self.position = Position::Begin;
    }

    fn end(&mut self) {
        self.node = None;
        self.entry = None;
        self.position = Position::End;
    }
}
