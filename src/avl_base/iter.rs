use std::fmt::{self, Debug};

use super::{
    node::{LEFT, RIGHT},
    tree::AvlTree,
};
use crate::{arena::NodeId, iter::Position, tree_traits::TreeIterator};

/// Cursor over an [`AvlTree`] that steps through in-order neighbours by
/// following child and parent links.
pub struct AvlIterator<'a, K, V, C> {
    tree: &'a AvlTree<K, V, C>,
    node: Option<NodeId>,
    position: Position,
}

impl<'a, K, V, C> AvlIterator<'a, K, V, C> {
    pub(crate) fn new(tree: &'a AvlTree<K, V, C>) -> Self {
        Self {
            tree,
            node: None,
            position: Position::Begin,
        }
    }
}

impl<'a, K, V, C> Clone for AvlIterator<'a, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            node: self.node,
            position: self.position,
        }
    }
}

impl<'a, K, V, C> Debug for AvlIterator<'a, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlIterator")
            .field("node", &self.node)
            .field("position", &self.position)
            .finish()
    }
}

impl<'a, K, V, C> TreeIterator<'a> for AvlIterator<'a, K, V, C> {
    type Key = K;
    type Value = V;

    fn forward(&mut self) -> bool {
        let tree = self.tree;
        match self.position {
            Position::Begin => {
                self.node = tree.leftmost();
                self.position = Position::Between;
            }
            Position::Between => {
                self.node = self.node.and_then(|id| tree.walk(id, RIGHT));
            }
            Position::End => {}
        }

        if self.node.is_none() {
            self.position = Position::End;
            return false;
        }
        true
    }

    fn backward(&mut self) -> bool {
        let tree = self.tree;
        match self.position {
            Position::End => {
                self.node = tree.rightmost();
                self.position = Position::Between;
            }
            Position::Between => {
                self.node = self.node.and_then(|id| tree.walk(id, LEFT));
            }
            Position::Begin => {}
        }

        if self.node.is_none() {
            self.position = Position::Begin;
            return false;
        }
        true
    }

    fn key(&self) -> Option<&'a K> {
        let tree = self.tree;
        self.node.map(|id| &tree.node(id).key)
    }

    fn value(&self) -> Option<&'a V> {
        let tree = self.tree;
        self.node.map(|id| &tree.node(id).value)
    }

    fn begin(&mut self) {
        self.node = None;
        self.position = Position::Begin;
    }

    fn end(&mut self) {
        self.node = None;
        self.position = Position::End;
    }
}
