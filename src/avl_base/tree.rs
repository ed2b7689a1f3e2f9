use std::{
    cmp::Ordering,
    fmt::{self, Debug},
    mem,
};

use super::{
    iter::AvlIterator,
    node::{side, AvlNode, LEFT, RIGHT},
};
use crate::{
    arena::{Arena, NodeId},
    error::{VerifyError, VerifyResult},
    iter::Iter,
    macros::impl_container,
    tree_traits::{DefaultKeyComparator, KeyComparator},
};

/// Height-balanced binary search tree.
///
/// Every node records `height(right) - height(left)` and the tree keeps that
/// tag within {-1, 0, 1} with single and double rotations after each insert
/// and removal. Nodes live in an arena and refer to their parent by id.
pub struct AvlTree<K, V, C = DefaultKeyComparator> {
    root: Option<NodeId>,
    nodes: Arena<AvlNode<K, V>>,
    comparator: C,
    size: usize,
}

/// The slot holding a subtree: the tree root or one child slot of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Link {
    Root,
    Child(NodeId, usize),
}

impl<K: Ord, V> AvlTree<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(DefaultKeyComparator)
    }
}

impl<K: Ord, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Structure access shared with the cursor
impl<K, V, C> AvlTree<K, V, C> {
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &AvlNode<K, V> {
        &self.nodes[id]
    }

    pub(crate) fn leftmost(&self) -> Option<NodeId> {
        self.bottom(LEFT)
    }

    pub(crate) fn rightmost(&self) -> Option<NodeId> {
        self.bottom(RIGHT)
    }

    fn bottom(&self, d: usize) -> Option<NodeId> {
        let mut cur = self.root?;
        while let Some(child) = self.nodes[cur].children[d] {
            cur = child;
        }
        Some(cur)
    }

    /// In-order neighbour of `id`: the successor for `RIGHT`, the
    /// predecessor for `LEFT`.
    pub(crate) fn walk(&self, id: NodeId, d: usize) -> Option<NodeId> {
        if let Some(mut child) = self.nodes[id].children[d] {
            while let Some(next) = self.nodes[child].children[d ^ 1] {
                child = next;
            }
            return Some(child);
        }

        let mut cur = id;
        let mut parent = self.nodes[cur].parent;
        while let Some(p) = parent {
            if self.nodes[p].children[d] != Some(cur) {
                break;
            }
            cur = p;
            parent = self.nodes[p].parent;
        }
        parent
    }

    #[inline]
    fn child(&self, id: NodeId, d: usize) -> NodeId {
        self.nodes[id].children[d].expect("heavy side of an unbalanced node is never empty")
    }

    fn link(&self, link: Link) -> Option<NodeId> {
        match link {
            Link::Root => self.root,
            Link::Child(parent, d) => self.nodes[parent].children[d],
        }
    }

    fn set_link(&mut self, link: Link, node: Option<NodeId>) {
        match link {
            Link::Root => self.root = node,
            Link::Child(parent, d) => self.nodes[parent].children[d] = node,
        }
    }
}

/// Lookup and item count
impl<K, V, C: KeyComparator<K>> AvlTree<K, V, C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            nodes: Arena::new(),
            comparator,
            size: 0,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
        self.size = 0;
    }

    fn find(&self, key: &K) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            cur = match self.comparator.compare(key, &node.key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.children[LEFT],
                Ordering::Greater => node.children[RIGHT],
            };
        }
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|id| &self.nodes[id].value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find(key)?;
        Some(&mut self.nodes[id].value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.leftmost().map(|id| self.entry(id))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.rightmost().map(|id| self.entry(id))
    }

    #[inline]
    fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = &self.nodes[id];
        (&node.key, &node.value)
    }

    /// Greatest key less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Option<(&K, &V)> {
        let mut floor = None;
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            cur = match self.comparator.compare(key, &node.key) {
                Ordering::Equal => return Some(self.entry(id)),
                Ordering::Less => node.children[LEFT],
                Ordering::Greater => {
                    floor = Some(id);
                    node.children[RIGHT]
                }
            };
        }
        floor.map(|id| self.entry(id))
    }

    /// Least key greater than or equal to `key`.
    pub fn ceiling(&self, key: &K) -> Option<(&K, &V)> {
        let mut ceiling = None;
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            cur = match self.comparator.compare(key, &node.key) {
                Ordering::Equal => return Some(self.entry(id)),
                Ordering::Less => {
                    ceiling = Some(id);
                    node.children[LEFT]
                }
                Ordering::Greater => node.children[RIGHT],
            };
        }
        ceiling.map(|id| self.entry(id))
    }

    /// Number of levels, following the taller side indicated by each tag.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut cur = self.root;
        while let Some(id) = cur {
            height += 1;
            let node = &self.nodes[id];
            cur = if node.balance < 0 {
                node.children[LEFT]
            } else {
                node.children[RIGHT].or(node.children[LEFT])
            };
        }
        height
    }

    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Cursor parked before the first element.
    pub fn iterator(&self) -> AvlIterator<'_, K, V, C> {
        AvlIterator::new(self)
    }

    pub fn iter(&self) -> Iter<'_, AvlIterator<'_, K, V, C>> {
        Iter::new(self.iterator(), self.iterator(), self.size)
    }
}

/// Insertion
impl<K: Debug, V, C: KeyComparator<K>> AvlTree<K, V, C> {
    /// Inserts `key`, or overwrites the value of an existing equal key in
    /// place and returns the old value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        log::debug!("AvlTree::put({:?}) on tree size {}", key, self.size);
        let (_, replaced) = self.put_descend(key, value, None, Link::Root);
        replaced
    }

    /// Returns whether the subtree in `target` grew taller.
    fn put_descend(
        &mut self,
        key: K,
        value: V,
        parent: Option<NodeId>,
        target: Link,
    ) -> (bool, Option<V>) {
        let Some(cur) = self.link(target) else {
            let id = self.nodes.alloc(AvlNode::new(key, value, parent));
            self.set_link(target, Some(id));
            self.size += 1;
            return (true, None);
        };

        let c = match self.comparator.compare(&key, &self.nodes[cur].key) {
            Ordering::Equal => {
                let old = mem::replace(&mut self.nodes[cur].value, value);
                return (false, Some(old));
            }
            Ordering::Less => -1,
            Ordering::Greater => 1,
        };

        let (grew, replaced) = self.put_descend(key, value, Some(cur), Link::Child(cur, side(c)));
        if grew {
            (self.put_rebalance(c, cur, target), replaced)
        } else {
            (false, replaced)
        }
    }

    /// `cur`'s subtree on side `c` grew. Returns whether `cur` grew too.
    fn put_rebalance(&mut self, c: i8, cur: NodeId, target: Link) -> bool {
        let balance = self.nodes[cur].balance;
        if balance == 0 {
            self.nodes[cur].balance = c;
            return true;
        }
        if balance == -c {
            self.nodes[cur].balance = 0;
            return false;
        }

        let heavy = self.child(cur, side(c));
        let new_root = if self.nodes[heavy].balance == c {
            self.single_rotate(c, cur)
        } else {
            self.double_rotate(c, cur)
        };
        self.set_link(target, Some(new_root));
        false
    }
}

/// Removal
impl<K: Debug, V, C: KeyComparator<K>> AvlTree<K, V, C> {
    /// Removes `key` and returns its value. Absent keys are ignored.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        log::debug!("AvlTree::remove({:?}) on tree size {}", key, self.size);
        let (_, removed) = self.remove_descend(key, Link::Root);
        removed
    }

    /// Returns whether the subtree in `target` got shorter.
    fn remove_descend(&mut self, key: &K, target: Link) -> (bool, Option<V>) {
        let Some(cur) = self.link(target) else {
            return (false, None);
        };

        let c = match self.comparator.compare(key, &self.nodes[cur].key) {
            Ordering::Equal => return self.remove_node(cur, target),
            Ordering::Less => -1,
            Ordering::Greater => 1,
        };

        let (shrank, removed) = self.remove_descend(key, Link::Child(cur, side(c)));
        if shrank {
            (self.remove_fix(-c, cur, target), removed)
        } else {
            (false, removed)
        }
    }

    fn remove_node(&mut self, cur: NodeId, target: Link) -> (bool, Option<V>) {
        self.size -= 1;

        if self.nodes[cur].children[RIGHT].is_none() {
            let left = self.nodes[cur].children[LEFT];
            if let Some(left) = left {
                self.nodes[left].parent = self.nodes[cur].parent;
            }
            self.set_link(target, left);
            return (true, Some(self.nodes.free(cur).value));
        }

        // take over the successor's pair and unlink the successor instead
        let (shrank, key, value) = self.remove_min(Link::Child(cur, RIGHT));
        let node = &mut self.nodes[cur];
        node.key = key;
        let removed = mem::replace(&mut node.value, value);

        if shrank {
            (self.remove_fix(-1, cur, target), Some(removed))
        } else {
            (false, Some(removed))
        }
    }

    /// Unlinks the leftmost node of the subtree in `target` and returns its
    /// pair.
    fn remove_min(&mut self, target: Link) -> (bool, K, V) {
        let cur = self
            .link(target)
            .expect("successor subtree is never empty");

        if self.nodes[cur].children[LEFT].is_none() {
            let right = self.nodes[cur].children[RIGHT];
            if let Some(right) = right {
                self.nodes[right].parent = self.nodes[cur].parent;
            }
            self.set_link(target, right);
            let node = self.nodes.free(cur);
            return (true, node.key, node.value);
        }

        let (shrank, key, value) = self.remove_min(Link::Child(cur, LEFT));
        if shrank {
            (self.remove_fix(1, cur, target), key, value)
        } else {
            (false, key, value)
        }
    }

    /// The side opposite to `c` of `cur` got shorter. Returns whether `cur`
    /// got shorter too.
    fn remove_fix(&mut self, c: i8, cur: NodeId, target: Link) -> bool {
        let balance = self.nodes[cur].balance;
        if balance == 0 {
            self.nodes[cur].balance = c;
            return false;
        }
        if balance == -c {
            self.nodes[cur].balance = 0;
            return true;
        }

        let heavy = self.child(cur, side(c));
        let heavy_balance = self.nodes[heavy].balance;
        if heavy_balance == 0 {
            let new_root = self.rotate(c, cur);
            self.nodes[new_root].balance = -c;
            self.set_link(target, Some(new_root));
            return false;
        }

        let new_root = if heavy_balance == c {
            self.single_rotate(c, cur)
        } else {
            self.double_rotate(c, cur)
        };
        self.set_link(target, Some(new_root));
        true
    }
}

/// Rotations
impl<K: Debug, V, C> AvlTree<K, V, C> {
    fn single_rotate(&mut self, c: i8, root: NodeId) -> NodeId {
        self.nodes[root].balance = 0;
        let new_root = self.rotate(c, root);
        self.nodes[new_root].balance = 0;
        new_root
    }

    fn double_rotate(&mut self, c: i8, root: NodeId) -> NodeId {
        let d = side(c);
        let child = self.child(root, d);
        let rotated = self.rotate(-c, child);
        self.nodes[root].children[d] = Some(rotated);
        let new_root = self.rotate(c, root);

        let (root_balance, child_balance) = match self.nodes[new_root].balance {
            b if b == c => (-c, 0),
            b if b == -c => (0, c),
            _ => (0, 0),
        };
        self.nodes[root].balance = root_balance;
        self.nodes[child].balance = child_balance;
        self.nodes[new_root].balance = 0;
        new_root
    }

    /// Lifts the child on side `c` of `root` into its place and returns it.
    /// The caller stores the result in the slot that held `root`.
    fn rotate(&mut self, c: i8, root: NodeId) -> NodeId {
        let d = side(c);
        let new_root = self.child(root, d);
        log::debug!(
            "AvlTree::rotate {} around {:?}",
            if d == RIGHT { "left" } else { "right" },
            self.nodes[root].key
        );

        let inner = self.nodes[new_root].children[d ^ 1];
        self.nodes[root].children[d] = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(root);
        }

        self.nodes[new_root].children[d ^ 1] = Some(root);
        self.nodes[new_root].parent = self.nodes[root].parent;
        self.nodes[root].parent = Some(new_root);
        new_root
    }
}

/// Verification
impl<K, V, C: KeyComparator<K>> AvlTree<K, V, C> {
    /// Checks parent links, key order and every balance tag against the real
    /// subtree heights.
    pub fn verify(&self) -> VerifyResult {
        let mut counted = 0;
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return Err(VerifyError::ParentLink { depth: 0 });
            }
            self.verify_node(root, 0, None, None, &mut counted)?;
        }

        if counted != self.size || self.nodes.len() != self.size {
            return Err(VerifyError::SizeMismatch {
                stored: self.size,
                counted,
            });
        }
        Ok(())
    }

    /// Returns the height of the subtree at `id`.
    fn verify_node<'a>(
        &'a self,
        id: NodeId,
        depth: usize,
        lower: Option<&'a K>,
        upper: Option<&'a K>,
        counted: &mut usize,
    ) -> Result<isize, VerifyError> {
        let node = &self.nodes[id];
        *counted += 1;

        let above_lower = lower.map_or(true, |l| {
            self.comparator.compare(l, &node.key) == Ordering::Less
        });
        let below_upper = upper.map_or(true, |u| {
            self.comparator.compare(&node.key, u) == Ordering::Less
        });
        if !above_lower || !below_upper {
            return Err(VerifyError::KeyOrder { depth });
        }

        let mut heights = [0isize; 2];
        for d in [LEFT, RIGHT] {
            if let Some(child) = node.children[d] {
                if self.nodes[child].parent != Some(id) {
                    return Err(VerifyError::ParentLink { depth: depth + 1 });
                }
                let (lo, hi) = if d == LEFT {
                    (lower, Some(&node.key))
                } else {
                    (Some(&node.key), upper)
                };
                heights[d] = self.verify_node(child, depth + 1, lo, hi, counted)?;
            }
        }

        if !(-1..=1).contains(&node.balance) {
            return Err(VerifyError::BalanceOutOfRange {
                tag: node.balance,
                depth,
            });
        }
        let actual = heights[RIGHT] - heights[LEFT];
        if actual != node.balance as isize {
            return Err(VerifyError::BalanceMismatch {
                tag: node.balance,
                actual,
                depth,
            });
        }

        Ok(1 + heights[LEFT].max(heights[RIGHT]))
    }
}

impl_container!(AvlTree);

/// Display
impl<K: Debug, V, C> AvlTree<K, V, C> {
    fn print_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        prefix: &str,
        is_tail: bool,
    ) -> fmt::Result {
        let node = &self.nodes[id];

        if let Some(right) = node.children[RIGHT] {
            let prefix = format!("{}{}", prefix, if is_tail { "│   " } else { "    " });
            self.print_node(f, right, &prefix, false)?;
        }

        writeln!(
            f,
            "{}{}{:?}",
            prefix,
            if is_tail { "└── " } else { "┌── " },
            node.key
        )?;

        if let Some(left) = node.children[LEFT] {
            let prefix = format!("{}{}", prefix, if is_tail { "    " } else { "│   " });
            self.print_node(f, left, &prefix, true)?;
        }

        Ok(())
    }
}

impl<K: Debug, V, C> Debug for AvlTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AvlTree")?;
        if let Some(root) = self.root {
            self.print_node(f, root, "", true)?;
        }
        Ok(())
    }
}
