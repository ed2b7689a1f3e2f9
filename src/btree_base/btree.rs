use std::{
    cmp::Ordering,
    fmt::{self, Debug},
    mem,
};

use super::{
    deletion::{DeletionResult, DeletionResultFlags},
    iter::BTreeIterator,
    node::{BTreeNode, Entry},
    params::BTreeParams,
    tree_stats::TreeStats,
};
use crate::{
    arena::{Arena, NodeId},
    error::{VerifyError, VerifyResult},
    iter::Iter,
    macros::impl_container,
    tree_traits::{DefaultKeyComparator, KeyComparator},
};

/// Multiway balanced search tree of order `m`.
///
/// Entries live in every node, not only in leaves. Non-root nodes hold
/// between `ceil(m/2) - 1` and `m - 1` entries and all leaves sit at the same
/// depth. Nodes live in an arena and refer to their parent by id.
pub struct BTree<K, V, C = DefaultKeyComparator> {
    root: Option<NodeId>,
    nodes: Arena<BTreeNode<K, V>>,
    params: BTreeParams,
    stats: TreeStats,
    comparator: C,
}

impl<K: Ord, V> BTree<K, V> {
    /// # Panics
    ///
    /// Panics when `order` is below 3.
    pub fn new(order: usize) -> Self {
        Self::with_comparator(order, DefaultKeyComparator)
    }
}

impl<K: Ord, V> Default for BTree<K, V> {
    fn default() -> Self {
        Self::with_params(BTreeParams::for_key::<K>(), DefaultKeyComparator)
    }
}

/// node allocation and deallocation
impl<K, V, C> BTree<K, V, C> {
    fn new_node(
        &mut self,
        parent: Option<NodeId>,
        entries: Vec<Entry<K, V>>,
        children: Vec<NodeId>,
    ) -> NodeId {
        if children.is_empty() {
            self.stats.leaves += 1;
        } else {
            self.stats.inner_nodes += 1;
        }
        self.nodes.alloc(BTreeNode::new(parent, entries, children))
    }

    fn free_node(&mut self, id: NodeId) -> BTreeNode<K, V> {
        let node = self.nodes.free(id);
        if node.is_leaf() {
            self.stats.leaves -= 1;
        } else {
            self.stats.inner_nodes -= 1;
        }
        node
    }

    /// Points the parent link of every child of `id` back at `id`.
    fn adopt_children(&mut self, id: NodeId) {
        for i in 0..self.nodes[id].children.len() {
            let child = self.nodes[id].children[i];
            self.nodes[child].parent = Some(id);
        }
    }
}

/// structure access shared with the cursor
impl<K, V, C> BTree<K, V, C> {
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &BTreeNode<K, V> {
        &self.nodes[id]
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn leftmost_leaf(&self, from: NodeId) -> NodeId {
        let mut cur = from;
        while let Some(&child) = self.nodes[cur].children.first() {
            cur = child;
        }
        cur
    }

    pub(crate) fn rightmost_leaf(&self, from: NodeId) -> NodeId {
        let mut cur = from;
        while let Some(&child) = self.nodes[cur].children.last() {
            cur = child;
        }
        cur
    }
}

/// access functions and lookup
impl<K, V, C: KeyComparator<K>> BTree<K, V, C> {
    /// # Panics
    ///
    /// Panics when `order` is below 3.
    pub fn with_comparator(order: usize, comparator: C) -> Self {
        Self::with_params(BTreeParams::new(order), comparator)
    }

    pub fn with_params(params: BTreeParams, comparator: C) -> Self {
        Self {
            root: None,
            nodes: Arena::new(),
            params,
            stats: TreeStats::new(),
            comparator,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn order(&self) -> usize {
        self.params.order()
    }

    pub fn params(&self) -> &BTreeParams {
        &self.params
    }

    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.stats.size
    }

    pub fn is_empty(&self) -> bool {
        self.stats.size == 0
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
        self.stats = TreeStats::new();
    }

    /// Number of levels, 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut cur = self.root;
        while let Some(id) = cur {
            height += 1;
            cur = self.nodes[id].children.first().copied();
        }
        height
    }

    /// Binary search inside one node: `Ok(index)` of the equal entry, or
    /// `Err(index)` of the child (and insert position) the key belongs to.
    pub(crate) fn search(&self, node: NodeId, key: &K) -> Result<usize, usize> {
        self.nodes[node]
            .entries
            .binary_search_by(|entry| self.comparator.compare(&entry.key, key))
    }

    pub(crate) fn search_index(&self, node: NodeId, key: &K) -> usize {
        match self.search(node, key) {
            Ok(index) | Err(index) => index,
        }
    }

    fn search_recursively(&self, key: &K) -> Option<(NodeId, usize)> {
        let mut node = self.root?;
        loop {
            match self.search(node, key) {
                Ok(index) => return Some((node, index)),
                Err(_) if self.nodes[node].is_leaf() => return None,
                Err(index) => node = self.nodes[node].children[index],
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let (node, index) = self.search_recursively(key)?;
        Some(&self.nodes[node].entries[index].value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (node, index) = self.search_recursively(key)?;
        Some(&mut self.nodes[node].entries[index].value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.search_recursively(key).is_some()
    }

    /// Smallest key and its value.
    pub fn first(&self) -> Option<(&K, &V)> {
        let leaf = self.leftmost_leaf(self.root?);
        self.nodes[leaf].entries.first().map(|e| (&e.key, &e.value))
    }

    /// Largest key and its value.
    pub fn last(&self) -> Option<(&K, &V)> {
        let leaf = self.rightmost_leaf(self.root?);
        self.nodes[leaf].entries.last().map(|e| (&e.key, &e.value))
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

    /// Cursor parked before the first entry.
    pub fn iterator(&self) -> BTreeIterator<'_, K, V, C> {
        BTreeIterator::new(self)
    }

    pub fn iter(&self) -> Iter<'_, BTreeIterator<'_, K, V, C>> {
        Iter::new(self.iterator(), self.iterator(), self.len())
    }
}

/// Insertion
impl<K: Debug, V, C: KeyComparator<K>> BTree<K, V, C> {
    /// Inserts `key`, or overwrites the value of an existing equal key in
    /// place (in whichever node holds it) and returns the old value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        log::debug!("BTree::put({:?}) on btree size {}", key, self.len());

        let Some(mut node) = self.root else {
            let root = self.new_node(None, vec![Entry::new(key, value)], Vec::new());
            self.root = Some(root);
            self.stats.size += 1;
            return None;
        };

        loop {
            match self.search(node, &key) {
                Ok(index) => {
                    let old = mem::replace(&mut self.nodes[node].entries[index].value, value);
                    return Some(old);
                }
                Err(index) if self.nodes[node].is_leaf() => {
                    self.nodes[node]
                        .entries
                        .insert(index, Entry::new(key, value));
                    self.stats.size += 1;
                    self.split(node);
                    return None;
                }
                Err(index) => node = self.nodes[node].children[index],
            }
        }
    }

    /// Splits `node` while it overflows, pushing middle entries upward until
    /// an ancestor has room or a new root is built.
    fn split(&mut self, node: NodeId) {
        let mut node = node;
        while self.nodes[node].entries.len() > self.params.max_entries() {
            let (middle, right) = self.split_node(node);

            let Some(parent) = self.nodes[node].parent else {
                log::debug!("BTree::split new root above {:?}", middle.key);
                let root = self.new_node(None, vec![middle], vec![node, right]);
                self.nodes[node].parent = Some(root);
                self.nodes[right].parent = Some(root);
                self.root = Some(root);
                return;
            };

            let slot = self.search_index(parent, &middle.key);
            debug_assert_eq!(self.nodes[parent].children[slot], node);
            log::debug!(
                "BTree::split promoting {:?} into parent slot {}",
                middle.key,
                slot
            );

            let parent_node = &mut self.nodes[parent];
            parent_node.entries.insert(slot, middle);
            parent_node.children.insert(slot + 1, right);
            node = parent;
        }
    }

    /// Cuts `node` around its middle entry. `node` keeps the lower half; the
    /// upper half moves to a new sibling. Returns the middle entry and the
    /// sibling.
    fn split_node(&mut self, node: NodeId) -> (Entry<K, V>, NodeId) {
        let middle = self.params.middle();
        let n = &mut self.nodes[node];

        let right_entries = n.entries.split_off(middle + 1);
        let middle_entry = n
            .entries
            .pop()
            .expect("overflowing node holds its middle entry");
        let right_children = if n.is_leaf() {
            Vec::new()
        } else {
            n.children.split_off(middle + 1)
        };
        let parent = n.parent;

        let right = self.new_node(parent, right_entries, right_children);
        self.adopt_children(right);
        (middle_entry, right)
    }
}

/// Removal
impl<K: Clone + Debug, V, C: KeyComparator<K>> BTree<K, V, C> {
    /// Removes `key` and returns its value. Absent keys are ignored.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let result = self.erase(key);
        if result.has(DeletionResultFlags::Merged) {
            log::debug!(
                "BTree::remove({:?}) merged nodes, {} nodes left",
                key,
                self.stats.nodes()
            );
        }
        result.value
    }

    pub(crate) fn erase(&mut self, key: &K) -> DeletionResult<V> {
        log::debug!("BTree::erase({:?}) on btree size {}", key, self.len());

        let Some((node, index)) = self.search_recursively(key) else {
            log::debug!("Could not find key {:?} to erase.", key);
            return DeletionResult::not_found();
        };

        let result = self.delete(node, index);
        self.stats.size -= 1;
        result
    }

    fn delete(&mut self, node: NodeId, index: usize) -> DeletionResult<V> {
        if self.nodes[node].is_leaf() {
            let Entry { key, value } = self.nodes[node].entries.remove(index);
            let flags = self.rebalance(node, key);

            if let Some(root) = self.root {
                if self.nodes[root].entries.is_empty() {
                    self.free_node(root);
                    self.root = None;
                }
            }
            return DeletionResult::removed(value, flags);
        }

        // replace with the predecessor, the last entry of the rightmost leaf
        // under children[index]
        let leaf = self.rightmost_leaf(self.nodes[node].children[index]);
        let predecessor = self.nodes[leaf]
            .entries
            .pop()
            .expect("leaves below an internal node are never empty");
        let deleted_key = predecessor.key.clone();
        let entry = mem::replace(&mut self.nodes[node].entries[index], predecessor);

        let flags = self.rebalance(leaf, deleted_key);
        DeletionResult::removed(entry.value, flags)
    }

    /// Restores the minimum fill of `node` after an entry keyed
    /// `deleted_key` left it, cascading merges toward the root.
    ///
    /// The position of a node among its parent's children is found again by
    /// searching the parent for the deleted key at every level.
    fn rebalance(&mut self, node: NodeId, deleted_key: K) -> DeletionResultFlags {
        let mut node = node;
        let mut deleted_key = deleted_key;
        let mut flags = DeletionResultFlags::Ok;
        let min = self.params.min_entries();

        loop {
            if self.nodes[node].entries.len() >= min {
                return flags;
            }
            let Some(parent) = self.nodes[node].parent else {
                return flags;
            };

            let slot = self.search_index(parent, &deleted_key);
            debug_assert_eq!(self.nodes[parent].children[slot], node);
            let siblings = self.nodes[parent].children.len();
            let left = slot.checked_sub(1).map(|s| self.nodes[parent].children[s]);
            let right = (slot + 1 < siblings).then(|| self.nodes[parent].children[slot + 1]);

            if let Some(left) = left {
                if self.nodes[left].entries.len() > min {
                    self.borrow_from_left(node, left, parent, slot - 1);
                    return flags | DeletionResultFlags::BorrowedLeft;
                }
            }
            if let Some(right) = right {
                if self.nodes[right].entries.len() > min {
                    self.borrow_from_right(node, right, parent, slot);
                    return flags | DeletionResultFlags::BorrowedRight;
                }
            }

            deleted_key = match (left, right) {
                (_, Some(right)) => self.merge_right(node, right, parent, slot),
                (Some(left), None) => self.merge_left(node, left, parent, slot - 1),
                (None, None) => return flags,
            };
            flags = flags | DeletionResultFlags::Merged;

            if self.root == Some(parent) && self.nodes[parent].entries.is_empty() {
                log::debug!("BTree::rebalance root collapsed into its only child");
                self.free_node(parent);
                self.nodes[node].parent = None;
                self.root = Some(node);
                return flags | DeletionResultFlags::RootCollapsed;
            }

            node = parent;
        }
    }

    /// Rotates the separator `parent.entries[sep]` down to the front of
    /// `node` and the left sibling's last entry up into its place.
    fn borrow_from_left(&mut self, node: NodeId, left: NodeId, parent: NodeId, sep: usize) {
        log::debug!("BTree::rebalance borrowing from left sibling");

        let donor = self.nodes[left]
            .entries
            .pop()
            .expect("lending sibling holds spare entries");
        let separator = mem::replace(&mut self.nodes[parent].entries[sep], donor);
        self.nodes[node].entries.insert(0, separator);

        if let Some(child) = self.nodes[left].children.pop() {
            self.nodes[child].parent = Some(node);
            self.nodes[node].children.insert(0, child);
        }
    }

    /// Rotates the separator `parent.entries[sep]` down to the back of
    /// `node` and the right sibling's first entry up into its place.
    fn borrow_from_right(&mut self, node: NodeId, right: NodeId, parent: NodeId, sep: usize) {
        log::debug!("BTree::rebalance borrowing from right sibling");

        let donor = self.nodes[right].entries.remove(0);
        let separator = mem::replace(&mut self.nodes[parent].entries[sep], donor);
        self.nodes[node].entries.push(separator);

        if !self.nodes[right].is_leaf() {
            let child = self.nodes[right].children.remove(0);
            self.nodes[child].parent = Some(node);
            self.nodes[node].children.push(child);
        }
    }

    /// Folds the separator `parent.entries[sep]` and the whole right sibling
    /// into `node`. Returns the separator's key.
    fn merge_right(&mut self, node: NodeId, right: NodeId, parent: NodeId, sep: usize) -> K {
        log::debug!("BTree::rebalance merging with right sibling");

        let separator = self.nodes[parent].entries.remove(sep);
        self.nodes[parent].children.remove(sep + 1);
        let key = separator.key.clone();
        let sibling = self.free_node(right);

        let n = &mut self.nodes[node];
        n.entries.push(separator);
        n.entries.extend(sibling.entries);
        n.children.extend(sibling.children);
        self.adopt_children(node);
        key
    }

    /// Folds the left sibling and the separator `parent.entries[sep]` into
    /// the front of `node`. Returns the separator's key.
    fn merge_left(&mut self, node: NodeId, left: NodeId, parent: NodeId, sep: usize) -> K {
        log::debug!("BTree::rebalance merging with left sibling");

        let separator = self.nodes[parent].entries.remove(sep);
        self.nodes[parent].children.remove(sep);
        let key = separator.key.clone();
        let sibling = self.free_node(left);

        let n = &mut self.nodes[node];
        let mut entries = sibling.entries;
        entries.push(separator);
        entries.append(&mut n.entries);
        n.entries = entries;

        let mut children = sibling.children;
        children.append(&mut n.children);
        n.children = children;
        self.adopt_children(node);
        key
    }
}

/// Verification
impl<K, V, C: KeyComparator<K>> BTree<K, V, C> {
    /// Checks parent links, key order, fanout bounds, child counts, leaf
    /// depth and the stored size.
    pub fn verify(&self) -> VerifyResult {
        let mut counted = 0;
        let mut leaf_depth = None;
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return Err(VerifyError::ParentLink { depth: 0 });
            }
            self.verify_node(root, 0, None, None, &mut counted, &mut leaf_depth)?;
        }

        if counted != self.stats.size {
            return Err(VerifyError::SizeMismatch {
                stored: self.stats.size,
                counted,
            });
        }
        Ok(())
    }

    fn verify_node<'a>(
        &'a self,
        id: NodeId,
        depth: usize,
        lower: Option<&'a K>,
        upper: Option<&'a K>,
        counted: &mut usize,
        leaf_depth: &mut Option<usize>,
    ) -> VerifyResult {
        let node = &self.nodes[id];
        let entries = node.entries.len();
        *counted += entries;

        let min = if depth == 0 { 1 } else { self.params.min_entries() };
        let max = self.params.max_entries();
        if entries < min || entries > max {
            return Err(VerifyError::EntryCount {
                entries,
                min,
                max,
                depth,
            });
        }

        let keys: Vec<&K> = lower
            .into_iter()
            .chain(node.entries.iter().map(|e| &e.key))
            .chain(upper)
            .collect();
        if keys
            .windows(2)
            .any(|w| self.comparator.compare(w[0], w[1]) != Ordering::Less)
        {
            return Err(VerifyError::KeyOrder { depth });
        }

        if node.is_leaf() {
            return match *leaf_depth {
                None => {
                    *leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected != depth => {
                    Err(VerifyError::LeafDepth { depth, expected })
                }
                Some(_) => Ok(()),
            };
        }

        if node.children.len() != entries + 1 {
            return Err(VerifyError::ChildCount {
                children: node.children.len(),
                entries,
                depth,
            });
        }

        for (i, &child) in node.children.iter().enumerate() {
            if self.nodes[child].parent != Some(id) {
                return Err(VerifyError::ParentLink { depth: depth + 1 });
            }
            let lo = if i == 0 {
                lower
            } else {
                Some(&node.entries[i - 1].key)
            };
            let hi = if i == entries {
                upper
            } else {
                Some(&node.entries[i].key)
            };
            self.verify_node(child, depth + 1, lo, hi, counted, leaf_depth)?;
        }
        Ok(())
    }
}

impl_container!(BTree);

/// Debug
impl<K: Debug, V, C> BTree<K, V, C> {
    fn print_node(f: &mut fmt::Formatter<'_>, tree: &Self, id: NodeId, level: usize) -> fmt::Result {
        let node = &tree.nodes[id];
        for e in 0..=node.entries.len() {
            if let Some(&child) = node.children.get(e) {
                Self::print_node(f, tree, child, level + 1)?;
            }
            if let Some(entry) = node.entries.get(e) {
                writeln!(f, "{}{:?}", "    ".repeat(level), entry.key)?;
            }
        }
        Ok(())
    }
}

impl<K: Debug, V, C> Debug for BTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BTree")?;
        if let Some(root) = self.root {
            Self::print_node(f, self, root, 0)?;
        }
        Ok(())
    }
}
