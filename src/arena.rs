use std::ops::{Index, IndexMut};

/// Handle of a node slot inside an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Growable node store. Parent and child links between nodes are plain
/// [`NodeId`]s, so a tree owns all of its nodes through a single `Vec`.
/// Freed slots are recycled through a free list.
#[derive(Clone, Debug)]
pub struct Arena<N> {
    slots: Vec<Option<N>>,
    free: Vec<usize>,
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn alloc(&mut self, node: N) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                debug_assert!(self.slots[slot].is_none());
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Takes the node out of its slot and returns the slot to the free list.
    pub fn free(&mut self, id: NodeId) -> N {
        let node = self.slots[id.0]
            .take()
            .expect("freeing a vacant arena slot");
        self.free.push(id.0);
        node
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    #[inline]
    fn index(&self, id: NodeId) -> &N {
        self.get(id).expect("dangling node id")
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        self.slots[id.0].as_mut().expect("dangling node id")
    }
}
