use super::params::BTreeParams;

/// Node and element counts of a [`BTree`](super::btree::BTree).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub size: usize,
    pub leaves: usize,
    pub inner_nodes: usize,
}

impl TreeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> usize {
        self.inner_nodes + self.leaves
    }

    /// Share of entry slots in use across all nodes.
    pub fn avgfill(&self, params: &BTreeParams) -> f64 {
        if self.nodes() == 0 {
            return 0.0;
        }
        self.size as f64 / (self.nodes() * params.max_entries()) as f64
    }
}
