//! JSON export and import.
//!
//! Trees serialize to a JSON object keyed by each key's `Display` text, so the
//! keys come back as strings: a tree with integer keys re-imports into a tree
//! keyed by `String`. The heap serializes to a plain array in slot order.
//!
//! Imports decode the whole text before touching the target. A malformed
//! snapshot returns [`SnapshotError::Decode`] and leaves the target as it was.

use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    avl_base::tree::AvlTree,
    binary_heap::BinaryHeap,
    btree_base::btree::BTree,
    error::{SnapshotError, SnapshotResult},
    tree_traits::KeyComparator,
};

fn encode_pairs<'a, K, V, I>(pairs: I) -> SnapshotResult<String>
where
    K: Display + 'a,
    V: Serialize + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let object: BTreeMap<String, &V> = pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    serde_json::to_string(&object).map_err(SnapshotError::Encode)
}

fn decode_pairs<V: DeserializeOwned>(data: &str) -> SnapshotResult<BTreeMap<String, V>> {
    serde_json::from_str(data).map_err(SnapshotError::Decode)
}

impl<K, V, C> AvlTree<K, V, C>
where
    K: Debug,
    C: KeyComparator<K>,
{
    pub fn to_json(&self) -> SnapshotResult<String>
    where
        K: Display,
        V: Serialize,
    {
        encode_pairs(self.iter())
    }

    /// Replaces the contents with the entries decoded from `data`.
    pub fn from_json(&mut self, data: &str) -> SnapshotResult<()>
    where
        K: From<String>,
        V: DeserializeOwned,
    {
        let pairs = decode_pairs::<V>(data)?;
        log::debug!("AvlTree::from_json {} entries", pairs.len());
        self.clear();
        for (k, v) in pairs {
            self.put(K::from(k), v);
        }
        Ok(())
    }
}

impl<K, V, C> BTree<K, V, C>
where
    K: Clone + Debug,
    C: KeyComparator<K>,
{
    pub fn to_json(&self) -> SnapshotResult<String>
    where
        K: Display,
        V: Serialize,
    {
        encode_pairs(self.iter())
    }

    /// Replaces the contents with the entries decoded from `data`.
    pub fn from_json(&mut self, data: &str) -> SnapshotResult<()>
    where
        K: From<String>,
        V: DeserializeOwned,
    {
        let pairs = decode_pairs::<V>(data)?;
        log::debug!("BTree::from_json {} entries", pairs.len());
        self.clear();
        for (k, v) in pairs {
            self.put(K::from(k), v);
        }
        Ok(())
    }
}

impl<T, C: KeyComparator<T>> BinaryHeap<T, C> {
    pub fn to_json(&self) -> SnapshotResult<String>
    where
        T: Serialize,
    {
        serde_json::to_string(self.as_slice()).map_err(SnapshotError::Encode)
    }

    /// Replaces the contents with the decoded values, restoring heap order.
    pub fn from_json(&mut self, data: &str) -> SnapshotResult<()>
    where
        T: DeserializeOwned,
    {
        let values: Vec<T> = serde_json::from_str(data).map_err(SnapshotError::Decode)?;
        log::debug!("BinaryHeap::from_json {} values", values.len());
        self.clear();
        self.push_all(values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_emitted_sorted_as_text() {
        let mut tree = AvlTree::new();
        tree.put(10, "x");
        tree.put(9, "y");
        // Text order, not numeric order.
        assert_eq!(tree.to_json().unwrap(), r#"{"10":"x","9":"y"}"#);
    }

    #[test]
    fn empty_tree_exports_empty_object() {
        let tree: BTree<i32, i32> = BTree::new(3);
        assert_eq!(tree.to_json().unwrap(), "{}");
    }
}
