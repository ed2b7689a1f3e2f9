//! Error types surfaced by the crate.

use thiserror::Error;

/// Result type for snapshot export and import.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors raised while encoding or decoding a JSON snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The contents could not be encoded as JSON.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// The text is not a valid snapshot. The target was left untouched.
    #[error("malformed snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}

/// A structural invariant found broken by `verify()`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// The stored element count differs from the number of reachable elements.
    #[error("size mismatch: stored {stored}, counted {counted}")]
    SizeMismatch { stored: usize, counted: usize },

    /// A node's parent link does not point at the node holding it.
    #[error("broken parent link at depth {depth}")]
    ParentLink { depth: usize },

    /// Keys are not strictly ascending in order.
    #[error("keys out of order at depth {depth}")]
    KeyOrder { depth: usize },

    /// An AVL balance tag outside {-1, 0, 1}.
    #[error("balance tag {tag} out of range at depth {depth}")]
    BalanceOutOfRange { tag: i8, depth: usize },

    /// An AVL balance tag that disagrees with the subtree heights.
    #[error("balance tag {tag} but subtree height difference {actual} at depth {depth}")]
    BalanceMismatch { tag: i8, actual: isize, depth: usize },

    /// A B-tree node holding too few or too many entries.
    #[error("node at depth {depth} holds {entries} entries, allowed {min}..={max}")]
    EntryCount {
        entries: usize,
        min: usize,
        max: usize,
        depth: usize,
    },

    /// An internal B-tree node whose child count is not entries + 1.
    #[error("node at depth {depth} has {children} children for {entries} entries")]
    ChildCount {
        children: usize,
        entries: usize,
        depth: usize,
    },

    /// B-tree leaves at different depths.
    #[error("leaf at depth {depth}, expected {expected}")]
    LeafDepth { depth: usize, expected: usize },
}

/// Result type for structural verification.
pub type VerifyResult = Result<(), VerifyError>;
