//! Error types returned by map operations and structural checks.

/// Errors reported by [`RBTreeMap`](crate::RBTreeMap) operations.
///
/// A failed call never modifies the map.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum TreeError {
    /// `insert` was called with a key that is already present.
    #[error("duplicate key")]
    DuplicateKey,
    /// `search` or `delete` was called with a key that is not present.
    #[error("key not found")]
    KeyNotFound,
}

/// The first structural invariant violation found by
/// [`RBTreeMap::check`](crate::RBTreeMap::check).
///
/// Seeing one of these means the tree has been corrupted by a bug, not by any
/// sequence of calls through the public API.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Violation {
    #[error("root node is red")]
    RedRoot,
    #[error("keys are not in strictly ascending order")]
    OutOfOrder,
    #[error("red node has a red child")]
    RedRedEdge,
    #[error("black height differs between sibling subtrees ({left} vs {right})")]
    BlackHeightMismatch { left: usize, right: usize },
    #[error("child does not point back at its parent")]
    BrokenParentLink,
    #[error("recorded size {recorded} does not match {actual} reachable nodes")]
    SizeMismatch { recorded: usize, actual: usize },
}

pub type Result<T> = core::result::Result<T, TreeError>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(TreeError::DuplicateKey.to_string(), "duplicate key");
        assert_eq!(TreeError::KeyNotFound.to_string(), "key not found");
        assert_eq!(
            Violation::SizeMismatch { recorded: 3, actual: 2 }.to_string(),
            "recorded size 3 does not match 2 reachable nodes"
        );
    }
}
