//! Error types for [`Tree::validate`](crate::Tree::validate).

/// The first broken invariant found while validating a [`Tree`](crate::Tree). Depths count from
/// the root, which is at depth 0.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// A value sits on the wrong side of one of its ancestors.
    #[error("node at depth {depth} is out of order relative to its ancestors")]
    OutOfOrder {
        /// Depth of the misplaced node.
        depth: usize,
    },

    /// A node's subtrees differ in height by more than one.
    #[error("node at depth {depth} has balance factor {balance_factor}")]
    Unbalanced {
        /// Depth of the unbalanced node.
        depth: usize,
        /// Right subtree height minus left subtree height.
        balance_factor: isize,
    },

    /// A node's parent link doesn't lead to the node it hangs from.
    #[error("parent link of node at depth {depth} does not point back at its parent")]
    ParentMismatch {
        /// Depth of the node with the bad parent link.
        depth: usize,
    },

    /// A node's stored height disagrees with the shape of its subtree.
    #[error("node at depth {depth} stores height {stored} but its subtree is {actual} tall")]
    HeightMismatch {
        /// Depth of the node.
        depth: usize,
        /// The height the node recorded.
        stored: usize,
        /// The height computed from the subtree.
        actual: usize,
    },

    /// The element count doesn't match the number of nodes reachable from the root.
    #[error("tree counts {count} elements but {reachable} are reachable from the root")]
    CountMismatch {
        /// The tree's element count.
        count: usize,
        /// Nodes reachable from the root.
        reachable: usize,
    },
}
