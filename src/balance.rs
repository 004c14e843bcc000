//! The rotations that restore the AVL invariant after a node is attached or detached. See
//! [the Wikipedia page][wiki] for the terminology used here.
//!
//! [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing

use log::trace;

use crate::node::{Link, NodeId};
use crate::tree::Tree;

/// How a node's subtrees compare in height. Only a difference of two levels needs a rotation; a
/// valid tree can't get further out of balance than that in a single insert or delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum State {
    /// The left subtree is two levels taller than the right.
    LeftHeavy,
    /// The right subtree is two levels taller than the left.
    RightHeavy,
    Balanced,
}

impl<T> Tree<T> {
    pub(crate) fn height_of(&self, link: Link) -> usize {
        link.map_or(0, |id| self.nodes[id].height)
    }

    /// The difference in height between the right and left subtrees. See [the Wikipedia
    /// page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    pub(crate) fn balance_factor(&self, id: NodeId) -> isize {
        let node = &self.nodes[id];
        self.height_of(node.right) as isize - self.height_of(node.left) as isize
    }

    fn state(&self, id: NodeId) -> State {
        match self.balance_factor(id) {
            n if n < -1 => State::LeftHeavy,
            n if n > 1 => State::RightHeavy,
            _ => State::Balanced,
        }
    }

    /// Adjusts the height of `id` to be the max of its children's heights + 1.
    fn fix_height(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let height = self.height_of(node.left).max(self.height_of(node.right)) + 1;
        self.nodes[id].height = height;
    }

    /// Walks from `start` towards the root, fixing heights and rotating wherever a node became
    /// unbalanced.
    ///
    /// Every node on the way must still carry the height its subtree position had before the
    /// mutation. The walk stops at the first subtree whose height comes out unchanged since
    /// nothing above it can have been affected.
    pub(crate) fn rebalance_from(&mut self, start: NodeId) {
        let mut current = Some(start);
        while let Some(id) = current {
            let height_before = self.nodes[id].height;
            let subtree = self.balance(id);
            if self.nodes[subtree].height == height_before {
                break;
            }
            current = self.nodes[subtree].parent;
        }
    }

    /// Balances the subtree rooted at `id` and returns the root of the balanced subtree (which is
    /// a different node if a rotation happened).
    fn balance(&mut self, id: NodeId) -> NodeId {
        self.fix_height(id);
        let new_root = match self.state(id) {
            State::RightHeavy => {
                let right = self.nodes[id].right.expect("right heavy => right child");
                if self.balance_factor(right) < 0 {
                    self.rotate_right_left(id)
                } else {
                    self.rotate_left(id)
                }
            }
            State::LeftHeavy => {
                let left = self.nodes[id].left.expect("left heavy => left child");
                if self.balance_factor(left) > 0 {
                    self.rotate_left_right(id)
                } else {
                    self.rotate_right(id)
                }
            }
            State::Balanced => id,
        };

        if cfg!(debug_assertions) {
            let node = &self.nodes[new_root];
            let left_height = self.height_of(node.left);
            let right_height = self.height_of(node.right);
            assert_eq!(node.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
        new_root
    }

    /// Puts `new` in the slot of `parent` that currently holds `old`, or makes it the root if
    /// `old` was the root. The slot is found by identity, not by comparing values, so duplicates
    /// can't confuse it.
    pub(crate) fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    debug_assert_eq!(parent.right, Some(old), "child is not linked from parent");
                    parent.right = new;
                }
            }
        }
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    /// Rotate `old_root` to the left. This moves the right child up vertically and `old_root`
    /// down vertically. Used to rebalance the tree when the right child is too tall. As such, it
    /// must only be called when there _is_ a right child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///   Option<parent>                 Option<parent>
    ///      /                              /
    ///   old_root                       new_root
    ///    /    \                         /     \
    ///   x   new_root    rotate ->   old_root   z
    ///        /  \                    /  \
    ///       y    z                  x    y
    /// ```
    fn rotate_left(&mut self, old_root: NodeId) -> NodeId {
        let new_root = self.nodes[old_root].right.expect("Rotate left => right child");
        trace!("rotating left at node {:?}", old_root);

        let parent = self.nodes[old_root].parent;
        let inner = self.nodes[new_root].left;

        self.nodes[old_root].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(old_root);
        }
        self.replace_child(parent, old_root, Some(new_root));
        self.nodes[new_root].left = Some(old_root);
        self.nodes[old_root].parent = Some(new_root);

        self.fix_height(old_root);
        self.fix_height(new_root);
        new_root
    }

    /// Rotate `old_root` to the right. This moves the left child up vertically and `old_root` down.
    /// Must only be called when there _is_ a left child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      Option<parent>            Option<parent>
    ///        /                         /
    ///     old_root                  new_root
    ///      /     \                  /     \
    ///   new_root  z     rotate ->  x    old_root
    ///    / \                               /  \
    ///   x   y                             y    z
    /// ```
    fn rotate_right(&mut self, old_root: NodeId) -> NodeId {
        let new_root = self.nodes[old_root].left.expect("Rotate right => left child");
        trace!("rotating right at node {:?}", old_root);

        let parent = self.nodes[old_root].parent;
        let inner = self.nodes[new_root].right;

        self.nodes[old_root].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(old_root);
        }
        self.replace_child(parent, old_root, Some(new_root));
        self.nodes[new_root].right = Some(old_root);
        self.nodes[old_root].parent = Some(new_root);

        self.fix_height(old_root);
        self.fix_height(new_root);
        new_root
    }

    fn rotate_right_left(&mut self, id: NodeId) -> NodeId {
        let right = self.nodes[id].right.expect("Rotating right-left requires a right child");
        self.rotate_right(right);
        self.rotate_left(id)
    }

    fn rotate_left_right(&mut self, id: NodeId) -> NodeId {
        let left = self.nodes[id].left.expect("Rotating left-right requires a left child");
        self.rotate_left(left);
        self.rotate_right(id)
    }
}
