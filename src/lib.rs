//! This crate exposes a self-balancing Binary Search Tree (an AVL tree) that
//! stores ordered values.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than or equal to its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as
//! the longest path from the root `Node` to a leaf `Node`). Without care, inserting
//! sorted values builds a tree whose height equals the number of values.
//!
//! ## AVL Tree
//!
//! An AVL tree adds one more invariant: for every `Node`, the heights of its two
//! subtrees differ by at most one. After every insert and delete, the tree walks
//! back up towards the root and restores that invariant with rotations. This keeps
//! the height below roughly `1.44 * lg(N + 2)` so every operation stays `O(lg N)`.
//!
//! # Examples
//!
//! ```
//! use avl::{Order, Tree};
//!
//! let mut tree = Tree::new();
//! for x in 1..=7 {
//!     tree.insert(x);
//! }
//!
//! // Ascending inserts would make a plain BST a linked list.
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
//!
//! let mut pre_order = Vec::new();
//! tree.traverse(Order::PreOrder, |x| pre_order.push(*x));
//! assert_eq!(pre_order, [4, 2, 1, 3, 6, 5, 7]);
//!
//! assert!(tree.remove(&4));
//! assert!(!tree.contains(&4));
//! assert_eq!(tree.len(), 6);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod balance;
mod error;
mod node;
mod traverse;
mod tree;

#[cfg(test)]
mod test;

pub use error::InvariantError;
pub use node::NodeRef;
pub use traverse::{Iter, Order};
pub use tree::Tree;
