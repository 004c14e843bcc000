//! Walking the values of a [`Tree`] in pre-, in-, and post-order.

use std::iter::FusedIterator;

use crate::node::{Link, NodeId};
use crate::tree::Tree;

/// The order in which [`Tree::traverse`] visits values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// A node, then its left subtree, then its right subtree.
    PreOrder,
    /// A node's left subtree, then the node, then its right subtree. This visits values in
    /// ascending order.
    InOrder,
    /// A node's left subtree, then its right subtree, then the node.
    PostOrder,
}

impl<T> Tree<T> {
    /// Calls `visitor` once for every value in the tree, in the given order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Order, Tree};
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// let mut visited = Vec::new();
    /// tree.traverse(Order::PostOrder, |x| visited.push(*x));
    /// assert_eq!(visited, [1, 3, 2]);
    /// ```
    pub fn traverse<F>(&self, order: Order, mut visitor: F)
    where
        F: FnMut(&T),
    {
        self.walk(self.root, order, &mut visitor);
    }

    // The recursion is only as deep as the tree is tall.
    fn walk<F>(&self, link: Link, order: Order, visitor: &mut F)
    where
        F: FnMut(&T),
    {
        let Some(id) = link else {
            return;
        };
        let node = &self.nodes[id];
        match order {
            Order::PreOrder => {
                visitor(&node.value);
                self.walk(node.left, order, visitor);
                self.walk(node.right, order, visitor);
            }
            Order::InOrder => {
                self.walk(node.left, order, visitor);
                visitor(&node.value);
                self.walk(node.right, order, visitor);
            }
            Order::PostOrder => {
                self.walk(node.left, order, visitor);
                self.walk(node.right, order, visitor);
                visitor(&node.value);
            }
        }
    }

    /// Returns an iterator over the values of the tree in ascending order. Every call starts a
    /// new walk from the smallest value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2].into_iter().collect();
    ///
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    ///
    /// // Stopping early is fine, and the next walk starts over.
    /// drop(iter);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&1, &2, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

/// An in-order iterator over the values of a [`Tree`]. It keeps its own stack of the nodes whose
/// right subtrees it still has to visit rather than recursing.
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a Tree<T>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::with_capacity(tree.height()),
            remaining: tree.len(),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    /// Pushes `link` and all of its left descendants. The last one pushed is the smallest value
    /// of the subtree.
    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(id) = link {
            self.stack.push(id);
            link = self.tree.nodes[id].left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.nodes[id];
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
