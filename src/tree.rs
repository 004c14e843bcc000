//! A self-balancing Binary Search Tree (specifically, an AVL tree). Nodes live in an arena owned
//! by the tree and point at their children and parent by index, so the tree needs no `unsafe`
//! to walk back up after an insert or delete.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! tree.insert(1);
//! assert!(tree.contains(&1));
//!
//! // Inserting an equal value stores it again.
//! tree.insert(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Removing takes out one copy at a time.
//! assert!(tree.remove(&1));
//! assert!(tree.contains(&1));
//! assert!(tree.remove(&1));
//! assert!(!tree.remove(&1));
//! assert!(tree.is_empty());
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::error::InvariantError;
use crate::node::{Link, Node, NodeId, NodeRef, Nodes};

/// A self-balancing Binary Search Tree (specifically, an AVL tree). This can be used for
/// inserting, finding, and removing ordered values. Equal values may be stored more than once.
pub struct Tree<T> {
    pub(crate) nodes: Nodes<T>,
    pub(crate) root: Link,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        // Links are indices so they stay valid in the copied arena.
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len())
            .field("root", &self.root())
            .finish()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Nodes::new(),
            root: None,
        }
    }

    /// The number of values stored in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of levels in the tree. An empty tree has a height of 0 and a tree with one
    /// value has a height of 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = (0..1000).collect();
    ///
    /// // A perfectly balanced tree of 1000 values has 10 levels.
    /// assert!(tree.height() <= 11);
    /// ```
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// The root of the tree, for walking its shape. `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|id| NodeRef::new(self, id))
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} values", self.len());
        self.nodes.clear();
        self.root = None;
    }

    /// Inserts the given value into the tree. Values equal to one already stored are kept too and
    /// land to the right of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert("b");
    /// tree.insert("a");
    /// tree.insert("b");
    ///
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["a", "b", "b"]);
    /// ```
    pub fn insert(&mut self, value: T)
    where
        T: Ord,
    {
        let Some(mut current) = self.root else {
            self.root = Some(self.nodes.push(Node::new(value, None)));
            return;
        };

        loop {
            let node = &self.nodes[current];
            let go_left = value < node.value;
            let next = if go_left { node.left } else { node.right };
            match next {
                Some(next) => current = next,
                None => {
                    let leaf = self.nodes.push(Node::new(value, Some(current)));
                    if go_left {
                        self.nodes[current].left = Some(leaf);
                    } else {
                        self.nodes[current].right = Some(leaf);
                    }
                    self.rebalance_from(current);
                    return;
                }
            }
        }
    }

    /// Whether the tree stores a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(String::from("hello"));
    ///
    /// assert!(tree.contains("hello"));
    /// assert!(!tree.contains("world"));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).is_some()
    }

    /// Potentially finds a stored value equal to `value`. If several are stored, this is the first
    /// one met walking down from the root.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).map(|id| &self.nodes[id].value)
    }

    /// The smallest value in the tree.
    pub fn first(&self) -> Option<&T> {
        let mut current = self.root?;
        while let Some(left) = self.nodes[current].left {
            current = left;
        }
        Some(&self.nodes[current].value)
    }

    /// The largest value in the tree.
    pub fn last(&self) -> Option<&T> {
        let mut current = self.root?;
        while let Some(right) = self.nodes[current].right {
            current = right;
        }
        Some(&self.nodes[current].value)
    }

    /// Removes one value equal to `value` from the tree. Returns whether anything was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// assert_eq!(tree.len(), 0);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes one value equal to `value` from the tree and returns it. If the tree does not
    /// contain such a value, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert((1, "one"));
    ///
    /// assert_eq!(tree.take(&(1, "one")), Some((1, "one")));
    /// assert_eq!(tree.take(&(1, "one")), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let target = self.find(value)?;
        let Node {
            left,
            right,
            parent,
            height,
            ..
        } = self.nodes[target];

        let rebalance_start = match right {
            // The left child (if any) takes our place. It can only be a leaf since we have no
            // right child.
            None => {
                trace!("removing node {:?} without a right child", target);
                self.replace_child(parent, target, left);
                parent
            }
            // The right child takes our place and adopts our left child.
            Some(successor) if self.nodes[successor].left.is_none() => {
                trace!("removing node {:?} whose right child has no left child", target);
                self.adopt_children(successor, left, None);
                self.nodes[successor].height = height;
                self.replace_child(parent, target, Some(successor));
                Some(successor)
            }
            // The smallest node of the right subtree takes our place.
            Some(right) => {
                trace!("removing node {:?} by promoting its successor", target);
                let successor = self.leftmost(right);
                let successor_parent = self.nodes[successor]
                    .parent
                    .expect("successor below right child => parent");
                let successor_right = self.nodes[successor].right;

                self.nodes[successor_parent].left = successor_right;
                if let Some(successor_right) = successor_right {
                    self.nodes[successor_right].parent = Some(successor_parent);
                }

                self.adopt_children(successor, left, Some(right));
                self.nodes[successor].height = height;
                self.replace_child(parent, target, Some(successor));
                Some(successor_parent)
            }
        };

        if let Some(start) = rebalance_start {
            self.rebalance_from(start);
        }
        Some(self.release(target))
    }

    /// Checks every invariant of the tree and reports the first one that is broken. A tree only
    /// modified through its own methods always validates.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = (0..100).rev().collect();
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantError>
    where
        T: Ord,
    {
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return Err(InvariantError::ParentMismatch { depth: 0 });
            }
        }

        let mut reachable = 0;
        self.validate_subtree(self.root, None, None, 0, &mut reachable)?;
        if reachable != self.len() {
            return Err(InvariantError::CountMismatch {
                count: self.len(),
                reachable,
            });
        }
        Ok(())
    }

    /// Validates the subtree at `link`, whose values must lie within `lower..=upper`, and returns
    /// its actual height.
    fn validate_subtree<'a>(
        &'a self,
        link: Link,
        lower: Option<&'a T>,
        upper: Option<&'a T>,
        depth: usize,
        reachable: &mut usize,
    ) -> Result<usize, InvariantError>
    where
        T: Ord,
    {
        let Some(id) = link else {
            return Ok(0);
        };

        *reachable += 1;
        if *reachable > self.len() {
            // More nodes than we own means the links loop back on themselves.
            return Err(InvariantError::CountMismatch {
                count: self.len(),
                reachable: *reachable,
            });
        }

        let node = &self.nodes[id];
        let below_lower = lower.is_some_and(|lower| node.value < *lower);
        let above_upper = upper.is_some_and(|upper| node.value > *upper);
        if below_lower || above_upper {
            return Err(InvariantError::OutOfOrder { depth });
        }

        for child in [node.left, node.right].into_iter().flatten() {
            if self.nodes[child].parent != Some(id) {
                return Err(InvariantError::ParentMismatch { depth: depth + 1 });
            }
        }

        let left_height =
            self.validate_subtree(node.left, lower, Some(&node.value), depth + 1, reachable)?;
        let right_height =
            self.validate_subtree(node.right, Some(&node.value), upper, depth + 1, reachable)?;

        let actual = left_height.max(right_height) + 1;
        if node.height != actual {
            return Err(InvariantError::HeightMismatch {
                depth,
                stored: node.height,
                actual,
            });
        }

        let balance_factor = right_height as isize - left_height as isize;
        if balance_factor.abs() > 1 {
            return Err(InvariantError::Unbalanced {
                depth,
                balance_factor,
            });
        }

        Ok(actual)
    }

    /// Walks down from the root looking for `value`. Equal values stop the walk so this finds the
    /// highest node holding such a value.
    fn find<Q>(&self, value: &Q) -> Link
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            match value.cmp(node.value.borrow()) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => current = node.right,
            }
        }
        None
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    /// Makes `left` and `right` the children of `id`, fixing their parent links. A `right` of
    /// `None` leaves the existing right child in place.
    fn adopt_children(&mut self, id: NodeId, left: Link, right: Link) {
        self.nodes[id].left = left;
        if let Some(left) = left {
            self.nodes[left].parent = Some(id);
        }
        if let Some(right) = right {
            self.nodes[id].right = Some(right);
            self.nodes[right].parent = Some(id);
        }
    }

    /// Frees the slot of a node that nothing links to anymore and returns its value.
    fn release(&mut self, id: NodeId) -> T {
        let (removed, moved) = self.nodes.swap_remove(id);
        if let Some(old_id) = moved {
            // The last node now lives at `id` so everything pointing at it must follow.
            let Node {
                left,
                right,
                parent,
                ..
            } = self.nodes[id];
            self.replace_child(parent, old_id, Some(id));
            for child in [left, right].into_iter().flatten() {
                self.nodes[child].parent = Some(id);
            }
        }
        removed.value
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::test::init_logging;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a multiset (a map of counts).
    /// This way we can ensure that after a random smattering of inserts
    /// and removes we have the same values in both.
    fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, counts: &mut BTreeMap<T, usize>)
    where
        T: Ord + Clone,
    {
        for op in ops {
            match op {
                Op::Insert(x) => {
                    tree.insert(x.clone());
                    *counts.entry(x.clone()).or_default() += 1;
                }
                Op::Remove(x) => {
                    let expected = match counts.get_mut(x) {
                        Some(count) => {
                            *count -= 1;
                            if *count == 0 {
                                counts.remove(x);
                            }
                            true
                        }
                        None => false,
                    };
                    assert_eq!(tree.remove(x), expected);
                }
                Op::Iter => {
                    let expected = counts
                        .iter()
                        .flat_map(|(x, count)| std::iter::repeat(x).take(*count));
                    assert!(tree.iter().eq(expected));
                }
            }
            assert_eq!(tree.validate(), Ok(()));
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            init_logging();
            let mut tree = Tree::new();
            let mut counts = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut counts);
            tree.len() == counts.values().sum::<usize>()
                && counts.keys().all(|x| tree.contains(x))
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();

            xs.iter().all(|x| tree.get(x) == Some(x))
        }
    }
}
