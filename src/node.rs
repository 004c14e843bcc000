use std::fmt;
use std::ops::{Index, IndexMut};

use crate::tree::Tree;

/// The index of a [`Node`] in its [`Tree`]'s arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) usize);

/// A possibly-empty pointer to a child or parent node. A `Link` never owns what it points at; the
/// arena in [`Tree`] owns every node.
pub(crate) type Link = Option<NodeId>;

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, parent: Link) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent,
            height: 1,
        }
    }
}

/// The arena owning every [`Node`] of a tree. Nodes are addressed by [`NodeId`] and stay densely
/// packed: removing a node moves the last node into the freed slot.
#[derive(Clone)]
pub(crate) struct Nodes<T>(Vec<Node<T>>);

impl<T> Nodes<T> {
    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    pub(crate) fn push(&mut self, node: Node<T>) -> NodeId {
        self.0.push(node);
        NodeId(self.0.len() - 1)
    }

    /// Removes the node at `id`, moving the last node into its slot. Returns the removed node and,
    /// if a node was moved, the id it used to have. The caller must re-point every link to the
    /// moved node.
    pub(crate) fn swap_remove(&mut self, id: NodeId) -> (Node<T>, Option<NodeId>) {
        let last = NodeId(self.0.len() - 1);
        let removed = self.0.swap_remove(id.0);
        let moved = if id == last { None } else { Some(last) };
        (removed, moved)
    }
}

impl<T> Index<NodeId> for Nodes<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        &self.0[id.0]
    }
}

impl<T> IndexMut<NodeId> for Nodes<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.0[id.0]
    }
}

/// A read-only view of one node of a [`Tree`]. This exposes the shape of the tree (e.g. for
/// drawing it) without allowing any modification.
///
/// # Examples
///
/// ```
/// use avl::Tree;
///
/// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
/// let root = tree.root().unwrap();
///
/// assert_eq!(root.value(), &2);
/// assert_eq!(root.height(), 2);
/// assert_eq!(root.left().map(|n| *n.value()), Some(1));
/// assert_eq!(root.right().map(|n| *n.value()), Some(3));
/// assert!(root.parent().is_none());
/// ```
pub struct NodeRef<'a, T> {
    tree: &'a Tree<T>,
    id: NodeId,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn follow(&self, link: Link) -> Option<Self> {
        link.map(|id| Self::new(self.tree, id))
    }

    /// The value stored in this node.
    pub fn value(&self) -> &'a T {
        let tree = self.tree;
        &tree.nodes[self.id].value
    }

    /// The root of this node's left subtree, if any.
    pub fn left(&self) -> Option<Self> {
        self.follow(self.tree.nodes[self.id].left)
    }

    /// The root of this node's right subtree, if any.
    pub fn right(&self) -> Option<Self> {
        self.follow(self.tree.nodes[self.id].right)
    }

    /// The node this node hangs from. Only the root has no parent.
    pub fn parent(&self) -> Option<Self> {
        self.follow(self.tree.nodes[self.id].parent)
    }

    /// How many levels are in the subtree rooted at this node. A leaf has a height of 1.
    pub fn height(&self) -> usize {
        self.tree.nodes[self.id].height
    }

    /// The height of the right subtree minus the height of the left subtree. In a valid tree this
    /// is always `-1`, `0`, or `1`.
    pub fn balance_factor(&self) -> isize {
        self.tree.balance_factor(self.id)
    }
}

impl<'a, T> fmt::Debug for NodeRef<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", self.value())
            .field("height", &self.height())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}
