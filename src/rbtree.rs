use std::cmp::Ordering;

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::index::{assert_capacity, DefaultIx, IndexType, NodeIndex};
use crate::node::{Color, RbNode};
use crate::traverse::{self, InOrder, PostOrder, PreOrder, Tree};

/// A red-black binary search tree.
///
/// Nodes live in a vector and refer to their children and parent by index, so
/// rotations only ever rewrite a handful of slots and the tree stays `Send` and
/// `Unpin`.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RbTree<K, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<RbNode<K, Ix>>,
    /// Root of the red-black tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of keys in the tree
    pub(crate) len: usize,
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `RbTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        RbTree {
            nodes,
            root: Self::sentinel(),
            len: 0,
        }
    }

    /// Insert a key into the tree and restore the red-black properties.
    /// Inserting a key that is already present does nothing.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use balanced_tree::{Color, RbTree};
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(7);
    /// assert_eq!(tree.root_color(), Some(Color::Black));
    /// tree.insert(3);
    /// tree.insert(7);
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K) {
        let mut y = Self::sentinel();
        let mut x = self.root;
        let mut ord = Ordering::Equal;

        while !self.node_ref(x, RbNode::is_sentinel) {
            y = x;
            ord = key.cmp(self.node_ref(x, RbNode::key));
            x = match ord {
                Ordering::Less => self.node_ref(x, RbNode::left),
                Ordering::Greater => self.node_ref(x, RbNode::right),
                Ordering::Equal => return,
            };
        }

        let z = NodeIndex::new(self.nodes.len());
        assert_capacity(z);
        self.nodes.push(Self::new_node(key, y));
        self.len = self.len.wrapping_add(1);

        if self.node_ref(y, RbNode::is_sentinel) {
            self.root = z;
            self.node_mut(z, RbNode::set_color(Color::Black));
            return;
        }
        if ord == Ordering::Less {
            self.node_mut(y, RbNode::set_left(z));
        } else {
            self.node_mut(y, RbNode::set_right(z));
        }

        self.insert_fixup(z);
    }

    /// Insert a key if there is one. `None` leaves the tree untouched.
    #[inline]
    pub fn insert_opt(&mut self, key: Option<K>) {
        if let Some(key) = key {
            self.insert(key);
        }
    }

    /// Return `true` if the tree holds `key`.
    ///
    /// # Example
    /// ```rust
    /// use balanced_tree::RbTree;
    ///
    /// let tree: RbTree<_> = [3, 5, 8].into_iter().collect();
    /// assert!(tree.contains(&5));
    /// assert!(!tree.contains(&4));
    /// ```
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        traverse::search(self, key).is_some()
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    Ix: IndexType,
{
    /// Key stored at the root.
    #[inline]
    #[must_use]
    pub fn root_key(&self) -> Option<&K> {
        Tree::root(self).map(|r| self.node_ref(r, RbNode::key))
    }

    /// Color of the root, `None` for an empty tree.
    #[inline]
    #[must_use]
    pub fn root_color(&self) -> Option<Color> {
        Tree::root(self).map(|r| self.node_ref(r, RbNode::color))
    }

    /// Color of the node at `node`.
    #[inline]
    #[must_use]
    pub fn color(&self, node: NodeIndex<Ix>) -> Color {
        self.node_ref(node, RbNode::color)
    }

    /// Handle of the parent of `node`, `None` for the root.
    #[inline]
    #[must_use]
    pub fn parent(&self, node: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        self.link(self.node_ref(node, RbNode::parent))
    }

    /// Smallest key in the tree.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        traverse::first(self)
    }

    /// Largest key in the tree.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        traverse::last(self)
    }

    /// Number of nodes on the longest root-to-leaf path, 0 for an empty tree.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        traverse::height(self)
    }

    /// Get an iterator over the keys of the tree, sorted ascending.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> InOrder<'_, Self> {
        InOrder::new(self)
    }

    /// Same as [`RbTree::iter`].
    #[inline]
    #[must_use]
    pub fn in_order(&self) -> InOrder<'_, Self> {
        InOrder::new(self)
    }

    /// Get an iterator visiting each node before its subtrees.
    #[inline]
    #[must_use]
    pub fn pre_order(&self) -> PreOrder<'_, Self> {
        PreOrder::new(self)
    }

    /// Get an iterator visiting each node after its subtrees.
    #[inline]
    #[must_use]
    pub fn post_order(&self) -> PostOrder<'_, Self> {
        PostOrder::new(self)
    }

    /// Remove all keys from the tree
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.root = Self::sentinel();
        self.len = 0;
    }

    /// Return the number of keys in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no keys.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> RbTree<K>
where
    K: Ord,
{
    /// Create an empty `RbTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<K> Default for RbTree<K>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    Ix: IndexType,
{
    /// Create a new sentinel node
    fn new_sentinel() -> RbNode<K, Ix> {
        RbNode {
            key: None,
            left: Self::sentinel(),
            right: Self::sentinel(),
            parent: Self::sentinel(),
            color: Color::Black,
        }
    }

    /// Create a new red leaf hanging below `parent`
    fn new_node(key: K, parent: NodeIndex<Ix>) -> RbNode<K, Ix> {
        RbNode {
            key: Some(key),
            left: Self::sentinel(),
            right: Self::sentinel(),
            parent,
            color: Color::Red,
        }
    }

    /// Get the sentinel node index
    fn sentinel() -> NodeIndex<Ix> {
        NodeIndex::new(0)
    }

    /// Map the sentinel to `None`.
    fn link(&self, x: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        (!self.node_ref(x, RbNode::is_sentinel)).then_some(x)
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, RbNode::is_red) {
            if self.grand_parent_ref(z, RbNode::is_sentinel) {
                break;
            }
            if self.is_left_child(self.node_ref(z, RbNode::parent)) {
                let y = self.grand_parent_ref(z, RbNode::right);
                if self.node_ref(y, RbNode::is_red) {
                    trace!("red uncle {y:?}, recolor above {z:?}");
                    self.parent_mut(z, RbNode::set_color(Color::Black));
                    self.node_mut(y, RbNode::set_color(Color::Black));
                    self.grand_parent_mut(z, RbNode::set_color(Color::Red));
                    z = self.parent_ref(z, RbNode::parent);
                } else {
                    if self.is_right_child(z) {
                        trace!("zig-zag at {z:?}, rotate parent left");
                        z = self.node_ref(z, RbNode::parent);
                        self.left_rotate(z);
                    }
                    trace!("black uncle {y:?}, rotate grand parent right");
                    self.parent_mut(z, RbNode::set_color(Color::Black));
                    self.grand_parent_mut(z, RbNode::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, RbNode::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, RbNode::left);
                if self.node_ref(y, RbNode::is_red) {
                    trace!("red uncle {y:?}, recolor above {z:?}");
                    self.parent_mut(z, RbNode::set_color(Color::Black));
                    self.node_mut(y, RbNode::set_color(Color::Black));
                    self.grand_parent_mut(z, RbNode::set_color(Color::Red));
                    z = self.parent_ref(z, RbNode::parent);
                } else {
                    if self.is_left_child(z) {
                        trace!("zig-zag at {z:?}, rotate parent right");
                        z = self.node_ref(z, RbNode::parent);
                        self.right_rotate(z);
                    }
                    trace!("black uncle {y:?}, rotate grand parent left");
                    self.parent_mut(z, RbNode::set_color(Color::Black));
                    self.grand_parent_mut(z, RbNode::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, RbNode::parent));
                }
            }
        }
        self.node_mut(self.root, RbNode::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, RbNode::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, RbNode::right);
        self.node_mut(x, RbNode::set_right(self.node_ref(y, RbNode::left)));
        if !self.left_ref(y, RbNode::is_sentinel) {
            self.left_mut(y, RbNode::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, RbNode::set_left(x));
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, RbNode::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, RbNode::left);
        self.node_mut(x, RbNode::set_left(self.node_ref(y, RbNode::right)));
        if !self.right_ref(y, RbNode::is_sentinel) {
            self.right_mut(y, RbNode::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, RbNode::set_right(x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, RbNode::set_parent(self.node_ref(x, RbNode::parent)));
        if self.parent_ref(x, RbNode::is_sentinel) {
            debug!("rotation lifts {y:?} to the root");
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, RbNode::set_left(y));
        } else {
            self.parent_mut(x, RbNode::set_right(y));
        }
        self.node_mut(x, RbNode::set_parent(y));
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, RbNode::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, RbNode::right) == node
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, Ix> RbTree<K, Ix>
where
    Ix: IndexType,
{
    fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a RbNode<K, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut RbNode<K, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a RbNode<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a RbNode<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a RbNode<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a RbNode<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut RbNode<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut RbNode<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut RbNode<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut RbNode<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

impl<K, Ix> Tree for RbTree<K, Ix>
where
    Ix: IndexType,
{
    type Key = K;
    type Ix = Ix;

    #[inline]
    fn root(&self) -> Option<NodeIndex<Ix>> {
        self.link(self.root)
    }

    #[inline]
    fn left(&self, node: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        self.link(self.node_ref(node, RbNode::left))
    }

    #[inline]
    fn right(&self, node: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        self.link(self.node_ref(node, RbNode::right))
    }

    #[inline]
    fn key(&self, node: NodeIndex<Ix>) -> &K {
        self.node_ref(node, RbNode::key)
    }
}

impl<'a, K, Ix> IntoIterator for &'a RbTree<K, Ix>
where
    Ix: IndexType,
{
    type Item = &'a K;
    type IntoIter = InOrder<'a, RbTree<K, Ix>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Ix> Extend<K> for RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    #[inline]
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K> FromIterator<K> for RbTree<K>
where
    K: Ord,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = RbTree::new();
        tree.extend(iter);
        tree
    }
}
