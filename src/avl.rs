use std::cmp::Ordering;

use log::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::index::{assert_capacity, DefaultIx, IndexType, NodeIndex};
use crate::node::AvlNode;
use crate::traverse::{self, InOrder, PostOrder, PreOrder, Tree};

/// A height-balanced binary search tree.
///
/// After every insertion the heights of the two subtrees of any node differ
/// by at most one.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AvlTree<K, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<AvlNode<K, Ix>>,
    /// Root of the tree
    pub(crate) root: Option<NodeIndex<Ix>>,
}

impl<K, Ix> AvlTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `AvlTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlTree {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Insert a key into the tree, rebalancing on the way back up.
    /// Inserting a key that is already present does nothing.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use balanced_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// for k in [1, 2, 3] {
    ///     tree.insert(k);
    /// }
    /// assert_eq!(tree.root_key(), Some(&2));
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&1, &2, &3]);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K) {
        let mut path = Vec::new();
        let mut x = self.root;
        while let Some(idx) = x {
            let ord = key.cmp(self.node_ref(idx, AvlNode::key));
            x = match ord {
                Ordering::Less => self.node_ref(idx, AvlNode::left),
                Ordering::Greater => self.node_ref(idx, AvlNode::right),
                Ordering::Equal => return,
            };
            path.push((idx, ord));
        }

        let mut child = self.new_node(key);
        while let Some((parent, ord)) = path.pop() {
            if ord == Ordering::Less {
                self.node_mut(parent, AvlNode::set_left(Some(child)));
            } else {
                self.node_mut(parent, AvlNode::set_right(Some(child)));
            }
            child = self.balance(parent);
        }
        self.root = Some(child);
    }

    /// Insert a key if there is one. `None` leaves the tree untouched.
    ///
    /// # Example
    /// ```rust
    /// use balanced_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert_opt(None);
    /// assert!(tree.is_empty());
    /// tree.insert_opt(Some(4));
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[inline]
    pub fn insert_opt(&mut self, key: Option<K>) {
        if let Some(key) = key {
            self.insert(key);
        }
    }

    /// Return `true` if the tree holds `key`.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        traverse::search(self, key).is_some()
    }
}

impl<K, Ix> AvlTree<K, Ix>
where
    Ix: IndexType,
{
    /// Key stored at the root.
    #[inline]
    #[must_use]
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|r| self.node_ref(r, AvlNode::key))
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
        self.subtree_height(self.root)
    }

    /// Get an iterator over the keys of the tree, sorted ascending.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> InOrder<'_, Self> {
        InOrder::new(self)
    }

    /// Same as [`AvlTree::iter`].
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
        self.nodes.clear();
        self.root = None;
    }

    /// Return the number of keys in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` if the tree contains no keys.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> AvlTree<K>
where
    K: Ord,
{
    /// Create an empty `AvlTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<K> Default for AvlTree<K>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, Ix> AvlTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Push a detached node into the arena.
    fn new_node(&mut self, key: K) -> NodeIndex<Ix> {
        let idx = NodeIndex::new(self.nodes.len());
        assert_capacity(idx);
        self.nodes.push(AvlNode::new(key));
        idx
    }

    /// Restore the balance of the subtree rooted at `x`, returning its new root.
    fn balance(&mut self, x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        let left = self.node_ref(x, AvlNode::left);
        let right = self.node_ref(x, AvlNode::right);
        let lh = self.subtree_height(left);
        let rh = self.subtree_height(right);

        if lh > rh + 1 {
            let Some(l) = left else { return x };
            let ll = self.subtree_height(self.node_ref(l, AvlNode::left));
            let lr = self.subtree_height(self.node_ref(l, AvlNode::right));
            if ll >= lr {
                trace!("LL rotation at {x:?}");
                self.ll_rotate(x)
            } else {
                trace!("LR rotation at {x:?}");
                self.lr_rotate(x)
            }
        } else if rh > lh + 1 {
            let Some(r) = right else { return x };
            let rr = self.subtree_height(self.node_ref(r, AvlNode::right));
            let rl = self.subtree_height(self.node_ref(r, AvlNode::left));
            if rr >= rl {
                trace!("RR rotation at {x:?}");
                self.rr_rotate(x)
            } else {
                trace!("RL rotation at {x:?}");
                self.rl_rotate(x)
            }
        } else {
            x
        }
    }

    /// Single right rotation, lifting the left child of `x`.
    fn ll_rotate(&mut self, x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        let Some(y) = self.node_ref(x, AvlNode::left) else {
            return x;
        };
        self.node_mut(x, AvlNode::set_left(self.node_ref(y, AvlNode::right)));
        self.node_mut(y, AvlNode::set_right(Some(x)));
        y
    }

    /// Single left rotation, lifting the right child of `x`.
    fn rr_rotate(&mut self, x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        let Some(y) = self.node_ref(x, AvlNode::right) else {
            return x;
        };
        self.node_mut(x, AvlNode::set_right(self.node_ref(y, AvlNode::left)));
        self.node_mut(y, AvlNode::set_left(Some(x)));
        y
    }

    fn lr_rotate(&mut self, x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if let Some(l) = self.node_ref(x, AvlNode::left) {
            let l = self.rr_rotate(l);
            self.node_mut(x, AvlNode::set_left(Some(l)));
        }
        self.ll_rotate(x)
    }

    fn rl_rotate(&mut self, x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if let Some(r) = self.node_ref(x, AvlNode::right) {
            let r = self.ll_rotate(r);
            self.node_mut(x, AvlNode::set_right(Some(r)));
        }
        self.rr_rotate(x)
    }
}

// Convenient methods for reference or mutate a node
impl<'a, K, Ix> AvlTree<K, Ix>
where
    Ix: IndexType,
{
    fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a AvlNode<K, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut AvlNode<K, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    /// Height of the subtree rooted at `node`, walking every child.
    fn subtree_height(&self, node: Option<NodeIndex<Ix>>) -> usize {
        node.map_or(0, |x| {
            let left = self.subtree_height(self.nodes[x.index()].left());
            let right = self.subtree_height(self.nodes[x.index()].right());
            left.max(right) + 1
        })
    }
}

impl<K, Ix> Tree for AvlTree<K, Ix>
where
    Ix: IndexType,
{
    type Key = K;
    type Ix = Ix;

    #[inline]
    fn root(&self) -> Option<NodeIndex<Ix>> {
        self.root
    }

    #[inline]
    fn left(&self, node: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        self.node_ref(node, AvlNode::left)
    }

    #[inline]
    fn right(&self, node: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        self.node_ref(node, AvlNode::right)
    }

    #[inline]
    fn key(&self, node: NodeIndex<Ix>) -> &K {
        self.node_ref(node, AvlNode::key)
    }
}

impl<'a, K, Ix> IntoIterator for &'a AvlTree<K, Ix>
where
    Ix: IndexType,
{
    type Item = &'a K;
    type IntoIter = InOrder<'a, AvlTree<K, Ix>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Ix> Extend<K> for AvlTree<K, Ix>
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

impl<K> FromIterator<K> for AvlTree<K>
where
    K: Ord,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}
