use crate::index::{IndexType, NodeIndex};

/// Read-only view of the links of a binary search tree.
///
/// This is everything a presenter needs to walk a tree: the root handle, the
/// child handles of a node and the key stored at a node. Both [`AvlTree`] and
/// [`RbTree`] implement it.
///
/// [`AvlTree`]: crate::AvlTree
/// [`RbTree`]: crate::RbTree
pub trait Tree {
    /// Key type stored in the tree
    type Key;
    /// Index type of the node arena
    type Ix: IndexType;

    /// Handle of the root node, `None` for an empty tree.
    fn root(&self) -> Option<NodeIndex<Self::Ix>>;

    /// Handle of the left child of `node`.
    fn left(&self, node: NodeIndex<Self::Ix>) -> Option<NodeIndex<Self::Ix>>;

    /// Handle of the right child of `node`.
    fn right(&self, node: NodeIndex<Self::Ix>) -> Option<NodeIndex<Self::Ix>>;

    /// Key stored at `node`.
    fn key(&self, node: NodeIndex<Self::Ix>) -> &Self::Key;
}

/// Pushes a link of nodes on the left to stack.
fn push_left_link<T: Tree>(
    tree: &T,
    mut x: Option<NodeIndex<T::Ix>>,
    stack: &mut Vec<NodeIndex<T::Ix>>,
) {
    while let Some(idx) = x {
        stack.push(idx);
        x = tree.left(idx);
    }
}

/// An iterator over the keys of a tree in ascending order.
#[derive(Debug)]
pub struct InOrder<'a, T: Tree> {
    /// Reference to the tree
    tree: &'a T,
    /// Stack for iteration
    stack: Vec<NodeIndex<T::Ix>>,
}

impl<'a, T: Tree> InOrder<'a, T> {
    pub fn new(tree: &'a T) -> Self {
        let mut stack = Vec::new();
        push_left_link(tree, tree.root(), &mut stack);
        InOrder { tree, stack }
    }
}

impl<'a, T: Tree> Iterator for InOrder<'a, T> {
    type Item = &'a T::Key;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        push_left_link(self.tree, self.tree.right(x), &mut self.stack);
        Some(self.tree.key(x))
    }
}

/// An iterator visiting every node before its children, left subtree first.
#[derive(Debug)]
pub struct PreOrder<'a, T: Tree> {
    tree: &'a T,
    stack: Vec<NodeIndex<T::Ix>>,
}

impl<'a, T: Tree> PreOrder<'a, T> {
    pub fn new(tree: &'a T) -> Self {
        PreOrder {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, T: Tree> Iterator for PreOrder<'a, T> {
    type Item = &'a T::Key;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        self.stack.extend(self.tree.right(x));
        self.stack.extend(self.tree.left(x));
        Some(self.tree.key(x))
    }
}

/// An iterator visiting both subtrees of a node before the node itself.
#[derive(Debug)]
pub struct PostOrder<'a, T: Tree> {
    tree: &'a T,
    /// Pending nodes, flagged once their children have been scheduled
    stack: Vec<(NodeIndex<T::Ix>, bool)>,
}

impl<'a, T: Tree> PostOrder<'a, T> {
    pub fn new(tree: &'a T) -> Self {
        PostOrder {
            tree,
            stack: tree.root().map(|r| (r, false)).into_iter().collect(),
        }
    }
}

impl<'a, T: Tree> Iterator for PostOrder<'a, T> {
    type Item = &'a T::Key;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (x, expanded) = self.stack.pop()?;
            if expanded {
                return Some(self.tree.key(x));
            }
            self.stack.push((x, true));
            self.stack.extend(self.tree.right(x).map(|r| (r, false)));
            self.stack.extend(self.tree.left(x).map(|l| (l, false)));
        }
    }
}

/// Number of nodes on the longest path from the root down to a leaf.
pub(crate) fn height<T: Tree>(tree: &T) -> usize {
    let mut max = 0;
    let mut stack: Vec<_> = tree.root().map(|r| (r, 1)).into_iter().collect();
    while let Some((x, depth)) = stack.pop() {
        max = max.max(depth);
        stack.extend(tree.left(x).map(|l| (l, depth + 1)));
        stack.extend(tree.right(x).map(|r| (r, depth + 1)));
    }
    max
}

/// Search for the node holding `key`.
pub(crate) fn search<T>(tree: &T, key: &T::Key) -> Option<NodeIndex<T::Ix>>
where
    T: Tree,
    T::Key: Ord,
{
    let mut x = tree.root();
    while let Some(idx) = x {
        x = match key.cmp(tree.key(idx)) {
            std::cmp::Ordering::Less => tree.left(idx),
            std::cmp::Ordering::Greater => tree.right(idx),
            std::cmp::Ordering::Equal => return Some(idx),
        };
    }
    None
}

/// Key of the leftmost node.
pub(crate) fn first<T: Tree>(tree: &T) -> Option<&T::Key> {
    let mut x = tree.root()?;
    while let Some(l) = tree.left(x) {
        x = l;
    }
    Some(tree.key(x))
}

/// Key of the rightmost node.
pub(crate) fn last<T: Tree>(tree: &T) -> Option<&T::Key> {
    let mut x = tree.root()?;
    while let Some(r) = tree.right(x) {
        x = r;
    }
    Some(tree.key(x))
}
