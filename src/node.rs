#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::index::{IndexType, NodeIndex};

/// Node of the AVL tree
///
/// Heights are not cached; they are recomputed from the children whenever the
/// tree is rebalanced.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AvlNode<K, Ix> {
    /// Left children
    pub left: Option<NodeIndex<Ix>>,
    /// Right children
    pub right: Option<NodeIndex<Ix>>,
    /// Key of the node
    pub key: K,
}

impl<K, Ix> AvlNode<K, Ix>
where
    Ix: IndexType,
{
    pub fn new(key: K) -> Self {
        AvlNode {
            left: None,
            right: None,
            key,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn left(&self) -> Option<NodeIndex<Ix>> {
        self.left
    }

    pub fn right(&self) -> Option<NodeIndex<Ix>> {
        self.right
    }

    pub fn set_left(left: Option<NodeIndex<Ix>>) -> impl FnOnce(&mut AvlNode<K, Ix>) {
        move |node: &mut AvlNode<K, Ix>| {
            node.left = left;
        }
    }

    pub fn set_right(right: Option<NodeIndex<Ix>>) -> impl FnOnce(&mut AvlNode<K, Ix>) {
        move |node: &mut AvlNode<K, Ix>| {
            node.right = right;
        }
    }
}

/// Node of the red-black tree
///
/// The node stored at the sentinel slot has no key; every absent child and the
/// root's parent point at it.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RbNode<K, Ix> {
    /// Left children
    pub left: NodeIndex<Ix>,
    /// Right children
    pub right: NodeIndex<Ix>,
    /// Parent
    pub parent: NodeIndex<Ix>,
    /// Color of the node
    pub color: Color,
    /// Key of the node, `None` for the sentinel
    pub key: Option<K>,
}

// Convenient getter/setter methods
impl<K, Ix> RbNode<K, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn key(&self) -> &K {
        self.key.as_ref().unwrap()
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent
    }

    pub fn is_sentinel(&self) -> bool {
        self.key.is_none()
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut RbNode<K, Ix>) {
        move |node: &mut RbNode<K, Ix>| {
            node.color = color;
        }
    }

    pub fn set_left(left: NodeIndex<Ix>) -> impl FnOnce(&mut RbNode<K, Ix>) {
        move |node: &mut RbNode<K, Ix>| {
            node.left = left;
        }
    }

    pub fn set_right(right: NodeIndex<Ix>) -> impl FnOnce(&mut RbNode<K, Ix>) {
        move |node: &mut RbNode<K, Ix>| {
            node.right = right;
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut RbNode<K, Ix>) {
        move |node: &mut RbNode<K, Ix>| {
            node.parent = parent;
        }
    }
}

/// The color of a red-black tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}
