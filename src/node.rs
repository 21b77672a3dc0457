use core::{fmt, ops::Not};

/// A stable handle to a node stored in a [`Bst`](crate::bst::Bst) arena.
///
/// Handles stay valid until the node they name is removed. A freed slot may be handed out again by
/// a later insertion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> NodeId {
        NodeId(u32::try_from(index).expect("node arena exceeds u32::MAX slots"))
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) type Link = Option<NodeId>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// A single tree node.
///
/// The node owns its value for its whole lifetime. Its links and cached height are rewritten by
/// the tree as the structure changes.
#[derive(Clone, Debug)]
pub struct Node<T> {
    value: T,
    parent: Link,
    children: [Link; 2],
    height: u32,
}

impl<T> Node<T> {
    /// A fresh leaf: no links, height 1.
    pub(crate) fn leaf(value: T, parent: Link) -> Node<T> {
        Node {
            value,
            parent,
            children: [None; 2],
            height: 1,
        }
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    #[inline]
    pub(crate) fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn child(&self, dir: Dir) -> Option<NodeId> {
        self.children[dir as usize]
    }

    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.child(Dir::Left)
    }

    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.child(Dir::Right)
    }

    /// Cached height of the subtree rooted here. A leaf has height 1.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Link) -> Link {
        core::mem::replace(&mut self.parent, parent)
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Dir, child: Link) -> Link {
        core::mem::replace(&mut self.children[dir as usize], child)
    }

    #[inline]
    pub(crate) fn set_height(&mut self, height: u32) {
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_has_height_one() {
        let node = Node::leaf(7u32, None);
        assert_eq!(node.height(), 1);
        assert!(node.is_leaf());
        assert_eq!(node.parent(), None);
        assert_eq!(*node.value(), 7);
    }

    #[test]
    fn set_child_returns_previous() {
        let mut node = Node::leaf(0u32, None);
        assert_eq!(node.set_child(Dir::Left, Some(NodeId::new(3))), None);
        assert_eq!(node.set_child(Dir::Left, None), Some(NodeId::new(3)));
        assert_eq!(node.set_child(!Dir::Left, Some(NodeId::new(4))), None);
        assert_eq!(node.right(), Some(NodeId::new(4)));
        assert!(!node.is_leaf());
    }
}
