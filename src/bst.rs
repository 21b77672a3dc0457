//! The unbalanced ordered search tree that the AVL layer extends.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Structural insertion and removal
//! report the path of ancestors they walked through, root first, so a balancing layer can revisit
//! exactly those nodes bottom-up without searching again.

use alloc::vec::Vec;
use core::{borrow::Borrow, cmp::Ordering, mem};

use crate::{
    node::{Dir, Link, Node, NodeId},
    Error, Result,
};

enum Slot<T> {
    Occupied(Node<T>),
    // Next free slot.
    Vacant(Link),
}

/// An ordered binary search tree with parent links and cached subtree heights.
///
/// The tree itself never rebalances and never recomputes heights on its own; new leaves start at
/// height 1 and everything above them is left for the caller to repair.
pub struct Bst<T> {
    slots: Vec<Slot<T>>,
    free: Link,
    root: Link,
    len: usize,
}

impl<T> Bst<T> {
    /// Returns a new empty tree.
    pub const fn new() -> Bst<T> {
        Bst {
            slots: Vec::new(),
            free: None,
            root: None,
            len: 0,
        }
    }

    /// Returns the number of elements in the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree contains no elements.
    pub const fn is_empty(&self) -> bool {
        let empty = self.len == 0;

        if cfg!(debug_assertions) {
            assert!(empty == self.root.is_none());
        }

        empty
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub(crate) fn set_root(&mut self, root: Link) {
        self.root = root;
    }

    /// Returns the node named by `id`, or `None` if the slot is free.
    pub fn get_node(&self, id: NodeId) -> Option<&Node<T>> {
        match self.slots.get(id.index())? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant(_) => None,
        }
    }

    /// Returns the node named by `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a live node.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<T> {
        self.get_node(id).expect("dangling node id")
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.slots.get_mut(id.index()) {
            Some(Slot::Occupied(node)) => node,
            _ => panic!("dangling node id {id}"),
        }
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id.index()], Slot::Occupied(node));
                self.free = match slot {
                    Slot::Vacant(next) => next,
                    Slot::Occupied(_) => unreachable!("free list points at a live node"),
                };
                id
            }
            None => {
                let id = NodeId::new(self.slots.len());
                self.slots.push(Slot::Occupied(node));
                id
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<T> {
        let slot = mem::replace(&mut self.slots[id.index()], Slot::Vacant(self.free));
        self.free = Some(id);

        match slot {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("double free of node {id}"),
        }
    }

    /// Height of the subtree behind `link`. An empty subtree has height 0.
    #[inline]
    pub fn height(&self, link: Option<NodeId>) -> u32 {
        link.map_or(0, |id| self.node(id).height())
    }

    /// Recomputes the cached height of `id` from its children's cached heights.
    pub fn update_height(&mut self, id: NodeId) {
        let node = self.node(id);
        let height = 1 + self.height(node.left()).max(self.height(node.right()));
        self.node_mut(id).set_height(height);
    }

    /// Returns `height(left) - height(right)` for `id`.
    pub fn balance_factor(&self, id: NodeId) -> i32 {
        let node = self.node(id);
        self.height(node.left()) as i32 - self.height(node.right()) as i32
    }

    pub(crate) fn which_child(&self, parent: NodeId, child: NodeId) -> Dir {
        if self.node(parent).left() == Some(child) {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    // Replaces the child link of `parent` pointing at `old_child` with `new_child`.
    //
    // `new_child`'s parent link is not updated.
    fn replace_child(&mut self, parent: NodeId, old_child: NodeId, new_child: Link) {
        let dir = self.which_child(parent, old_child);
        debug_assert_eq!(self.node(parent).child(dir), Some(old_child));
        self.node_mut(parent).set_child(dir, new_child);
    }

    fn replace_child_or_set_root(&mut self, parent: Link, old_child: NodeId, new_child: Link) {
        match parent {
            Some(parent) => self.replace_child(parent, old_child, new_child),
            None => self.root = new_child,
        }
    }

    fn maybe_set_parent(&mut self, opt_node: Link, parent: Link) {
        if let Some(node) = opt_node {
            self.node_mut(node).set_parent(parent);
        }
    }

    fn swap_values(&mut self, a: NodeId, b: NodeId) {
        assert_ne!(a, b);

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi.index());

        match (&mut head[lo.index()], &mut tail[0]) {
            (Slot::Occupied(x), Slot::Occupied(y)) => mem::swap(x.value_mut(), y.value_mut()),
            _ => panic!("dangling node id"),
        }
    }

    // Collects the ancestors of `id` by following parent links, root first.
    fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut opt_cur = self.node(id).parent();

        while let Some(cur) = opt_cur {
            path.push(cur);
            opt_cur = self.node(cur).parent();
        }

        path.reverse();
        path
    }

    /// Returns the minimum node of the tree.
    pub fn first(&self) -> Option<NodeId> {
        self.root.map(|root| self.min_in_subtree(root))
    }

    /// Returns the maximum node of the tree.
    pub fn last(&self) -> Option<NodeId> {
        let mut cur = self.root?;

        while let Some(right) = self.node(cur).right() {
            cur = right;
        }

        Some(cur)
    }

    pub(crate) fn min_in_subtree(&self, root: NodeId) -> NodeId {
        let mut cur = root;

        while let Some(left) = self.node(cur).left() {
            cur = left;
        }

        cur
    }

    /// Removes every node and releases the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.root = None;
        self.len = 0;
    }

    /// Unlinks a node with at most one child, splicing the child into its place.
    fn unlink(&mut self, id: NodeId) -> T {
        let node = self.node(id);
        debug_assert!(node.left().is_none() || node.right().is_none());

        let parent = node.parent();
        let child = node.left().or(node.right());

        self.replace_child_or_set_root(parent, id, child);
        self.maybe_set_parent(child, parent);
        self.len -= 1;

        self.release(id).into_value()
    }

    // Removes `id`, whose ancestors are `path`. Returns the removed value together with the
    // ancestors of the node that was physically unlinked.
    fn remove_with_path(&mut self, id: NodeId, mut path: Vec<NodeId>) -> (T, Vec<NodeId>) {
        let node = self.node(id);

        let unlinked = match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                // The in-order successor donates its value and is unlinked in place of `id`.
                path.push(id);

                let mut succ = right;
                while let Some(left) = self.node(succ).left() {
                    path.push(succ);
                    succ = left;
                }

                self.swap_values(id, succ);
                succ
            }
            _ => id,
        };

        (self.unlink(unlinked), path)
    }

    /// Removes the node named by `id`.
    ///
    /// Returns the value that `id` held and the ancestors of the node that was physically
    /// unlinked, root first. When `id` has two children the unlinked node is its in-order
    /// successor, whose value moves into `id`.
    pub fn remove_at(&mut self, id: NodeId) -> (T, Vec<NodeId>) {
        let path = self.ancestors(id);
        self.remove_with_path(id, path)
    }
}

impl<T: Ord> Bst<T> {
    /// Returns the node holding a value equal to `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut opt_cur = self.root;

        loop {
            let cur = opt_cur?;

            match key.cmp(self.node(cur).value().borrow()) {
                Ordering::Less => opt_cur = self.node(cur).left(),
                Ordering::Equal => return Some(cur),
                Ordering::Greater => opt_cur = self.node(cur).right(),
            }
        }
    }

    /// Places `value` in a new leaf.
    ///
    /// On success, returns the new leaf and its ancestors, root first. Inserting into an empty tree
    /// returns an empty path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateValue`] if an equal value is already present. The tree is left
    /// unchanged.
    pub fn insert(&mut self, value: T) -> Result<(NodeId, Vec<NodeId>)> {
        let Some(mut cur) = self.root else {
            let id = self.alloc(Node::leaf(value, None));
            self.root = Some(id);
            self.len += 1;
            return Ok((id, Vec::new()));
        };

        let mut path = Vec::new();

        // Descend the tree, looking for a free child slot.
        let leaf = loop {
            path.push(cur);

            let dir = match value.cmp(self.node(cur).value()) {
                Ordering::Less => Dir::Left,
                Ordering::Equal => {
                    log::debug!("insert: duplicate value at {cur}");
                    return Err(Error::DuplicateValue);
                }
                Ordering::Greater => Dir::Right,
            };

            match self.node(cur).child(dir) {
                Some(child) => cur = child,
                None => {
                    let id = self.alloc(Node::leaf(value, Some(cur)));
                    self.node_mut(cur).set_child(dir, Some(id));
                    break id;
                }
            }
        };

        self.len += 1;
        log::debug!("insert: new leaf {leaf} at depth {}", path.len());

        Ok((leaf, path))
    }

    /// Removes the value equal to `key`.
    ///
    /// Returns the removed value and the ancestors of the node that was physically unlinked, root
    /// first, or `None` if no such value is present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(T, Vec<NodeId>)>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut path = Vec::new();
        let mut opt_cur = self.root;

        let found = loop {
            let Some(cur) = opt_cur else {
                log::debug!("remove: value not present");
                return None;
            };

            match key.cmp(self.node(cur).value().borrow()) {
                Ordering::Less => opt_cur = self.node(cur).left(),
                Ordering::Equal => break cur,
                Ordering::Greater => opt_cur = self.node(cur).right(),
            }

            path.push(cur);
        };

        let (value, path) = self.remove_with_path(found, path);
        log::debug!("remove: unlinked node at depth {}", path.len());

        Some((value, path))
    }
}

impl<T> Default for Bst<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bst_of(values: &[u32]) -> Bst<u32> {
        let mut bst = Bst::new();
        for &v in values {
            bst.insert(v).expect("distinct values");
        }
        bst
    }

    fn value_at(bst: &Bst<u32>, link: Option<NodeId>) -> Option<u32> {
        link.map(|id| *bst.node(id).value())
    }

    #[test]
    fn insert_returns_ancestor_path() {
        let mut bst = bst_of(&[20, 10, 30]);
        let (leaf, path) = bst.insert(15).unwrap();

        let values: Vec<u32> = path.iter().map(|&id| *bst.node(id).value()).collect();
        assert_eq!(values, [20, 10]);

        assert_eq!(bst.find(&15), Some(leaf));
        assert_eq!(bst.node(leaf).parent(), path.last().copied());
        assert_eq!(bst.node(leaf).height(), 1);
    }

    #[test]
    fn insert_duplicate_leaves_tree_unchanged() {
        let mut bst = bst_of(&[2, 1, 3]);
        assert_eq!(bst.insert(3), Err(Error::DuplicateValue));
        assert_eq!(bst.len(), 3);
    }

    #[test]
    fn remove_leaf() {
        let mut bst = bst_of(&[2, 1, 3]);
        let (value, path) = bst.remove(&1).unwrap();

        assert_eq!(value, 1);
        assert_eq!(path, [bst.root().unwrap()]);
        assert_eq!(bst.node(bst.root().unwrap()).left(), None);
        assert_eq!(bst.len(), 2);
    }

    #[test]
    fn remove_promotes_only_child() {
        let mut bst = bst_of(&[2, 1, 4, 3]);
        let (value, _) = bst.remove(&4).unwrap();
        assert_eq!(value, 4);

        let root = bst.root().unwrap();
        let right = bst.node(root).right();
        assert_eq!(value_at(&bst, right), Some(3));
        assert_eq!(bst.node(right.unwrap()).parent(), Some(root));
    }

    #[test]
    fn remove_two_children_uses_successor() {
        let mut bst = bst_of(&[5, 2, 8, 7, 9, 6]);
        let (value, path) = bst.remove(&5).unwrap();
        assert_eq!(value, 5);

        // 6 moved into the root; its old parent 7 is the deepest ancestor.
        let root = bst.root().unwrap();
        assert_eq!(*bst.node(root).value(), 6);
        let values: Vec<u32> = path.iter().map(|&id| *bst.node(id).value()).collect();
        assert_eq!(values, [6, 8, 7]);
        assert_eq!(bst.find(&5), None);
    }

    #[test]
    fn remove_absent_is_none() {
        let mut bst = bst_of(&[2, 1, 3]);
        assert!(bst.remove(&4).is_none());
        assert_eq!(bst.len(), 3);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut bst = bst_of(&[2, 1, 3]);
        let id = bst.find(&3).unwrap();
        bst.remove(&3).unwrap();
        bst.insert(4).unwrap();
        assert_eq!(bst.find(&4), Some(id));
    }

    #[test]
    fn first_and_last() {
        let bst = bst_of(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(value_at(&bst, bst.first()), Some(1));
        assert_eq!(value_at(&bst, bst.last()), Some(7));

        let empty: Bst<u32> = Bst::new();
        assert_eq!(empty.first(), None);
        assert_eq!(empty.last(), None);
    }
}
