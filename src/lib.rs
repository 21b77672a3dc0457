//! A self-balancing binary search tree (AVL tree).
//!
//! [`AvlTree`] extends the unbalanced ordered tree in [`bst`] with height bookkeeping and the four
//! classic [`Rotation`]s. Every structural change reports the path of ancestors it walked through,
//! and the AVL layer revisits that path bottom-up, repairing heights and rotating any node whose
//! balance factor left `[-1, 1]`.
//!
//! Nodes are kept in an arena and linked by [`NodeId`], so a rotation is a handful of index
//! reassignments.
//!
//! ```
//! use avl_tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for value in [10, 20, 30] {
//!     tree.insert(value).unwrap();
//! }
//!
//! // Inserting in increasing order triggers a left rotation at the root.
//! assert_eq!(tree.root(), Some(&20));
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [10, 20, 30]);
//! ```

extern crate alloc;

use core::borrow::Borrow;

pub mod bst;
mod dot;
mod error;
mod iter;
#[cfg(any(test, feature = "model"))]
pub mod model;
mod node;
pub mod rotation;


pub use crate::{
    error::{Error, Result},
    iter::Iter,
    node::{Dir, Node, NodeId},
    rotation::Rotation,
};

use crate::bst::Bst;

/// An ordered set of unique values, kept height-balanced by AVL rotations.
///
/// After every public operation, each node's subtrees differ in height by at most one, so lookups,
/// insertions and removals all complete in _O(log(n))_ time.
pub struct AvlTree<T> {
    tree: Bst<T>,
}

impl<T> AvlTree<T> {
    /// Returns a new empty tree.
    pub const fn new() -> AvlTree<T> {
        AvlTree { tree: Bst::new() }
    }

    /// Returns `true` if the tree contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of elements in the tree.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns the height of the tree. An empty tree has height 0.
    pub fn height(&self) -> u32 {
        self.tree.height(self.tree.root())
    }

    /// Returns the value stored at the root.
    pub fn root(&self) -> Option<&T> {
        self.tree.root().map(|root| self.tree.node(root).value())
    }

    /// Returns the underlying node structure, for inspecting links and cached heights.
    pub fn as_bst(&self) -> &Bst<T> {
        &self.tree
    }

    /// Returns the minimum value of the tree.
    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|id| self.tree.node(id).value())
    }

    /// Returns the maximum value of the tree.
    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|id| self.tree.node(id).value())
    }

    /// Returns an iterator over the values of the tree, in increasing order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.tree)
    }

    /// Clears the tree, removing all elements.
    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts `value` into the tree.
    ///
    /// This operation completes in _O(log(n))_ time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateValue`] if an equal value is already present. The tree is not
    /// modified in that case.
    pub fn insert(&mut self, value: T) -> Result<()> {
        let (leaf, path) = self.tree.insert(value)?;
        self.rebalance_inserted(leaf, &path);
        Ok(())
    }

    /// Removes the value equal to `key` and returns it.
    ///
    /// Removing a value that is not present is a no-op and returns `None`.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (value, path) = self.tree.remove(key)?;
        self.rebalance_removed(&path);
        Some(value)
    }

    /// Removes the value equal to `key` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueNotFound`] if no such value is present.
    pub fn try_remove<Q>(&mut self, key: &Q) -> Result<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).ok_or(Error::ValueNotFound)
    }

    /// Returns `true` if the tree contains a value equal to `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key).is_some()
    }

    /// Returns a reference to the value equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key).map(|id| self.tree.node(id).value())
    }

    /// Removes and returns the minimum value of the tree.
    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.tree.first()?;
        let (value, path) = self.tree.remove_at(first);
        self.rebalance_removed(&path);
        Some(value)
    }

    /// Removes and returns the maximum value of the tree.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.tree.last()?;
        let (value, path) = self.tree.remove_at(last);
        self.rebalance_removed(&path);
        Some(value)
    }

    // Walks the ancestors of a new leaf bottom-up. Each ancestor is classified on its own, against
    // the inserted value, after its height has been refreshed.
    fn rebalance_inserted(&mut self, leaf: NodeId, path: &[NodeId]) {
        for &node in path.iter().rev() {
            self.tree.update_height(node);

            if let Some(rotation) = Rotation::after_insert(&self.tree, node, leaf) {
                rotation.rotate(&mut self.tree, node);
            }
        }
    }

    // Walks the ancestors of an unlinked node bottom-up. Rotations are picked from the shape of
    // the heavy child, never from the removed value.
    fn rebalance_removed(&mut self, path: &[NodeId]) {
        for &node in path.iter().rev() {
            self.tree.update_height(node);

            if let Some(rotation) = Rotation::after_remove(&self.tree, node) {
                rotation.rotate(&mut self.tree, node);
            }
        }
    }

    /// Checks every structural invariant of the tree, panicking on the first violation.
    ///
    /// The checks are ordering, balance, cached heights, parent links, the root having no parent
    /// and the element count.
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        match self.tree.root() {
            Some(root) => {
                assert_eq!(self.tree.node(root).parent(), None, "root has a parent");

                let (_, count) = self.assert_invariants_at(root);
                assert_eq!(count, self.len(), "length does not match node count");
            }
            None => assert_eq!(self.len(), 0, "empty tree has a nonzero length"),
        }

        let mut iter = self.iter();
        if let Some(mut prev) = iter.next() {
            for cur in iter {
                assert!(prev < cur, "in-order traversal is not strictly increasing");
                prev = cur;
            }
        }
    }

    // Returns the true height of the subtree and its node count.
    fn assert_invariants_at(&self, node: NodeId) -> (u32, usize) {
        let mut heights = [0; 2];
        let mut count = 1;

        for dir in [Dir::Left, Dir::Right] {
            if let Some(child) = self.tree.node(node).child(dir) {
                // Ensure child's parent link points to this node.
                assert_eq!(
                    self.tree.node(child).parent(),
                    Some(node),
                    "child parent pointer not set"
                );

                let (height, child_count) = self.assert_invariants_at(child);
                heights[dir as usize] = height;
                count += child_count;
            }
        }

        let height = 1 + heights[0].max(heights[1]);
        assert_eq!(
            self.tree.node(node).height(),
            height,
            "stale cached height at {node}"
        );

        let balance = heights[0] as i32 - heights[1] as i32;
        assert!(
            (-1..=1).contains(&balance),
            "node {node} has balance factor {balance}"
        );

        (height, count)
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    /// Inserts every value, skipping ones already present.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            // Duplicates are dropped, matching `BTreeSet`'s set semantics.
            let _ = self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
