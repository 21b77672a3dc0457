//! The four AVL rotation shapes and the rules that pick one.
//!
//! A rotation is applied to a pivot `node` in a [`Bst`]. Single rotations move one child up into
//! the pivot's place and repair the heights of the two nodes whose subtrees changed. Composite
//! rotations are two single rotations in sequence.
//!
//! ```text
//!        node                  right
//!       /    \                /     \
//!      a     right    ==>   node     c
//!           /     \        /    \
//!       rightLeft  c      a   rightLeft
//! ```
//!
//! The picture above is [`Rotation::Left`]; [`Rotation::Right`] is its mirror image.

use core::cmp::Ordering;

use crate::{
    bst::Bst,
    node::{Dir, NodeId},
};

/// A rotation strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Counter-clockwise: the right child becomes the subtree root.
    Left,
    /// Clockwise: the left child becomes the subtree root.
    Right,
    /// [`Rotation::Left`] at the left child, then [`Rotation::Right`] at the pivot.
    LeftRight,
    /// [`Rotation::Right`] at the right child, then [`Rotation::Left`] at the pivot.
    RightLeft,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Left,
        Rotation::Right,
        Rotation::LeftRight,
        Rotation::RightLeft,
    ];

    /// Applies the rotation with `node` as the pivot.
    ///
    /// If `node` was the root of `tree`, the node that replaces it becomes the new root.
    ///
    /// # Panics
    ///
    /// Panics if a child the rotation needs is missing. The subtree must already be ordered.
    pub fn rotate<T: Ord>(self, tree: &mut Bst<T>, node: NodeId) {
        log::trace!("{self:?} rotation at {node}");

        match self {
            Rotation::Left => rotate_single(tree, node, Dir::Left),
            Rotation::Right => rotate_single(tree, node, Dir::Right),
            Rotation::LeftRight => {
                let left = tree
                    .node(node)
                    .left()
                    .expect("left-right rotation requires a left child");
                Rotation::Left.rotate(tree, left);
                Rotation::Right.rotate(tree, node);
            }
            Rotation::RightLeft => {
                let right = tree
                    .node(node)
                    .right()
                    .expect("right-left rotation requires a right child");
                Rotation::Right.rotate(tree, right);
                Rotation::Left.rotate(tree, node);
            }
        }
    }

    /// Picks the rotation that rebalances `node` after `inserted` was placed below it.
    ///
    /// The cached height of `node` must be current. Returns `None` when the balance factor of
    /// `node` is within bounds.
    pub fn after_insert<T: Ord>(tree: &Bst<T>, node: NodeId, inserted: NodeId) -> Option<Rotation> {
        let balance = tree.balance_factor(node);
        let value = tree.node(inserted).value();

        if balance > 1 {
            let left = tree.node(node).left().expect("left-heavy node has a left child");

            if value < tree.node(left).value() {
                Some(Rotation::Right)
            } else {
                Some(Rotation::LeftRight)
            }
        } else if balance < -1 {
            let right = tree
                .node(node)
                .right()
                .expect("right-heavy node has a right child");

            if value > tree.node(right).value() {
                Some(Rotation::Left)
            } else {
                Some(Rotation::RightLeft)
            }
        } else {
            None
        }
    }

    /// Picks the rotation that rebalances `node` after a removal below it.
    ///
    /// The choice depends only on the shape of the heavy child. The outer grandchild (left-left
    /// for a left-heavy node) wins unless the inner grandchild's subtree is strictly taller, so a
    /// heavy child with two equally tall subtrees gets a single rotation.
    ///
    /// The cached height of `node` must be current. Returns `None` when the balance factor of
    /// `node` is within bounds.
    pub fn after_remove<T>(tree: &Bst<T>, node: NodeId) -> Option<Rotation> {
        let balance = tree.balance_factor(node);

        let heavy = match balance {
            b if b > 1 => Dir::Left,
            b if b < -1 => Dir::Right,
            _ => return None,
        };

        let child = tree
            .node(node)
            .child(heavy)
            .expect("heavy side has a child");
        let outer = tree.height(tree.node(child).child(heavy));
        let inner = tree.height(tree.node(child).child(!heavy));

        let rotation = match (heavy, outer >= inner) {
            (Dir::Left, true) => Rotation::Right,
            (Dir::Left, false) => Rotation::LeftRight,
            (Dir::Right, true) => Rotation::Left,
            (Dir::Right, false) => Rotation::RightLeft,
        };

        Some(rotation)
    }
}

// Rotates `node` down towards `dir`; its `!dir` child moves up into its place.
fn rotate_single<T: Ord>(tree: &mut Bst<T>, node: NodeId, dir: Dir) {
    let parent = tree.node(node).parent();
    let up = tree
        .node(node)
        .child(!dir)
        .expect("rotation pivot is missing the child that moves up");
    let across = tree.node(up).child(dir);

    tree.node_mut(node).set_child(!dir, across);
    tree.node_mut(up).set_child(dir, Some(node));

    if tree.root() == Some(node) {
        tree.set_root(Some(up));
    } else {
        let parent = parent.expect("non-root node has a parent");

        // The slot `node` occupied in its parent follows from the ordering of the parent's value
        // against the node moving up.
        let slot = match tree.node(parent).value().cmp(tree.node(up).value()) {
            Ordering::Less => Dir::Right,
            Ordering::Greater => Dir::Left,
            Ordering::Equal => unreachable!("duplicate values in an ordered tree"),
        };
        tree.node_mut(parent).set_child(slot, Some(up));
    }

    if let Some(across) = across {
        tree.node_mut(across).set_parent(Some(node));
    }

    tree.node_mut(node).set_parent(Some(up));
    tree.node_mut(up).set_parent(parent);

    // `up`'s height depends on the new height of `node`.
    tree.update_height(node);
    tree.update_height(up);
}
