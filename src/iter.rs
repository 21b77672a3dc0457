use core::iter::FusedIterator;

use crate::{
    bst::Bst,
    node::{Dir, Link},
};

enum CameFrom {
    Parent,
    LeftChild,
    Here,
    RightChild,
}

/// An in-order iterator over the values of an [`AvlTree`](crate::AvlTree).
///
/// Values are yielded in strictly increasing order.
pub struct Iter<'tree, T> {
    tree: &'tree Bst<T>,

    front_cur: Link,
    front_from: CameFrom,

    len: usize,
}

impl<'tree, T> Iter<'tree, T> {
    pub(crate) fn new(tree: &'tree Bst<T>) -> Self {
        Iter {
            tree,

            front_cur: tree.root(),
            front_from: CameFrom::Parent,
            len: tree.len(),
        }
    }
}

impl<'tree, T> Iterator for Iter<'tree, T> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let tree = self.tree;
        let mut cur = self.front_cur?;

        loop {
            match self.front_from {
                CameFrom::Parent => {
                    // Upon entering a new subtree, find the minimum element.
                    cur = tree.min_in_subtree(cur);

                    // Once the minimum is found, its (empty) left subtree has been exhausted.
                    self.front_from = CameFrom::LeftChild;
                }

                CameFrom::LeftChild => {
                    // The left subtree has been exhausted, so this node is up next.
                    self.front_cur = Some(cur);
                    self.front_from = CameFrom::Here;
                    self.len -= 1;

                    return Some(tree.node(cur).value());
                }

                CameFrom::Here => {
                    // The current node was just yielded.
                    if let Some(right) = tree.node(cur).right() {
                        self.front_from = CameFrom::Parent;
                        cur = right;
                    } else {
                        // An empty right subtree is trivially exhausted.
                        self.front_from = CameFrom::RightChild;
                    }
                }

                CameFrom::RightChild => {
                    // The whole subtree at `cur` is done; ascend one level.
                    let parent = tree
                        .node(cur)
                        .parent()
                        .expect("ran out of ancestors before the last element");

                    self.front_from = match tree.which_child(parent, cur) {
                        Dir::Left => CameFrom::LeftChild,
                        Dir::Right => CameFrom::RightChild,
                    };

                    cur = parent;
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
