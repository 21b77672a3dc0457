use alloc::{collections::VecDeque, string::String};
use core::fmt::{self, Write};

use crate::{AvlTree, NodeId};

impl<T> AvlTree<T>
where
    T: fmt::Display,
{
    /// Writes a Graphviz rendering of the tree to `w`.
    ///
    /// Nodes of equal depth share a rank and are labelled `value:height`. Missing children are
    /// drawn as points so left and right stay distinguishable.
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
    {
        let tree = self.as_bst();

        let root = match tree.root() {
            Some(r) => r,
            None => return write!(w, "digraph \"graph-{name}\" {{}}"),
        };

        enum Item {
            Node(NodeId),
            Missing(u32),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(root));

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        let mut missing = 0;
        let mut links = String::new();

        while !queue.is_empty() {
            write!(w, "{{rank=same; ")?;

            for _ in 0..queue.len() {
                let node = match queue.pop_front() {
                    Some(Item::Node(node)) => node,
                    Some(Item::Missing(id)) => {
                        write!(w, "\"graph{name}-missing{id}\" [shape=point]; ")?;
                        continue;
                    }
                    None => break,
                };

                let idx = node.index();
                let value = tree.node(node).value();
                let height = tree.node(node).height();
                write!(w, "\"graph{name}-{idx}\" [label=\"{value}:{height}\"]; ")?;

                for child in [tree.node(node).left(), tree.node(node).right()] {
                    match child {
                        Some(child) => {
                            queue.push_back(Item::Node(child));
                            writeln!(
                                links,
                                "\"graph{name}-{idx}\" -> \"graph{name}-{}\";",
                                child.index()
                            )?;
                        }
                        None => {
                            queue.push_back(Item::Missing(missing));
                            writeln!(
                                links,
                                "\"graph{name}-{idx}\" -> \"graph{name}-missing{missing}\";"
                            )?;
                            missing += 1;
                        }
                    }
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&links)?;

        w.write_str(" }\n}")
    }
}

#[cfg(test)]
mod tests {
    use crate::AvlTree;

    #[test]
    fn empty_graph() {
        let tree: AvlTree<u32> = AvlTree::new();
        let mut out = String::new();
        tree.dotgraph("empty", &mut out).unwrap();
        assert_eq!(out, "digraph \"graph-empty\" {}");
    }

    #[test]
    fn labels_carry_heights() {
        let tree: AvlTree<u32> = [10, 20, 30].into_iter().collect();
        let mut out = String::new();
        tree.dotgraph("t", &mut out).unwrap();

        assert!(out.starts_with("digraph \"graph-t\" {"));
        assert!(out.contains("[label=\"20:2\"]"));
        assert!(out.contains("[label=\"10:1\"]"));
        assert!(out.contains("[label=\"30:1\"]"));
        // Two leaves, four missing children.
        assert_eq!(out.matches("[shape=point]").count(), 4);
        assert!(out.ends_with(" }\n}"));
    }
}
