use std::{num::ParseIntError, str::FromStr};

use avl_tree::AvlTree;
use clap::Parser;

/// Applies a sequence of insertions and removals to an AVL tree, printing the in-order contents
/// after each step.
///
/// Set `RUST_LOG=avl_tree=trace` to see every rotation.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Print a Graphviz rendering of the final tree.
    #[arg(long)]
    dot: bool,

    /// Operations: `+N` or `N` inserts N, `-N` removes N.
    #[arg(allow_hyphen_values = true)]
    ops: Vec<Op>,
}

#[derive(Copy, Clone, Debug)]
enum Op {
    Insert(i64),
    Remove(i64),
}

impl FromStr for Op {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('-') {
            Some(value) => value.parse().map(Op::Remove),
            None => s.strip_prefix('+').unwrap_or(s).parse().map(Op::Insert),
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let mut tree: AvlTree<i64> = AvlTree::new();

    for op in args.ops {
        match op {
            Op::Insert(value) => {
                if let Err(err) = tree.insert(value) {
                    log::warn!("insert {value}: {err}");
                }
            }
            Op::Remove(value) => {
                if let Err(err) = tree.try_remove(&value) {
                    log::warn!("remove {value}: {err}");
                }
            }
        }

        tree.assert_invariants();
        println!("{:?} (height {})", tree.iter().collect::<Vec<_>>(), tree.height());
    }

    if args.dot {
        let mut out = String::new();
        tree.dotgraph("avl", &mut out)
            .expect("formatting into a String does not fail");
        println!("{out}");
    }
}
