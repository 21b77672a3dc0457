//! Model-based testing support: random operation sequences checked against [`BTreeSet`].
//!
//! Shared by the proptest suite and the `cargo fuzz` targets.

extern crate std;

use std::{collections::BTreeSet, prelude::v1::*};

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::AvlTree;

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    /// Picks an element already in the tree (by rank), so removals and lookups hit.
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Get(ItemValue),
    Remove(ItemValue),
    First,
    PopFirst,
    Last,
    PopLast,
}

impl Op {
    fn finalize(self, sorted: &[u32]) -> FinalOp {
        fn get_value(v: &[u32], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len()]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Get(item) => FinalOp::Get(get_value(sorted, item)),
            Op::Remove(item) => FinalOp::Remove(get_value(sorted, item)),
            Op::First => FinalOp::First,
            Op::PopFirst => FinalOp::PopFirst,
            Op::Last => FinalOp::Last,
            Op::PopLast => FinalOp::PopLast,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Get(u32),
    Remove(u32),
    First,
    PopFirst,
    Last,
    PopLast,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        value_strategy().prop_map(Op::Insert),
        value_strategy().prop_map(Op::Get),
        value_strategy().prop_map(Op::Remove),
        Just(Op::First),
        Just(Op::PopFirst),
        Just(Op::Last),
        Just(Op::PopLast),
    ]
}

/// Applies `ops` to both an [`AvlTree`] and a [`BTreeSet`], asserting identical results and
/// checking the tree's invariants after every step.
pub fn run_btree_equivalence(ops: Vec<Op>) {
    let mut sorted_values = Vec::with_capacity(ops.len());
    let mut btree = BTreeSet::new();
    let mut avl: AvlTree<u32> = AvlTree::new();

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_values);

        match final_op {
            FinalOp::Insert(value) => {
                let from_btree = btree.insert(value);
                let from_avl = avl.insert(value).is_ok();

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Get(value) => {
                let from_btree = btree.get(&value);
                let from_avl = avl.get(&value);

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Remove(value) => {
                let from_btree = btree.remove(&value).then_some(value);
                let from_avl = avl.remove(&value);

                assert_eq!(from_btree, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::First => {
                assert_eq!(btree.first(), avl.first(), "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopFirst => {
                assert_eq!(
                    btree.pop_first(),
                    avl.pop_first(),
                    "FinalOp #{op_id}: {final_op:?}"
                );
            }

            FinalOp::Last => {
                assert_eq!(btree.last(), avl.last(), "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopLast => {
                assert_eq!(
                    btree.pop_last(),
                    avl.pop_last(),
                    "FinalOp #{op_id}: {final_op:?}"
                );
            }
        }

        sorted_values.clear();
        sorted_values.extend(btree.iter().copied());

        avl.assert_invariants();
        assert_eq!(btree.len(), avl.len());
        assert!(btree.iter().eq(avl.iter()));
    }
}

/// Inserts `values` in the given order, then removes them in the order of `removals`, checking
/// invariants after every step.
///
/// `removals` holds indices into `values`; out-of-range indices wrap around, and values that were
/// already removed turn into no-op removals.
pub fn run_insert_remove(values: &[u32], removals: &[usize]) {
    let mut avl: AvlTree<u32> = AvlTree::new();
    let mut btree = BTreeSet::new();

    for &value in values {
        assert_eq!(avl.insert(value).is_ok(), btree.insert(value));
        avl.assert_invariants();
    }

    if values.is_empty() {
        return;
    }

    for &idx in removals {
        let value = values[idx % values.len()];
        assert_eq!(avl.remove(&value), btree.remove(&value).then_some(value));
        avl.assert_invariants();
        assert!(btree.iter().eq(avl.iter()));
    }
}
