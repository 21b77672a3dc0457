#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<u32>, Vec<usize>)| {
    let (values, removals) = input;
    avl_tree::model::run_insert_remove(&values, &removals);
});
