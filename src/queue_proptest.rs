#![cfg(test)]

// Property tests for QueueCore kept inside the crate so they can observe
// capacity, which the policy invariants below are about.

use crate::queue::QueueCore;
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
enum Op {
    Enqueue(i32),
    Dequeue,
    Peek,
    Contains(i32),
    Clear,
}

fn arb_ops() -> impl Strategy<Value = (usize, Vec<Op>)> {
    let op = prop_oneof![
        4 => any::<i32>().prop_map(Op::Enqueue),
        3 => Just(Op::Dequeue),
        1 => Just(Op::Peek),
        1 => (0i32..8).prop_map(Op::Contains),
        1 => Just(Op::Clear),
    ];
    (1usize..=6, proptest::collection::vec(op, 1..200))
}

// Property: state-machine equivalence against VecDeque, plus the capacity
// policy invariants after every operation:
// - FIFO parity: dequeue/peek/contains/len agree with the model.
// - capacity >= min at all times, and capacity is min * 2^k.
// - count <= capacity (the live region fits).
// - occupancy stays above a quarter whenever capacity could still shrink,
//   i.e. the shrink check never leaves an immediately-shrinkable state.
proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]
    #[test]
    fn prop_queue_matches_model((min, ops) in arb_ops()) {
        let mut sut = QueueCore::new(min);
        let mut model: VecDeque<i32> = VecDeque::new();

        for op in ops {
            match op {
                Op::Enqueue(v) => {
                    sut.enqueue(v);
                    model.push_back(v);
                }
                Op::Dequeue => {
                    if let Some(expect) = model.pop_front() {
                        prop_assert_eq!(sut.dequeue(), expect);
                    }
                }
                Op::Peek => {
                    if let Some(expect) = model.front() {
                        prop_assert_eq!(sut.peek(), expect);
                    }
                }
                Op::Contains(v) => {
                    prop_assert_eq!(sut.contains(&v), model.contains(&v));
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), min);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());

            let cap = sut.capacity();
            prop_assert!(cap >= min, "capacity below minimum");
            prop_assert!(sut.len() <= cap);
            // cap must be min * 2^k
            prop_assert!(cap % min == 0 && (cap / min).is_power_of_two());
            // The shrink check ran after the last mutation, so either the
            // policy refuses (floor) or occupancy is above one half.
            if cap / 2 >= min {
                prop_assert!(sut.len() > cap / 2 || cap == min);
            }
        }

        // Drain parity to the end.
        while let Some(expect) = model.pop_front() {
            prop_assert_eq!(sut.dequeue(), expect);
        }
        prop_assert!(sut.is_empty());
    }
}
