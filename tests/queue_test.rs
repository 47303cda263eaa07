/*!
 * Admission Queue Tests
 * Capacity, ordering and concurrency properties
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sim_kernel::scheduler::AdmissionQueue;
use sim_kernel::{Process, ProcessFactory};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
enum Op {
    Admit(u8),
    Select,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1u8..=5).prop_map(Op::Admit),
        1 => Just(Op::Select),
    ]
}

proptest! {
    #[test]
    fn prop_size_never_exceeds_capacity(
        capacity in 1usize..8,
        ops in prop::collection::vec(op_strategy(), 0..64),
    ) {
        let queue = AdmissionQueue::new(capacity);
        let mut next_id = 1u32;

        for op in ops {
            match op {
                Op::Admit(priority) => {
                    let was_full = queue.len() == capacity;
                    let before = queue.snapshot();
                    let admitted = queue.try_admit(Process::new(next_id, 1, 1, priority).unwrap());
                    next_id += 1;

                    prop_assert_eq!(admitted, !was_full);
                    if !admitted {
                        prop_assert_eq!(queue.snapshot(), before);
                    }
                }
                Op::Select => {
                    let before = queue.snapshot();
                    let selected = queue.select_highest_priority();
                    match before.iter().map(|p| p.priority()).max() {
                        None => prop_assert!(selected.is_none()),
                        Some(max) => {
                            let expected = before.iter().find(|p| p.priority() == max).copied();
                            prop_assert_eq!(selected, expected);
                            let selected = selected.unwrap();
                            prop_assert!(queue.snapshot().iter().all(|p| p.id() != selected.id()));
                        }
                    }
                }
            }
            prop_assert!(queue.len() <= capacity);
        }
    }

    #[test]
    fn prop_factory_ids_strictly_increasing(n in 1usize..200, seed in any::<u64>()) {
        let factory = ProcessFactory::seeded(seed);
        let ids: Vec<u32> = (0..n).map(|_| factory.create().unwrap().id()).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_priorities_3_5_5_2_pick_first_five() {
    let queue = AdmissionQueue::new(4);
    for (id, priority) in [(1, 3), (2, 5), (3, 5), (4, 2)] {
        assert!(queue.try_admit(Process::new(id, 1, 1, priority).unwrap()));
    }

    let selected = queue.select_highest_priority().unwrap();
    assert_eq!(selected.id(), 2);
    assert_eq!(selected.priority(), 5);

    let remaining: Vec<u32> = queue.snapshot().iter().map(|p| p.id()).collect();
    assert_eq!(remaining, vec![1, 3, 4]);
}

#[test]
fn test_concurrent_admit_and_select_respects_capacity() {
    let capacity = 5;
    let queue = Arc::new(AdmissionQueue::new(capacity));
    let factory = Arc::new(ProcessFactory::seeded(3));

    let producers: Vec<_> = (0..4)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let factory = Arc::clone(&factory);
            thread::spawn(move || {
                let mut admitted = 0;
                for _ in 0..500 {
                    if queue.try_admit(factory.create().unwrap()) {
                        admitted += 1;
                    }
                    assert!(queue.len() <= capacity);
                }
                admitted
            })
        })
        .collect();

    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            let mut selected = Vec::new();
            for _ in 0..2_000 {
                if let Some(p) = queue.select_highest_priority() {
                    selected.push(p.id());
                }
            }
            selected
        })
    };

    let admitted: usize = producers.into_iter().map(|h| h.join().unwrap()).sum();
    let mut selected = consumer.join().unwrap();
    let leftover = queue.len();

    assert_eq!(admitted, selected.len() + leftover);

    // Nothing is ever selected twice
    let total = selected.len();
    selected.sort_unstable();
    selected.dedup();
    assert_eq!(selected.len(), total);
}
