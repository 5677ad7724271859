use priority_ring::{InsertError, Priority, PriorityRing, RetrieveError};
use proptest::prelude::*;

const LOW: Priority = 0;
const MID: Priority = 1;
const HIGH: Priority = 2;

/// Straightforward model of the ring: a flat list searched on every operation.
#[derive(Debug, Default)]
struct Model {
    capacity: usize,
    priorities: usize,
    // (priority, insertion sequence, value)
    items: Vec<(Priority, u64, u8)>,
    sequence: u64,
}

impl Model {
    fn new(capacity: usize, priorities: usize) -> Self {
        Self {
            capacity,
            priorities,
            ..Self::default()
        }
    }

    fn insert(&mut self, value: u8, priority: Priority) -> Result<(), InsertError> {
        if usize::from(priority) >= self.priorities {
            return Err(InsertError::InvalidPriority {
                priority,
                priority_count: self.priorities,
            });
        }

        if self.items.len() == self.capacity {
            let lowest = self.items.iter().map(|item| item.0).min().unwrap();
            if priority < lowest {
                return Err(InsertError::Rejected { priority, lowest });
            }
            let oldest = self
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.0 == lowest)
                .min_by_key(|(_, item)| item.1)
                .map(|(position, _)| position)
                .unwrap();
            self.items.remove(oldest);
        }

        self.items.push((priority, self.sequence, value));
        self.sequence += 1;
        Ok(())
    }

    fn retrieve(&mut self) -> Result<u8, RetrieveError> {
        let next = self
            .items
            .iter()
            .enumerate()
            .max_by_key(|(_, item)| (item.0, std::cmp::Reverse(item.1)))
            .map(|(position, _)| position)
            .ok_or(RetrieveError::Empty)?;
        Ok(self.items.remove(next).2)
    }

    fn contents(&self) -> Vec<(Priority, u8)> {
        let mut items = self.items.clone();
        items.sort_by_key(|item| (std::cmp::Reverse(item.0), item.1));
        items.into_iter().map(|(priority, _, value)| (priority, value)).collect()
    }

    fn reset(&mut self) {
        self.items.clear();
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, Priority),
    Retrieve,
    Reset,
}

fn ops(priorities: Priority, len: usize) -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        6 => (any::<u8>(), 0..=priorities).prop_map(|(value, priority)| Op::Insert(value, priority)),
        3 => Just(Op::Retrieve),
        1 => Just(Op::Reset),
    ];
    prop::collection::vec(op, 0..len)
}

fn compare<const CAPACITY: usize, const PRIORITIES: usize>(ops: &[Op]) {
    let mut ring = PriorityRing::<u8, CAPACITY, PRIORITIES>::new();
    let mut model = Model::new(CAPACITY, PRIORITIES);

    for op in ops {
        match *op {
            Op::Insert(value, priority) => {
                assert_eq!(ring.insert(value, priority), model.insert(value, priority), "{op:?}");
            }
            Op::Retrieve => assert_eq!(ring.retrieve(), model.retrieve()),
            Op::Reset => {
                ring.reset();
                model.reset();
            }
        }
        assert_eq!(ring.iter().collect::<Vec<_>>(), model.contents());
        assert_eq!(ring.len(), model.items.len());
        assert_eq!(ring.is_full(), model.items.len() == CAPACITY);
    }

    let mut drained = Vec::new();
    while let Ok(value) = ring.retrieve() {
        drained.push(value);
    }
    let expected: Vec<_> = model.contents().into_iter().map(|(_, value)| value).collect();
    assert_eq!(drained, expected);
    assert!(ring.is_empty());
}

fn drain<const CAPACITY: usize, const PRIORITIES: usize>(
    ring: &mut PriorityRing<u8, CAPACITY, PRIORITIES>,
) -> Vec<u8> {
    std::iter::from_fn(|| ring.retrieve().ok()).collect()
}

#[test]
fn mixed_priorities_drain_in_order() {
    let mut ring = PriorityRing::<u8, 4, 3>::new();
    ring.insert(42, LOW).unwrap();
    ring.insert(43, MID).unwrap();
    assert_eq!(drain(&mut ring), vec![43, 42]);
}

#[test]
fn same_priority_is_fifo() {
    for priority in [LOW, MID, HIGH] {
        let mut ring = PriorityRing::<u8, 4, 3>::new();
        for value in 1..=4 {
            ring.insert(value, priority).unwrap();
        }
        assert_eq!(drain(&mut ring), vec![1, 2, 3, 4]);
    }
}

#[test]
fn saturated_single_priority_overwrites_oldest() {
    let mut ring = PriorityRing::<u8, 4, 3>::new();
    for value in 42..46 {
        ring.insert(value, LOW).unwrap();
    }
    ring.insert(46, LOW).unwrap();
    assert_eq!(drain(&mut ring), vec![43, 44, 45, 46]);
}

#[test]
fn saturated_highest_priority_overwrites_oldest() {
    let mut ring = PriorityRing::<u8, 4, 3>::new();
    for value in 0..4 {
        ring.insert(value, HIGH).unwrap();
    }
    for value in 4..6 {
        ring.insert(value, HIGH).unwrap();
    }
    assert_eq!(drain(&mut ring), vec![2, 3, 4, 5]);
}

#[test]
fn high_priority_evicts_one_low() {
    let mut ring = PriorityRing::<u8, 4, 3>::new();
    for value in 20..24 {
        ring.insert(value, LOW).unwrap();
    }
    ring.insert(24, HIGH).unwrap();
    assert_eq!(drain(&mut ring), vec![24, 21, 22, 23]);
}

#[test]
fn low_priority_rejected_when_full_of_mid() {
    let mut ring = PriorityRing::<u8, 4, 3>::new();
    for value in 0..4 {
        ring.insert(value, MID).unwrap();
    }
    assert_eq!(
        ring.insert(99, LOW),
        Err(InsertError::Rejected {
            priority: LOW,
            lowest: MID
        })
    );
    assert_eq!(drain(&mut ring), vec![0, 1, 2, 3]);
}

#[test]
fn repeated_high_inserts_consume_low_run_oldest_first() {
    let mut ring = PriorityRing::<u8, 4, 3>::new();
    for value in 10..14 {
        ring.insert(value, LOW).unwrap();
    }
    ring.insert(20, HIGH).unwrap();
    ring.insert(21, MID).unwrap();
    ring.insert(22, HIGH).unwrap();
    assert_eq!(drain(&mut ring), vec![20, 22, 21, 13]);
}

#[test]
fn reset_after_any_sequence_empties() {
    let mut ring = PriorityRing::<u8, 4, 3>::new();
    for value in 0..11 {
        let _ = ring.insert(value, value % 3);
        if value % 4 == 0 {
            ring.retrieve().unwrap();
        }
    }
    ring.reset();
    ring.reset();
    assert!(ring.is_empty());
    assert_eq!(ring.retrieve(), Err(RetrieveError::Empty));
}

#[test]
fn round_trip_every_priority() {
    let mut ring = PriorityRing::<u8, 4, 3>::new();
    for priority in [LOW, MID, HIGH] {
        ring.reset();
        ring.insert(7, priority).unwrap();
        assert_eq!(ring.retrieve(), Ok(7));
        assert!(ring.is_empty());
    }
}

#[test]
fn wide_payloads() {
    let mut ring = PriorityRing::<u64, 3, 2>::new();
    ring.insert(u64::MAX, 0).unwrap();
    ring.insert(1 << 40, 1).unwrap();
    assert_eq!(ring.retrieve(), Ok(1 << 40));
    assert_eq!(ring.retrieve(), Ok(u64::MAX));
}

proptest! {
    #[test]
    fn matches_model_reference_config(ops in ops(3, 300)) {
        compare::<4, 3>(&ops);
    }

    #[test]
    fn matches_model_min_capacity(ops in ops(8, 300)) {
        compare::<3, 8>(&ops);
    }

    #[test]
    fn matches_model_single_priority(ops in ops(1, 300)) {
        compare::<6, 1>(&ops);
    }

    #[test]
    fn matches_model_medium(ops in ops(4, 500)) {
        compare::<13, 4>(&ops);
    }

    #[test]
    fn matches_model_max_capacity(ops in ops(8, 1000)) {
        compare::<256, 8>(&ops);
    }
}
