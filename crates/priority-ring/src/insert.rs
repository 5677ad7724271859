//! Insert orchestration. Each path first settles where the new element lives and re-links the
//! ring, and only then updates heads, tail and activity; the payload is written by the caller.

use tracing::{debug, error, trace};

use crate::{Element, Index, InsertError, Priority, PriorityRing};

impl<T: Element, const CAPACITY: usize, const PRIORITIES: usize>
    PriorityRing<T, CAPACITY, PRIORITIES>
{
    pub(crate) fn validate_priority(priority: Priority) -> Result<(), InsertError> {
        if usize::from(priority) < PRIORITIES {
            Ok(())
        } else {
            Err(InsertError::InvalidPriority {
                priority,
                priority_count: PRIORITIES,
            })
        }
    }

    /// Reserves the cell a new element of `priority` goes into and returns its index.
    pub(crate) fn claim(&mut self, priority: Priority) -> Result<Index, InsertError> {
        Self::validate_priority(priority)?;

        let Some(lowest) = self.activity.lowest() else {
            return Ok(self.claim_empty(priority));
        };

        if self.is_full() {
            self.claim_full(priority, lowest)
        } else {
            self.claim_not_full(priority, lowest)
        }
    }

    fn claim_empty(&mut self, priority: Priority) -> Index {
        let index = self.next_of_tail();
        self.set_head(priority, index);
        self.activity.set(priority);
        trace!(index, priority, "claimed cell in empty buffer");
        index
    }

    fn claim_not_full(&mut self, priority: Priority, lowest: Priority) -> Result<Index, InsertError> {
        let free = self.next_of_head(lowest);

        if priority > lowest {
            let insertion_point = self.insertion_point(priority);
            let bridge_point = self.bridge_point_not_full(lowest);
            self.splice(insertion_point, bridge_point, free)?;

            // the tail cell was the last free one; the ring now closes at the bridge
            if self.tail == free {
                self.tail = bridge_point;
            }
            debug!(index = free, priority, insertion_point, "moved free cell ahead of lower priorities");
        } else {
            trace!(index = free, priority, "appended after lowest run");
        }

        self.set_head(priority, free);
        self.activity.set(priority);
        Ok(free)
    }

    fn claim_full(&mut self, priority: Priority, lowest: Priority) -> Result<Index, InsertError> {
        if priority < lowest {
            debug!(priority, lowest, "buffer full, rejecting lower priority");
            return Err(InsertError::Rejected { priority, lowest });
        }

        if self.activity.count() == 1 {
            return Ok(self.overwrite_single_priority(priority, lowest));
        }

        let victim = self.lowest_priority_oldest(lowest);
        let insertion_point = self.insertion_point(priority);
        let bridge_point = self.bridge_point_full(lowest);
        self.splice(insertion_point, bridge_point, victim)?;

        if priority != lowest && victim == self.head(lowest) {
            self.activity.clear(lowest);
        }
        self.set_head(priority, victim);
        self.activity.set(priority);

        if let Some(lowest) = self.activity.lowest() {
            self.tail = self.head(lowest);
        }

        debug!(index = victim, priority, evicted_priority = lowest, "overwrote oldest element of lowest priority");
        Ok(victim)
    }

    /// A full buffer holding one priority: the next cell to be retrieved is the oldest
    /// element, so it is reused in place.
    fn overwrite_single_priority(&mut self, priority: Priority, lowest: Priority) -> Index {
        let index = self.next_of_tail();
        self.set_head(priority, index);

        if priority == lowest {
            self.tail = index;
        } else {
            self.activity.set(priority);
        }

        debug!(index, priority, evicted_priority = lowest, "overwrote oldest element in place");
        index
    }

    fn splice(
        &mut self,
        insertion_point: Index,
        bridge_point: Index,
        target: Index,
    ) -> Result<(), InsertError> {
        let result = self.remap(insertion_point, bridge_point, target);
        if let Err(error) = &result {
            error!(%error, insertion_point, bridge_point, target, "remap failed");
        }
        debug_assert!(
            result.is_ok(),
            "remap({insertion_point}, {bridge_point}, {target}) failed: {result:?}"
        );
        result.map_err(InsertError::from)
    }
}

#[cfg(test)]
mod tests {
    use crate::{InsertError, PriorityRing};

    const LOW: u8 = 0;
    const MID: u8 = 1;
    const HIGH: u8 = 2;

    type Ring = PriorityRing<u8, 4, 3>;

    fn drain(ring: &mut Ring) -> Vec<u8> {
        std::iter::from_fn(|| ring.retrieve().ok()).collect()
    }

    #[test]
    fn test_validate_priority() {
        for priority in 0..3 {
            assert!(Ring::validate_priority(priority).is_ok());
        }
        assert_eq!(
            Ring::validate_priority(3),
            Err(InsertError::InvalidPriority {
                priority: 3,
                priority_count: 3
            })
        );
    }

    #[test]
    fn test_claim_empty_uses_cell_after_tail() {
        let mut ring = Ring::new();
        assert_eq!(ring.claim(MID), Ok(0));
        assert_eq!(ring.head(MID), 0);
        assert!(ring.is_active(MID));
    }

    #[test]
    fn test_higher_priority_takes_last_free_tail_cell() {
        let mut ring = Ring::new();
        ring.insert(1, LOW).unwrap();
        ring.insert(2, LOW).unwrap();
        ring.insert(3, LOW).unwrap();

        // only the tail cell is left
        assert_eq!(ring.first_free(), Some(ring.tail));
        ring.insert(9, HIGH).unwrap();

        assert!(ring.is_full());
        assert_eq!(drain(&mut ring), vec![9, 1, 2, 3]);
    }

    #[test]
    fn test_middle_priority_takes_last_free_tail_cell() {
        let mut ring = Ring::new();
        ring.insert(1, HIGH).unwrap();
        ring.insert(2, LOW).unwrap();
        ring.insert(3, LOW).unwrap();
        ring.insert(5, MID).unwrap();

        assert!(ring.is_full());
        assert_eq!(drain(&mut ring), vec![1, 5, 2, 3]);
    }

    #[test]
    fn test_full_single_priority_same_priority_advances_tail() {
        let mut ring = Ring::new();
        for value in 42..46 {
            ring.insert(value, LOW).unwrap();
        }
        let tail = ring.tail;

        ring.insert(46, LOW).unwrap();
        assert_ne!(ring.tail, tail);
        assert!(ring.is_full());
        assert_eq!(drain(&mut ring), vec![43, 44, 45, 46]);
    }

    #[test]
    fn test_full_single_priority_higher_keeps_tail() {
        let mut ring = Ring::new();
        for value in 20..24 {
            ring.insert(value, LOW).unwrap();
        }
        let tail = ring.tail;

        ring.insert(24, HIGH).unwrap();
        assert_eq!(ring.tail, tail);
        assert!(ring.is_active(LOW));
        assert!(ring.is_active(HIGH));
        assert_eq!(drain(&mut ring), vec![24, 21, 22, 23]);
    }

    #[test]
    fn test_full_evicts_sole_lowest_element() {
        let mut ring = Ring::new();
        ring.insert(1, MID).unwrap();
        ring.insert(2, MID).unwrap();
        ring.insert(3, MID).unwrap();
        ring.insert(4, LOW).unwrap();
        assert!(ring.is_full());

        ring.insert(5, HIGH).unwrap();
        assert!(!ring.is_active(LOW));
        assert!(ring.is_full());
        assert_eq!(drain(&mut ring), vec![5, 1, 2, 3]);
    }

    #[test]
    fn test_full_evicts_into_existing_higher_run() {
        let mut ring = Ring::new();
        ring.insert(1, HIGH).unwrap();
        ring.insert(2, MID).unwrap();
        ring.insert(3, MID).unwrap();
        ring.insert(4, LOW).unwrap();

        ring.insert(5, HIGH).unwrap();
        assert!(!ring.is_active(LOW));
        assert_eq!(drain(&mut ring), vec![1, 5, 2, 3]);
    }

    #[test]
    fn test_full_same_as_lowest_with_several_priorities() {
        let mut ring = Ring::new();
        ring.insert(1, HIGH).unwrap();
        ring.insert(2, LOW).unwrap();
        ring.insert(3, LOW).unwrap();
        ring.insert(4, LOW).unwrap();

        ring.insert(5, LOW).unwrap();
        assert!(ring.is_full());
        assert_eq!(drain(&mut ring), vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_full_between_priorities() {
        let mut ring = Ring::new();
        ring.insert(1, HIGH).unwrap();
        ring.insert(2, LOW).unwrap();
        ring.insert(3, LOW).unwrap();
        ring.insert(4, LOW).unwrap();

        ring.insert(5, MID).unwrap();
        assert_eq!(drain(&mut ring), vec![1, 5, 3, 4]);
    }

    #[test]
    fn test_full_rejects_lower_priority_without_change() {
        let mut ring = Ring::new();
        for value in 0..4 {
            ring.insert(value, MID).unwrap();
        }
        let snapshot = ring.clone();

        assert_eq!(
            ring.insert(99, LOW),
            Err(InsertError::Rejected {
                priority: LOW,
                lowest: MID
            })
        );
        assert_eq!(ring.cells, snapshot.cells);
        assert_eq!(ring.tail, snapshot.tail);
        assert_eq!(ring.heads, snapshot.heads);
        assert_eq!(ring.activity, snapshot.activity);
        assert_eq!(drain(&mut ring), vec![0, 1, 2, 3]);
    }
}
