//! Index and link arithmetic: reading and rewiring `next` links, and locating the cells a
//! reprioritisation has to splice between.

use crate::{Element, Index, Priority, PriorityRing, RemapError};

impl<T: Element, const CAPACITY: usize, const PRIORITIES: usize>
    PriorityRing<T, CAPACITY, PRIORITIES>
{
    pub(crate) fn check_index(index: Index) -> Result<(), RemapError> {
        if usize::from(index) < CAPACITY {
            Ok(())
        } else {
            Err(RemapError::OutOfBounds {
                index,
                capacity: CAPACITY,
            })
        }
    }

    pub(crate) fn next_of(&self, index: Index) -> Index {
        self.cells[usize::from(index)].next
    }

    fn link(&mut self, from: Index, to: Index) {
        self.cells[usize::from(from)].next = to;
    }

    pub(crate) fn head(&self, priority: Priority) -> Index {
        self.heads[usize::from(priority)]
    }

    pub(crate) fn set_head(&mut self, priority: Priority, index: Index) {
        self.heads[usize::from(priority)] = index;
    }

    /// The next cell to be retrieved.
    pub(crate) fn next_of_tail(&self) -> Index {
        self.next_of(self.tail)
    }

    /// The next cell to be written for `priority` if it were appended in place.
    pub(crate) fn next_of_head(&self, priority: Priority) -> Index {
        self.next_of(self.head(priority))
    }

    /// First cell holding no live data, `None` if the buffer is full.
    pub(crate) fn first_free(&self) -> Option<Index> {
        match self.activity.lowest() {
            None => Some(self.next_of_tail()),
            Some(_) if self.is_full() => None,
            Some(lowest) => Some(self.next_of_head(lowest)),
        }
    }

    /// Moves `target` so that it directly follows `before_a`.
    ///
    /// `before_b` must be the cell currently linked to `target`; it inherits `target`'s old
    /// successor, closing the gap `target` leaves behind:
    ///
    /// ```text
    /// after_a      = before_a.next
    /// before_a.next = target
    /// before_b.next = target.next
    /// target.next   = after_a
    /// ```
    ///
    /// Nothing is written when `target` already follows `before_a`. All indices are checked
    /// before the first write, so an error leaves the ring untouched.
    pub(crate) fn remap(
        &mut self,
        before_a: Index,
        before_b: Index,
        target: Index,
    ) -> Result<(), RemapError> {
        Self::check_index(before_a)?;
        Self::check_index(before_b)?;
        Self::check_index(target)?;

        if self.next_of(before_b) != target {
            return Err(RemapError::NotLinked {
                before: before_b,
                target,
            });
        }

        let after_a = self.next_of(before_a);
        if after_a == target || before_a == target {
            return Ok(());
        }

        let after_target = self.next_of(target);
        self.link(before_a, target);
        self.link(before_b, after_target);
        self.link(target, after_a);

        Ok(())
    }

    /// Cell after which an element of `priority` must be placed to keep descending order:
    /// the head of the lowest active priority that is not below `priority`, or the tail when
    /// `priority` outranks everything stored.
    pub(crate) fn insertion_point(&self, priority: Priority) -> Index {
        self.activity
            .at_or_above(priority)
            .map_or(self.tail, |priority| self.head(priority))
    }

    /// Predecessor of the first free cell in a buffer that is neither empty nor full.
    pub(crate) fn bridge_point_not_full(&self, lowest: Priority) -> Index {
        self.head(lowest)
    }

    /// Predecessor of the oldest element of the lowest priority in a full buffer.
    pub(crate) fn bridge_point_full(&self, lowest: Priority) -> Index {
        self.activity
            .next_above(lowest)
            .map_or(self.tail, |priority| self.head(priority))
    }

    /// The oldest element of the lowest active priority, the one a full buffer evicts.
    pub(crate) fn lowest_priority_oldest(&self, lowest: Priority) -> Index {
        self.next_of(self.bridge_point_full(lowest))
    }
}
