use std::iter::FusedIterator;

use crate::{Activity, Element, Index, Priority, PriorityRing};

/// Walks the stored cells in retrieval order without consuming them, tracking which priority
/// run each cell belongs to the same way retrieval does.
#[derive(Clone, Debug)]
pub(crate) struct Path<'a, T, const CAPACITY: usize, const PRIORITIES: usize> {
    ring: &'a PriorityRing<T, CAPACITY, PRIORITIES>,
    cursor: Index,
    pending: Activity,
}

impl<T: Element, const CAPACITY: usize, const PRIORITIES: usize> Iterator
    for Path<'_, T, CAPACITY, PRIORITIES>
{
    type Item = (Priority, Index);

    fn next(&mut self) -> Option<Self::Item> {
        let priority = self.pending.highest()?;
        let index = self.ring.next_of(self.cursor);

        if index == self.ring.head(priority) {
            self.pending.clear(priority);
        }
        self.cursor = index;

        Some((priority, index))
    }
}

impl<T: Element, const CAPACITY: usize, const PRIORITIES: usize> FusedIterator
    for Path<'_, T, CAPACITY, PRIORITIES>
{
}

/// Stored elements and their priorities in retrieval order. Created by [`PriorityRing::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a, T, const CAPACITY: usize, const PRIORITIES: usize> {
    path: Path<'a, T, CAPACITY, PRIORITIES>,
}

impl<'a, T: Element, const CAPACITY: usize, const PRIORITIES: usize>
    Iter<'a, T, CAPACITY, PRIORITIES>
{
    pub(crate) const fn new(ring: &'a PriorityRing<T, CAPACITY, PRIORITIES>) -> Self {
        Self {
            path: Path {
                ring,
                cursor: ring.tail,
                pending: ring.activity,
            },
        }
    }

    pub(crate) fn path(self) -> Path<'a, T, CAPACITY, PRIORITIES> {
        self.path
    }
}

impl<T: Element, const CAPACITY: usize, const PRIORITIES: usize> Iterator
    for Iter<'_, T, CAPACITY, PRIORITIES>
{
    type Item = (Priority, T);

    fn next(&mut self) -> Option<Self::Item> {
        let (priority, index) = self.path.next()?;
        Some((priority, self.path.ring.cells[usize::from(index)].data))
    }
}

impl<T: Element, const CAPACITY: usize, const PRIORITIES: usize> FusedIterator
    for Iter<'_, T, CAPACITY, PRIORITIES>
{
}
