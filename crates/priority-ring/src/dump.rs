use std::fmt;

use crate::{Element, PriorityRing, cell::to_index};

/// Human-readable snapshot of a ring's internals: the retrieval path, the raw cell arrays,
/// the heads and tail, and the activity flags.
///
/// ```text
/// buffer:
///  path: 24 -> 21 -> 22 -> 23
///  data: 24, 21, 22, 23
///  next: 1, 2, 3, 0
///  head(0): 3, head(1): 3, head(2): 0, tail: 3
///  active(0): 1, active(1): 0, active(2): 1, empty: 0
/// ```
///
/// Only meant for debugging; nothing in the ring depends on it.
#[must_use]
pub struct Dump<'a, T, const CAPACITY: usize, const PRIORITIES: usize> {
    ring: &'a PriorityRing<T, CAPACITY, PRIORITIES>,
}

impl<'a, T, const CAPACITY: usize, const PRIORITIES: usize> Dump<'a, T, CAPACITY, PRIORITIES> {
    pub(crate) const fn new(ring: &'a PriorityRing<T, CAPACITY, PRIORITIES>) -> Self {
        Self { ring }
    }
}

impl<T: Element, const CAPACITY: usize, const PRIORITIES: usize> fmt::Display
    for Dump<'_, T, CAPACITY, PRIORITIES>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.ring;

        writeln!(f, "buffer:")?;

        write!(f, " path: ")?;
        for (position, (_, index)) in ring.iter().path().enumerate() {
            if position > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", ring.cells[usize::from(index)].data)?;
        }
        writeln!(f)?;

        write!(f, " data: ")?;
        for (position, cell) in ring.cells.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell.data)?;
        }
        writeln!(f)?;

        write!(f, " next: ")?;
        for (position, cell) in ring.cells.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell.next)?;
        }
        writeln!(f)?;

        write!(f, " ")?;
        for priority in 0..PRIORITIES {
            write!(f, "head({priority}): {}, ", ring.heads[priority])?;
        }
        writeln!(f, "tail: {}", ring.tail)?;

        write!(f, " ")?;
        for priority in 0..PRIORITIES {
            let active = ring.is_active(to_index(priority));
            write!(f, "active({priority}): {}, ", u8::from(active))?;
        }
        writeln!(f, "empty: {}", u8::from(ring.is_empty()))
    }
}

impl<T: Element, const CAPACITY: usize, const PRIORITIES: usize> fmt::Debug
    for Dump<'_, T, CAPACITY, PRIORITIES>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
