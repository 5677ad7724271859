//! A fixed-capacity, priority-ordered circular buffer.
//!
//! All storage lives in one array of cells. Every cell carries a payload and the index of the
//! cell after it, so the array forms a single ring that is re-linked instead of shifted when a
//! higher priority has to jump the queue. No allocation happens after construction.
//!
//! Higher numbers are higher priorities: `PRIORITIES - 1` is retrieved first, `0` last.
//! Elements of equal priority come out in insertion order.
//!
//! ```
//! use priority_ring::PriorityRing;
//!
//! const LOW: u8 = 0;
//! const MID: u8 = 1;
//!
//! let mut ring = PriorityRing::<u8, 4, 3>::new();
//! ring.insert(42, LOW).unwrap();
//! ring.insert(43, MID).unwrap();
//!
//! assert_eq!(ring.retrieve(), Ok(43));
//! assert_eq!(ring.retrieve(), Ok(42));
//! assert!(ring.is_empty());
//! ```
//!
//! When the buffer is full, a new element evicts the oldest element of the lowest stored
//! priority, provided it is not itself of a lower priority:
//!
//! ```
//! use priority_ring::PriorityRing;
//!
//! let mut ring = PriorityRing::<u8, 4, 3>::new();
//! for value in 20..24 {
//!     ring.insert(value, 0).unwrap();
//! }
//! ring.insert(24, 2).unwrap();
//!
//! let drained: Vec<_> = std::iter::from_fn(|| ring.retrieve().ok()).collect();
//! assert_eq!(drained, [24, 21, 22, 23]);
//! ```
//!
//! Capacity and priority count are checked when the type is instantiated:
//!
//! ```compile_fail
//! use priority_ring::PriorityRing;
//!
//! // a ring needs at least three cells
//! let ring = PriorityRing::<u8, 2, 3>::new();
//! ```
//!
//! The buffer is meant for a single owner. Mutation goes through `&mut self`; sharing it across
//! threads requires an external lock around the whole value.

mod activity;
mod cell;
mod dump;
mod element;
mod error;
mod insert;
mod iter;
mod link;

pub use activity::{ActivePriorities, Activity, MAX_PRIORITIES};
pub use cell::{Index, MAX_CAPACITY, MIN_CAPACITY};
pub use dump::Dump;
pub use element::Element;
pub use error::{InsertError, RemapError, RetrieveError};
pub use iter::Iter;
use cell::{Cell, to_index};
use tracing::trace;

pub type Priority = u8;

/// Capacity of the reference configuration.
pub const DEFAULT_CAPACITY: usize = 4;

/// Number of priority levels in the reference configuration.
pub const DEFAULT_PRIORITIES: usize = 3;

#[derive(Clone, Debug)]
pub struct PriorityRing<
    T,
    const CAPACITY: usize = DEFAULT_CAPACITY,
    const PRIORITIES: usize = DEFAULT_PRIORITIES,
> {
    cells: [Cell<T>; CAPACITY],
    /// Last retrieved cell. The next element to retrieve follows it.
    tail: Index,
    /// Last written cell of each priority. Only meaningful while the priority is active.
    heads: [Index; PRIORITIES],
    activity: Activity,
}

impl<T: Element, const CAPACITY: usize, const PRIORITIES: usize> Default
    for PriorityRing<T, CAPACITY, PRIORITIES>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element, const CAPACITY: usize, const PRIORITIES: usize>
    PriorityRing<T, CAPACITY, PRIORITIES>
{
    /// Creates an empty buffer.
    ///
    /// Fails to compile unless `3 <= CAPACITY <= 256` and `1 <= PRIORITIES <= 8`.
    #[must_use]
    #[allow(clippy::manual_range_contains)]
    pub fn new() -> Self {
        const {
            assert!(
                CAPACITY >= MIN_CAPACITY && CAPACITY <= MAX_CAPACITY,
                "capacity must be between 3 and 256 cells"
            );
            assert!(
                PRIORITIES >= 1 && PRIORITIES <= MAX_PRIORITIES,
                "priority count must be between 1 and 8"
            );
        }

        let mut ring = Self {
            cells: [Cell::default(); CAPACITY],
            tail: 0,
            heads: [0; PRIORITIES],
            activity: Activity::new(),
        };
        ring.reset();
        ring
    }

    /// Drops every element and restores the initial linking `i -> i + 1`.
    pub fn reset(&mut self) {
        for (position, cell) in self.cells.iter_mut().enumerate() {
            cell.data = T::zero();
            cell.next = to_index((position + 1) % CAPACITY);
        }

        let last = to_index(CAPACITY - 1);
        self.tail = last;
        self.heads = [last; PRIORITIES];
        self.activity = Activity::new();
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.activity.is_empty()
    }

    /// A full buffer has some active priority whose last written cell is the tail, i.e. its run
    /// wrapped all the way around.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.activity
            .iter()
            .any(|priority| self.head(priority) == self.tail)
    }

    /// The configured capacity. This is not the number of stored elements, see [`Self::len`].
    #[must_use]
    pub const fn size(&self) -> usize {
        CAPACITY
    }

    #[must_use]
    pub const fn priority_count(&self) -> usize {
        PRIORITIES
    }

    /// Width of the payload in bits.
    #[must_use]
    pub const fn element_bits(&self) -> u32 {
        T::BITS
    }

    /// Number of stored elements. Walks the ring, so this is `O(len)`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn insert(&mut self, value: T, priority: Priority) -> Result<(), InsertError> {
        let index = self.claim(priority)?;
        self.cells[usize::from(index)].data = value;
        trace!(%value, priority, index, "inserted");
        Ok(())
    }

    /// Reserves a cell for an element of `priority` and returns its index, leaving the payload
    /// untouched. Meant for callers that keep the data in an array of their own, indexed the
    /// same way as the ring.
    pub fn insert_index(&mut self, priority: Priority) -> Result<Index, InsertError> {
        self.claim(priority)
    }

    pub fn retrieve(&mut self) -> Result<T, RetrieveError> {
        let index = self.retrieve_index()?;
        let value = self.cells[usize::from(index)].data;
        trace!(%value, index, "retrieved");
        Ok(value)
    }

    /// Releases the next cell in retrieval order and returns its index.
    pub fn retrieve_index(&mut self) -> Result<Index, RetrieveError> {
        let highest = self.activity.highest().ok_or(RetrieveError::Empty)?;
        let index = self.next_of_tail();

        if index == self.head(highest) {
            self.activity.clear(highest);
        }
        self.tail = index;

        Ok(index)
    }

    /// The element [`Self::retrieve`] would return next.
    #[must_use]
    pub fn peek(&self) -> Option<T> {
        (!self.is_empty()).then(|| self.cells[usize::from(self.next_of_tail())].data)
    }

    /// Stored elements with their priorities, in retrieval order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, CAPACITY, PRIORITIES> {
        Iter::new(self)
    }

    #[must_use]
    pub const fn activity(&self) -> Activity {
        self.activity
    }

    #[must_use]
    pub const fn is_active(&self, priority: Priority) -> bool {
        self.activity.contains(priority)
    }

    #[must_use]
    pub const fn lowest_priority(&self) -> Option<Priority> {
        self.activity.lowest()
    }

    #[must_use]
    pub const fn highest_priority(&self) -> Option<Priority> {
        self.activity.highest()
    }

    #[must_use]
    pub const fn active_priorities(&self) -> ActivePriorities {
        self.activity.iter()
    }

    /// Diagnostic view of the internal state, see [`Dump`].
    pub const fn dump(&self) -> Dump<'_, T, CAPACITY, PRIORITIES> {
        Dump::new(self)
    }
}

impl<'a, T: Element, const CAPACITY: usize, const PRIORITIES: usize> IntoIterator
    for &'a PriorityRing<T, CAPACITY, PRIORITIES>
{
    type IntoIter = Iter<'a, T, CAPACITY, PRIORITIES>;
    type Item = (Priority, T);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
