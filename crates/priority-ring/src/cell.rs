/// Handle to a cell. Capacity is capped at 256, so every cell is addressable by one byte.
pub type Index = u8;

/// Smallest supported capacity.
pub const MIN_CAPACITY: usize = 3;

/// Largest supported capacity.
pub const MAX_CAPACITY: usize = 256;

/// One storage slot: a payload and the index of the cell after it in the ring.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell<T> {
    pub data: T,
    pub next: Index,
}

#[allow(clippy::cast_possible_truncation)]
pub const fn to_index(position: usize) -> Index {
    debug_assert!(position < MAX_CAPACITY);
    position as Index
}
