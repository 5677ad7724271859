use std::iter::FusedIterator;

use crate::Priority;

/// Highest number of priority levels an [`Activity`] can track.
pub const MAX_PRIORITIES: usize = 8;

/// One bit per priority level. Bit `p` is set while priority `p` holds at least one element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Activity(u8);

#[allow(clippy::cast_possible_truncation)]
impl Activity {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, priority: Priority) -> bool {
        priority < MAX_PRIORITIES as Priority && self.0 & (1 << priority) != 0
    }

    pub fn set(&mut self, priority: Priority) {
        debug_assert!(usize::from(priority) < MAX_PRIORITIES);
        self.0 |= 1 << priority;
    }

    pub fn clear(&mut self, priority: Priority) {
        debug_assert!(usize::from(priority) < MAX_PRIORITIES);
        self.0 &= !(1 << priority);
    }

    /// Number of active priorities.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn lowest(self) -> Option<Priority> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as Priority)
        }
    }

    #[must_use]
    pub const fn highest(self) -> Option<Priority> {
        if self.0 == 0 {
            None
        } else {
            Some((u8::BITS - 1 - self.0.leading_zeros()) as Priority)
        }
    }

    /// Lowest active priority that is `>= priority`.
    #[must_use]
    pub const fn at_or_above(self, priority: Priority) -> Option<Priority> {
        if priority >= MAX_PRIORITIES as Priority {
            return None;
        }
        Self(self.0 & (u8::MAX << priority)).lowest()
    }

    /// Lowest active priority that is strictly `> priority`.
    #[must_use]
    pub const fn next_above(self, priority: Priority) -> Option<Priority> {
        if priority >= MAX_PRIORITIES as Priority - 1 {
            return None;
        }
        self.at_or_above(priority + 1)
    }

    /// Active priorities in ascending order.
    #[must_use]
    pub const fn iter(self) -> ActivePriorities {
        ActivePriorities { remaining: self.0 }
    }
}

impl IntoIterator for Activity {
    type IntoIter = ActivePriorities;
    type Item = Priority;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone, Debug)]
pub struct ActivePriorities {
    remaining: u8,
}

impl Iterator for ActivePriorities {
    type Item = Priority;

    #[allow(clippy::cast_possible_truncation)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            None
        } else {
            let priority = self.remaining.trailing_zeros() as Priority;
            self.remaining &= self.remaining - 1;
            Some(priority)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for ActivePriorities {
    fn len(&self) -> usize {
        self.remaining.count_ones() as usize
    }
}

impl FusedIterator for ActivePriorities {}
