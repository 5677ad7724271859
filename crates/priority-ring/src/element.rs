use std::fmt;

use num_traits::{PrimInt, Unsigned};

mod sealed {
    pub trait Sealed {}
}

/// Payload scalar stored in a cell. Implemented for `u8`, `u16`, `u32` and `u64`.
pub trait Element:
    PrimInt + Unsigned + Default + fmt::Debug + fmt::Display + sealed::Sealed
{
    /// Width of the payload in bits.
    const BITS: u32;
}

macro_rules! element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const BITS: u32 = <$ty>::BITS;
            }
        )*
    };
}

element!(u8, u16, u32, u64);
