use core::cmp;
use core::ops;

/// The integer type a `GrowArr` uses for its length, its capacity and for
/// indexing. Narrow types shrink the array header, e.g. `u32` on a 64-bit
/// target packs the length and capacity into a single word.
///
/// It's marked as unsafe since your type must be continuous and ordered
/// under common operations such as addition and shifting, like integers.
pub unsafe trait LengthType
where
    Self: Copy,
    Self: cmp::Ord,
    Self: ops::Add<Output = Self>,
    Self: ops::AddAssign,
    Self: ops::Shr<Output = Self>,
    Self: ops::Sub<Output = Self>,
    Self: ops::SubAssign,
    Self: Sized,
    Self: From<u8>,
    Self: TryFrom<usize>,
    usize: TryFrom<Self>,
{
    const MAX_VALUE: Self;
    const ONE_VALUE: Self;
    const ZERO_VALUE: Self;

    /// Only valid for values already known to fit a `usize`, such as a
    /// length or a capacity that has been allocated.
    fn as_usize(self) -> usize;
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_length_type {
    ($typ:ty) => {
        unsafe impl LengthType for $typ {
            const MAX_VALUE: Self = Self::MAX;
            const ONE_VALUE: Self = 1;
            const ZERO_VALUE: Self = 0;

            #[inline(always)]
            fn as_usize(self) -> usize {
                return self as usize;
            }

            #[inline]
            fn checked_add(self, rhs: Self) -> Option<Self> {
                return self.checked_add(rhs);
            }
        }
    };
}

impl_length_type!(usize);
impl_length_type!(u8);
impl_length_type!(u16);
impl_length_type!(u32);
impl_length_type!(u64);
impl_length_type!(u128);
