use core::fmt;
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ops;
use core::ptr;
use core::slice;

use super::inner::Inner;
use crate::alloc::ArrAllocator;
#[cfg(feature = "std_alloc")]
use crate::alloc::Global;
use crate::errors::ErrorReason;
use crate::errors::GrowArrErr;
use crate::errors::GrowArrResult;
use crate::len_type::LengthType;

/// A contiguous growable array of `T`, allocated through `A`, whose length
/// and capacity are stored as `L`.
///
/// Elements are appended one at a time with [`push`](Self::push), which
/// grows the storage by half again plus one, or in bulk with
/// [`get_space`](Self::get_space), which grows to exactly the requested
/// length and hands back the new slots to be filled in place.
///
/// Every operation that may reallocate borrows the array mutably, so no
/// slice or element reference can outlive a relocation of the storage.
pub struct GrowArr<T, A: ArrAllocator, L: LengthType = u32>
where
    usize: TryFrom<L>,
{
    inner: Inner<A, L>,
    _ph:   PhantomData<T>,
}

impl<T, A: ArrAllocator, L: LengthType> GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    const SIZE: usize = size_of::<T>();

    /// Creates an empty array. Nothing is allocated until it first grows.
    pub const fn new_in(alloc: A) -> Self {
        return Self {
            inner: Inner::new_in::<T>(alloc),
            _ph:   PhantomData,
        };
    }

    /// Creates an empty array whose storage already holds `capacity`
    /// elements.
    pub fn with_capacity_in(alloc: A, capacity: L) -> GrowArrResult<Self> {
        let mut arr = Self::new_in(alloc);
        arr.resize(capacity)?;
        return Ok(arr);
    }

    #[inline]
    pub const fn len(&self) -> L {
        return self.inner.length;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.inner.length == L::ZERO_VALUE;
    }

    /// The number of elements the current storage holds. Zero for an array
    /// that never grew, `L::MAX_VALUE` for zero sized `T`.
    #[inline]
    pub const fn capacity(&self) -> L {
        return self.inner.capacity(Self::SIZE);
    }

    #[inline]
    pub const fn allocator(&self) -> &A {
        return self.inner.allocator();
    }

    /// Returns true if `n` more elements fit without reallocating.
    #[inline]
    pub fn has_space(&self, n: L) -> bool {
        return self.capacity() - self.len() >= n;
    }

    /// Reallocates the storage to hold exactly `capacity` elements.
    ///
    /// Elements past `capacity` are dropped and a `capacity` of zero frees
    /// the storage entirely. Nothing is reallocated when the capacity is
    /// already `capacity`.
    ///
    /// # Errors
    /// On failure the array is left untouched.
    pub fn resize(&mut self, capacity: L) -> GrowArrResult<()> {
        return self.inner.resize::<T>(capacity);
    }

    /// Makes room for exactly `n` more elements, without touching the
    /// length. Does nothing when they already fit.
    pub fn reserve_exact(&mut self, n: L) -> GrowArrResult<()> {
        let Some(total) = self.len().checked_add(n) else {
            return Err(GrowArrErr::new(ErrorReason::CapacityOverflow));
        };
        if total <= self.capacity() {
            return Ok(());
        }
        return self.resize(total);
    }

    /// Trims the storage to the current length.
    ///
    /// Zero sized `T` never holds storage, so `capacity()` stays `L::MAX_VALUE`.
    pub fn shrink_to_fit(&mut self) -> GrowArrResult<()> {
        return self.resize(self.len());
    }

    /// Drops every element and frees the storage. Releasing an array that
    /// holds no storage does nothing.
    pub fn release(&mut self) {
        self.inner.release::<T>();
    }

    /// Grows the storage so `n` more elements fit, returning the index the
    /// first of them goes to. Grows to exactly `len + n`, with no slack.
    fn make_space(&mut self, n: L) -> GrowArrResult<usize> {
        let len = self.len();
        let Some(total) = len.checked_add(n) else {
            return Err(GrowArrErr::new(ErrorReason::CapacityOverflow));
        };
        if !self.has_space(n) {
            self.resize(total)?;
        }
        return Ok(len.as_usize());
    }

    /// Appends `n` default elements and returns them, so the caller can fill
    /// them in place.
    ///
    /// The storage grows to exactly the new length if the elements do not
    /// fit, unlike [`push`](Self::push) no slack is added.
    ///
    /// The returned slice is only valid until the array is touched again.
    pub fn get_space(&mut self, n: L) -> GrowArrResult<&mut [T]>
    where
        T: Default,
    {
        return self.get_space_with(n, T::default);
    }

    /// Same as [`get_space`](Self::get_space) but the new elements are
    /// produced by `f`.
    pub fn get_space_with<F>(&mut self, n: L, mut f: F) -> GrowArrResult<&mut [T]>
    where
        F: FnMut() -> T,
    {
        let start = self.make_space(n)?;
        let count = n.as_usize();
        let base = unsafe { self.as_mut_ptr().add(start) };

        for i in 0..count {
            unsafe { ptr::write(base.add(i), f()) };
            // Bump one at a time so a panic in `f` never exposes an
            // uninitialized slot.
            self.inner.length += L::ONE_VALUE;
        }

        return Ok(unsafe { slice::from_raw_parts_mut(base, count) });
    }

    /// Same as [`get_space`](Self::get_space) but the new slots are left
    /// uninitialized. The length includes them as soon as this returns.
    ///
    /// # Safety
    /// Every returned slot must be written before the array is read,
    /// grown, truncated, released or dropped.
    pub unsafe fn get_space_uninit(&mut self, n: L) -> GrowArrResult<&mut [MaybeUninit<T>]> {
        let start = self.make_space(n)?;
        let count = n.as_usize();
        self.inner.length += n;

        let base = unsafe { self.as_mut_ptr().add(start) };
        return Ok(unsafe { slice::from_raw_parts_mut(base.cast::<MaybeUninit<T>>(), count) });
    }

    /// Appends clones of every element of `items`, growing exactly like
    /// [`get_space`](Self::get_space).
    pub fn extend_from_slice(&mut self, items: &[T]) -> GrowArrResult<()>
    where
        T: Clone,
    {
        let Ok(n) = L::try_from(items.len()) else {
            return Err(GrowArrErr::new(ErrorReason::CapacityOverflow));
        };
        let start = self.make_space(n)?;
        let base = unsafe { self.as_mut_ptr().add(start) };

        for (i, item) in items.iter().enumerate() {
            unsafe { ptr::write(base.add(i), item.clone()) };
            self.inner.length += L::ONE_VALUE;
        }
        return Ok(());
    }

    /// The capacity `push` grows to once the storage is full: half again
    /// plus one, clamped to what `L` can count.
    fn grown_capacity(len: L) -> GrowArrResult<L> {
        if len == L::MAX_VALUE {
            return Err(GrowArrErr::new(ErrorReason::CapacityOverflow));
        }
        let grown = len
            .checked_add(len >> L::ONE_VALUE)
            .and_then(|c| c.checked_add(L::ONE_VALUE));
        return Ok(grown.unwrap_or(L::MAX_VALUE));
    }

    /// Appends `item`.
    ///
    /// When the storage is full it grows to `len * 3 / 2 + 1`, so a run of
    /// pushes is amortized constant time.
    pub fn push(&mut self, item: T) -> GrowArrResult<()> {
        let len = self.len();

        if len >= self.capacity() {
            self.resize(Self::grown_capacity(len)?)?;
        }

        let loc = unsafe { self.as_mut_ptr().add(len.as_usize()) };
        unsafe { ptr::write(loc, item) };
        self.inner.length += L::ONE_VALUE;

        return Ok(());
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.inner.length -= L::ONE_VALUE;
        let ret = unsafe { ptr::read(self.as_ptr().add(self.len().as_usize())) };
        return Some(ret);
    }

    /// Drops the elements past `len`. The capacity is unchanged.
    pub fn truncate(&mut self, len: L) {
        let old = self.len();
        if len >= old {
            return;
        }
        self.inner.length = len;
        let tail = ptr::slice_from_raw_parts_mut(
            unsafe { self.as_mut_ptr().add(len.as_usize()) },
            (old - len).as_usize(),
        );
        unsafe { ptr::drop_in_place(tail) };
    }

    #[inline]
    pub fn clear(&mut self) {
        self.truncate(L::ZERO_VALUE);
    }

    /// The last element, or `None` if the array is empty.
    #[inline]
    pub fn end(&self) -> Option<&T> {
        return self.as_slice().last();
    }

    #[inline]
    pub fn end_mut(&mut self) -> Option<&mut T> {
        return self.as_mut_slice().last_mut();
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len().as_usize()) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len().as_usize()) }
    }

    /// A pointer to the first element, usable as a plain C array of
    /// `len()` elements. Dangling, but aligned, while nothing is allocated.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        return self.inner.get_ptr();
    }

    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        return self.inner.get_ptr();
    }
}

#[cfg(feature = "std_alloc")]
impl<T, L: LengthType> GrowArr<T, Global, L>
where
    usize: TryFrom<L>,
{
    /// Creates an empty array on the global heap.
    pub const fn new() -> Self {
        return Self::new_in(Global);
    }

    pub fn with_capacity(capacity: L) -> GrowArrResult<Self> {
        return Self::with_capacity_in(Global, capacity);
    }
}

#[cfg(feature = "std_alloc")]
impl<T, L: LengthType> Default for GrowArr<T, Global, L>
where
    usize: TryFrom<L>,
{
    fn default() -> Self {
        return Self::new();
    }
}

impl<T, A: ArrAllocator, L: LengthType> Drop for GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    fn drop(&mut self) {
        self.inner.release::<T>();
    }
}

impl<T, A: ArrAllocator, L: LengthType> ops::Deref for GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        return self.as_slice();
    }
}

impl<T, A: ArrAllocator, L: LengthType> ops::DerefMut for GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        return self.as_mut_slice();
    }
}

impl<T, A: ArrAllocator, L: LengthType> ops::Index<L> for GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    type Output = T;

    #[inline]
    fn index(&self, index: L) -> &T {
        let Ok(index) = usize::try_from(index) else {
            panic!("index does not fit a usize");
        };
        return &self.as_slice()[index];
    }
}

impl<T, A: ArrAllocator, L: LengthType> ops::IndexMut<L> for GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    #[inline]
    fn index_mut(&mut self, index: L) -> &mut T {
        let Ok(index) = usize::try_from(index) else {
            panic!("index does not fit a usize");
        };
        return &mut self.as_mut_slice()[index];
    }
}

impl<T: fmt::Debug, A: ArrAllocator, L: LengthType> fmt::Debug for GrowArr<T, A, L>
where
    usize: TryFrom<L>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_list().entries(self.as_slice()).finish();
    }
}
