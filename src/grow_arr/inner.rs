use core::alloc::Layout;
use core::ptr;
use core::ptr::NonNull;

use crate::alloc::ArrAllocator;
use crate::errors::ErrorReason;
use crate::errors::GrowArrErr;
use crate::errors::GrowArrResult;
use crate::errors::alloc_failure;
use crate::len_type::LengthType;

const fn layout_array(layout: Layout, length: usize) -> GrowArrResult<Layout> {
    let lay = layout.pad_to_align();
    let Some(len) = length.checked_mul(lay.size()) else {
        return Err(GrowArrErr::new(ErrorReason::UsizeOverflow));
    };
    let Ok(lay) = Layout::from_size_align(len, layout.align()) else {
        return Err(GrowArrErr::new(ErrorReason::LayoutFailure));
    };
    return Ok(lay);
}

/// The header of a `GrowArr`: where the elements live, how many are live,
/// and how many fit.
///
/// `capacity == 0` means nothing is allocated and `ptr` is dangling. Zero
/// sized elements never allocate, for them `capacity` stays zero and the
/// usable capacity is reported as `L::MAX_VALUE`.
pub(crate) struct Inner<A: ArrAllocator, L: LengthType = u32>
where
    usize: TryFrom<L>,
{
    ptr:               NonNull<u8>,
    pub(crate) length: L,
    capacity:          L,
    alloc:             A,
}

impl<A: ArrAllocator, L: LengthType> Inner<A, L>
where
    usize: TryFrom<L>,
{
    pub(crate) const fn new_in<T>(alloc: A) -> Self {
        return Self {
            ptr:      NonNull::<T>::dangling().cast(),
            length:   L::ZERO_VALUE,
            capacity: L::ZERO_VALUE,
            alloc:    alloc,
        };
    }

    #[inline]
    pub(crate) const fn capacity(&self, size: usize) -> L {
        if size == 0 {
            return L::MAX_VALUE;
        }
        return self.capacity;
    }

    #[inline]
    pub(crate) const fn get_ptr<T>(&self) -> *mut T {
        return self.ptr.as_ptr().cast();
    }

    #[inline]
    pub(crate) const fn allocator(&self) -> &A {
        return &self.alloc;
    }

    /// The layout of the block currently held. Only meaningful while
    /// something is allocated, in which case it was already validated.
    fn current_layout<T>(&self) -> Layout {
        let size = size_of::<T>() * self.capacity.as_usize();
        return unsafe { Layout::from_size_align_unchecked(size, align_of::<T>()) };
    }

    /// Drops the elements in `from..to`. The caller must already have
    /// moved `length` below `from`, or be about to discard the block.
    unsafe fn drop_range<T>(base: *mut T, from: usize, to: usize) {
        let tail = ptr::slice_from_raw_parts_mut(unsafe { base.add(from) }, to - from);
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Drops every element and gives the block back to the allocator.
    pub(crate) fn release<T>(&mut self) {
        let len = self.length.as_usize();
        let base = self.get_ptr::<T>();
        let had_block = size_of::<T>() != 0 && self.capacity != L::ZERO_VALUE;
        let layout = self.current_layout::<T>();

        self.length = L::ZERO_VALUE;
        self.capacity = L::ZERO_VALUE;
        self.ptr = NonNull::<T>::dangling().cast();

        unsafe { Self::drop_range(base, 0, len) };
        if had_block {
            log::trace!("released array storage of {} bytes", layout.size());
            unsafe { self.alloc.deallocate(NonNull::new_unchecked(base.cast::<u8>()), layout) };
        }
    }

    /// Moves the elements into a block of exactly `capacity` slots.
    ///
    /// Elements past `capacity` are dropped. If an error is returned
    /// nothing changed: no element was dropped and the old block is kept.
    pub(crate) fn resize<T>(&mut self, capacity: L) -> GrowArrResult<()> {
        if capacity == L::ZERO_VALUE {
            self.release::<T>();
            return Ok(());
        }

        let len = self.length.as_usize();

        if size_of::<T>() == 0 {
            if capacity < self.length {
                self.length = capacity;
                unsafe { Self::drop_range(self.get_ptr::<T>(), capacity.as_usize(), len) };
            }
            return Ok(());
        }

        if capacity == self.capacity {
            return Ok(());
        }

        let Ok(new_cap) = usize::try_from(capacity) else {
            return Err(GrowArrErr::new(ErrorReason::UsizeOverflow));
        };
        let new_layout = layout_array(Layout::new::<T>(), new_cap)?;

        if capacity < self.length {
            return self.shrink_below_len::<T>(capacity, new_layout);
        }

        let ret = if self.capacity == L::ZERO_VALUE {
            self.alloc.allocate(new_layout)
        } else if capacity > self.capacity {
            unsafe { self.alloc.grow(self.ptr, self.current_layout::<T>(), new_layout) }
        } else {
            unsafe { self.alloc.shrink(self.ptr, self.current_layout::<T>(), new_layout) }
        };
        let Ok(block) = ret else {
            return Err(alloc_failure(new_layout));
        };

        log::trace!("resized array storage from {} to {} slots", self.capacity.as_usize(), new_cap);
        self.ptr = block.cast();
        self.capacity = capacity;
        return Ok(());
    }

    /// Cutting live elements goes through a fresh block, so that a failed
    /// allocation cannot leave the array with its tail already dropped.
    fn shrink_below_len<T>(&mut self, capacity: L, new_layout: Layout) -> GrowArrResult<()> {
        let Ok(block) = self.alloc.allocate(new_layout) else {
            return Err(alloc_failure(new_layout));
        };

        let old = self.get_ptr::<T>();
        let old_layout = self.current_layout::<T>();
        let len = self.length.as_usize();
        let keep = capacity.as_usize();
        let new = block.cast::<T>();

        unsafe { new.as_ptr().copy_from_nonoverlapping(old, keep) };

        log::trace!("resized array storage from {} to {} slots", self.capacity.as_usize(), keep);
        self.ptr = new.cast();
        self.length = capacity;
        self.capacity = capacity;

        unsafe { Self::drop_range(old, keep, len) };
        unsafe { self.alloc.deallocate(NonNull::new_unchecked(old.cast::<u8>()), old_layout) };
        return Ok(());
    }
}
