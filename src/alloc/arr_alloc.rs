use core::alloc::Layout;
use core::ptr::NonNull;

use super::AllocError;

/// The allocation capability a `GrowArr` draws its storage from.
///
/// `allocate` hands out a fresh block, `grow`/`shrink` move a block to a new
/// size (the realloc of C), and `deallocate` gives a block back. Only
/// `allocate` and `deallocate` are required, the resize operations fall back
/// to allocate, copy, release.
///
/// The safety requirements are the ones of the unstable allocator API:
/// <https://doc.rust-lang.org/std/alloc/trait.Allocator.html>
pub unsafe trait ArrAllocator {
    /// Allocates a block of memory fitting `layout`.
    ///
    /// Returns an `AllocError` if the request cannot be met.
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError>;

    /// Releases the block pointed at by `ptr`.
    ///
    /// The block must come from this allocator and `layout` must be the
    /// layout it currently fits.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Moves the block at `old_ptr` into a block fitting `new_layout`,
    /// which must not be smaller than `old_layout`.
    ///
    /// On failure `old_ptr` is still valid and untouched. On success only
    /// the returned pointer may be used.
    unsafe fn grow(
        &self,
        old_ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        let new = self.allocate(new_layout)?;
        let ptr = new.cast::<u8>();

        unsafe { ptr.copy_from_nonoverlapping(old_ptr, old_layout.size()) };
        unsafe { self.deallocate(old_ptr, old_layout) };
        return Ok(new);
    }

    /// Moves the block at `old_ptr` into a block fitting `new_layout`,
    /// which must not be larger than `old_layout`. Bytes past the new size
    /// are lost.
    ///
    /// Failure and success leave `old_ptr` in the same state as for `grow`.
    unsafe fn shrink(
        &self,
        old_ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        let new = self.allocate(new_layout)?;
        let ptr = new.cast::<u8>();

        unsafe { ptr.copy_from_nonoverlapping(old_ptr, new_layout.size()) };
        unsafe { self.deallocate(old_ptr, old_layout) };
        return Ok(new);
    }
}
