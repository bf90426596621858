//! The allocator boundary used by `GrowArr`. The most important items are
//! the `ArrAllocator` trait, and the `AllocError` type.
//!
//! An `ArrAllocator` supplies the three capabilities the array needs:
//! allocating a block, resizing a block (`grow`/`shrink`), and releasing
//! a block. Any embedding program can substitute its own.
//!
//! If the `experimental_allocator` feature is enabled, the `ArrAllocator`
//! trait is implemented for types that implement the allocator api `Allocator` trait.
//! With `alloc_api2` it is implemented for every `allocator_api2` allocator instead.
//!
//! If built with the `std_alloc` feature, a wrapper called `Global` is also
//! provided. Further, if the `experimental_allocator` feature is enabled,
//! the allocator APIs `Global` is re-exported instead.

#[cfg(all(feature = "alloc_api2", not(feature = "experimental_allocator")))]
mod alloc_api2;
#[cfg(feature = "experimental_allocator")]
mod alloc_unstable;
mod arr_alloc;
#[cfg(feature = "std_alloc")]
mod std_alloc;

#[cfg(feature = "experimental_allocator")]
pub use core::alloc::AllocError;

#[cfg(not(feature = "experimental_allocator"))]
pub use alloc_error::AllocError;
pub use arr_alloc::ArrAllocator;
#[cfg(feature = "std_alloc")]
pub use std_alloc::Global;

#[cfg(not(feature = "experimental_allocator"))]
mod alloc_error {
    use core::error::Error;
    use core::fmt;

    /// An allocator could not satisfy a request.
    ///
    /// If the rust allocator API is enabled this will be the same error type as
    /// the Allocator API.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct AllocError;

    impl Error for AllocError {}

    impl fmt::Display for AllocError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("The allocator could not provide the requested block.")
        }
    }
}
