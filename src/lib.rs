//! # Growable Array
//!
//! The `grow_arr` crate is a small `#[no_std]` toolkit meant to be embedded in
//! other programs. Its core is `GrowArr`, a contiguous growable array much like
//! `std::Vec` that can be viewed as a plain pointer to its first element.
//!
//! `GrowArr` grows in two ways. `push` grows the storage by half again plus
//! one, so appending is amortized constant time. `get_space` grows to exactly
//! the length asked for and hands back the new slots to be filled in place,
//! for callers that know how much they need.
//!
//! Allocations are fallible: instead of aborting on allocation failure an error
//! is returned and the array is left as it was. The `strict_alloc` feature
//! restores the abort, for programs that have nothing better to do anyway.
//!
//! The type used for the length and capacity can be chosen. On a 64-bit system
//! the default `u32` packs both into one word next to the pointer.
//!
//! Next to the array sit the djb2 string hash in [`hash`] and, with the `std`
//! feature, whole-file read helpers in [`io`].
//!
//! # Feature Flags
//! * `std_alloc` - This feature enables a wrapper called `Global` that implements
//! `ArrAllocator` using the standard allocator APIs.
//!
//! * `std` (default) - `std_alloc` plus the [`io`] module.
//!
//! * `strict_alloc` - An allocation failure aborts the process through
//! `std::alloc::handle_alloc_error` instead of returning an error.
//!
//! * `alloc_api2` - Implements `ArrAllocator` for every allocator of the
//! `allocator-api2` crate.
//!
//! * `experimental_allocator` - This feature enables the use of the unstable `Allocator` trait for
//! custom memory allocators. Further, if used in conjunction with `std_alloc` this will re-export
//! the `Global` type from the `std` crate instead of the `Global` wrapper defined in this crate.

#![no_std]
#![cfg_attr(feature = "experimental_allocator", feature(allocator_api))]

#[cfg(any(feature = "std_alloc", test))]
extern crate std;

pub mod alloc;
mod errors;
mod grow_arr;
pub mod hash;
#[cfg(feature = "std")]
pub mod io;
mod len_type;

pub use errors::ErrorReason;
pub use errors::GrowArrErr;
pub use errors::GrowArrResult;
pub use grow_arr::GrowArr;
pub use len_type::LengthType;
