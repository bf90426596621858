use core::alloc::Layout;
use core::error::Error;
use core::fmt;

/// This enum lets one figure out why a `GrowArr` operation failed.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorReason {
    /// The requested length does not fit the array's `LengthType`.
    CapacityOverflow = 1,
    /// A size computation overflowed `usize`.
    UsizeOverflow,
    /// The element block is too big to be described by a `Layout`.
    LayoutFailure,
    /// The allocator refused the request.
    AllocFailure,
}

/// A type alias for `Result<T, GrowArrErr>`
pub type GrowArrResult<T> = Result<T, GrowArrErr>;

/// This is used to indicate an error during a `GrowArr` operation.
///
/// Whenever an operation returns this error the array is left exactly as it
/// was before the call.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GrowArrErr(ErrorReason);

impl GrowArrErr {
    pub(crate) const fn new(reason: ErrorReason) -> Self {
        return Self(reason);
    }
    pub const fn reason(self) -> ErrorReason {
        return self.0;
    }
}

impl Error for GrowArrErr {}

impl fmt::Display for GrowArrErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ErrorReason::CapacityOverflow => f.write_str("Capacity type overflowed."),
            ErrorReason::UsizeOverflow => f.write_str("usize overflowed."),
            ErrorReason::LayoutFailure => f.write_str("Failed to create layout."),
            ErrorReason::AllocFailure => f.write_str("An allocation failure occurred."),
        }
    }
}

/// Turns an allocator refusal into the error handed back to the caller.
///
/// With `strict_alloc` there is no caller to hand it to: the process is
/// stopped through the std allocation error handler.
#[cold]
#[cfg(not(feature = "strict_alloc"))]
pub(crate) fn alloc_failure(layout: Layout) -> GrowArrErr {
    log::trace!("allocation of {} bytes failed", layout.size());
    return GrowArrErr::new(ErrorReason::AllocFailure);
}

#[cold]
#[cfg(feature = "strict_alloc")]
pub(crate) fn alloc_failure(layout: Layout) -> GrowArrErr {
    log::error!("allocation of {} bytes failed, aborting", layout.size());
    std::alloc::handle_alloc_error(layout);
}
