pub mod rawbuffer;

use std::alloc::Layout;
use std::fmt::Debug;

pub use rawbuffer::RawBuffer;

/// Plain machine integers that can live in a [`RawBuffer`].
///
/// # Safety
///
/// The all-zero bit pattern must be a valid value of the type, buffers are
/// handed out straight from `alloc_zeroed`.
pub unsafe trait Word: Debug + Copy + 'static {}

unsafe impl Word for i64 {}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    #[error("capacity {capacity} overflows the maximum buffer size")]
    CapacityOverflow { capacity: usize },
    #[error("allocator returned null for {layout:?}")]
    OutOfMemory { layout: Layout },
}
