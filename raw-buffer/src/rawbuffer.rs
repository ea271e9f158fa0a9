use std::alloc::{self, Layout};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::{AllocError, Word};

/// A fixed-capacity, zero-initialized heap buffer that is exclusively owned.
///
/// Unlike `Vec` there is no length and no growth: the capacity is chosen once
/// and every slot in `0..capacity` is readable for the lifetime of the buffer.
/// The memory is released in `Drop`, exactly once.
pub struct RawBuffer<W: Word> {
    mem: NonNull<W>, // dangling when capacity == 0
    capacity: usize,
    _w: PhantomData<W>,
}

// uniquely owned, same as Box<[W]>
unsafe impl<W: Word + Send> Send for RawBuffer<W> {}
unsafe impl<W: Word + Sync> Sync for RawBuffer<W> {}

impl<W: Word> RawBuffer<W> {
    pub fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let layout = Self::layout_for(capacity)?;
        if layout.size() == 0 {
            return Ok(Self {
                mem: NonNull::dangling(),
                capacity,
                _w: PhantomData,
            });
        }

        let ptr = unsafe { alloc::alloc_zeroed(layout) } as *mut W;
        let mem = NonNull::new(ptr).ok_or(AllocError::OutOfMemory { layout })?;
        tracing::trace!(
            "ALLOC: Buffer {:p}, Capacity: {}, Bytes: {}",
            mem.as_ptr(),
            capacity,
            layout.size()
        );

        Ok(Self {
            mem,
            capacity,
            _w: PhantomData,
        })
    }

    fn layout_for(capacity: usize) -> Result<Layout, AllocError> {
        Layout::array::<W>(capacity).map_err(|_| AllocError::CapacityOverflow { capacity })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        // validated in with_capacity
        unsafe {
            Layout::from_size_align_unchecked(
                self.capacity * std::mem::size_of::<W>(),
                std::mem::align_of::<W>(),
            )
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[W] {
        unsafe { std::slice::from_raw_parts(self.mem.as_ptr(), self.capacity) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [W] {
        unsafe { std::slice::from_raw_parts_mut(self.mem.as_ptr(), self.capacity) }
    }
}

impl<W: Word> Clone for RawBuffer<W> {
    fn clone(&self) -> Self {
        let mut copy = match Self::with_capacity(self.capacity) {
            Ok(copy) => copy,
            Err(_) => alloc::handle_alloc_error(self.layout()),
        };
        copy.as_mut_slice().copy_from_slice(self.as_slice());
        tracing::trace!(
            "CLONE: Buffer {:p} -> {:p}",
            self.mem.as_ptr(),
            copy.mem.as_ptr()
        );
        copy
    }
}

impl<W: Word> Drop for RawBuffer<W> {
    fn drop(&mut self) {
        let layout = self.layout();
        if layout.size() == 0 {
            return;
        }
        tracing::trace!(
            "FREE: Buffer {:p}, Capacity: {}",
            self.mem.as_ptr(),
            self.capacity
        );
        unsafe { alloc::dealloc(self.mem.as_ptr() as _, layout) };
    }
}

impl<W: Word> Debug for RawBuffer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawBuffer")
            .field("capacity", &self.capacity)
            .field("mem", &self.as_slice())
            .finish()
    }
}
