use std::fmt::{Debug, Display, Formatter};

use raw_buffer::{AllocError, RawBuffer};

use super::error::{Result, SmallIntVectorError};

pub type Int = i64;

/// Elements that fit in the container itself before it needs a heap buffer.
pub const INLINE_CAPACITY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Inline,
    Heap,
}

#[derive(Clone)]
enum Storage {
    Inline([Int; INLINE_CAPACITY]),
    Heap(RawBuffer<Int>),
}

/// A fixed-capacity vector of integers that keeps up to [`INLINE_CAPACITY`]
/// elements inside the object and otherwise owns a heap buffer of exactly the
/// requested capacity.
///
/// The storage mode is decided once, in [`SmallIntVector::new`], and never
/// changes. Every instance has the same `size_of` whatever its mode, which is
/// what keeps large `Vec<SmallIntVector>`s dense.
///
/// `len` counts the populated prefix: writing through [`get_mut`] or [`set`]
/// at `index` extends it to at least `index + 1`.
///
/// [`get_mut`]: SmallIntVector::get_mut
/// [`set`]: SmallIntVector::set
#[derive(Clone)]
pub struct SmallIntVector {
    storage: Storage,
    len: usize,
}

impl SmallIntVector {
    /// Aborts the process if the heap buffer can't be allocated, like `Vec`.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(vector) => vector,
            Err(SmallIntVectorError::AllocationFailure(AllocError::OutOfMemory { layout })) => {
                std::alloc::handle_alloc_error(layout)
            }
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_new(capacity: usize) -> Result<Self> {
        let storage = if capacity <= INLINE_CAPACITY {
            Storage::Inline([0; INLINE_CAPACITY])
        } else {
            Storage::Heap(RawBuffer::with_capacity(capacity)?)
        };
        let vector = Self { storage, len: 0 };
        tracing::debug!(
            "New SmallIntVector: requested={}, mode={:?}, capacity={}",
            capacity,
            vector.mode(),
            vector.capacity()
        );
        Ok(vector)
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        match self.storage {
            Storage::Inline(_) => Mode::Inline,
            Storage::Heap(_) => Mode::Heap,
        }
    }

    #[inline]
    pub fn is_inline(&self) -> bool {
        self.mode() == Mode::Inline
    }

    /// Capacity of the active storage: [`INLINE_CAPACITY`] when inline, the
    /// requested capacity when on the heap.
    #[inline]
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Inline(_) => INLINE_CAPACITY,
            Storage::Heap(buf) => buf.capacity(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Result<Int> {
        self.check_index(index)?;
        Ok(self.slots()[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Int> {
        self.check_index(index)?;
        self.len = self.len.max(index + 1);
        Ok(&mut self.slots_mut()[index])
    }

    pub fn set(&mut self, index: usize, value: Int) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// The populated prefix, `0..len()`.
    pub fn as_slice(&self) -> &[Int] {
        &self.slots()[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = Int> + '_ {
        self.as_slice().iter().copied()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let capacity = self.capacity();
        if index < capacity {
            Ok(())
        } else {
            Err(SmallIntVectorError::IndexOutOfRange { index, capacity })
        }
    }

    fn slots(&self) -> &[Int] {
        match &self.storage {
            Storage::Inline(array) => array,
            Storage::Heap(buf) => buf.as_slice(),
        }
    }

    fn slots_mut(&mut self) -> &mut [Int] {
        match &mut self.storage {
            Storage::Inline(array) => array,
            Storage::Heap(buf) => buf.as_mut_slice(),
        }
    }
}

impl Default for SmallIntVector {
    /// Empty and inline, so a moved-out-of (`mem::take`n) vector owns nothing.
    fn default() -> Self {
        Self {
            storage: Storage::Inline([0; INLINE_CAPACITY]),
            len: 0,
        }
    }
}

impl PartialEq for SmallIntVector {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for SmallIntVector {}

impl<'a> IntoIterator for &'a SmallIntVector {
    type Item = Int;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Int>>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter().copied()
    }
}

impl Display for SmallIntVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for value in self {
            write!(f, "{}, ", value)?;
        }
        Ok(())
    }
}

impl Debug for SmallIntVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmallIntVector")
            .field("mode", &self.mode())
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("elements", &self.as_slice())
            .finish()
    }
}
