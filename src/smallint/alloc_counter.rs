//! Test-only global allocator that counts heap traffic per thread, so tests
//! running in parallel don't see each other's allocations.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

pub struct CountingAlloc;

thread_local! {
    static ALLOCS: Cell<usize> = const { Cell::new(0) };
    static FREES: Cell<usize> = const { Cell::new(0) };
    static LAST_SIZE: Cell<usize> = const { Cell::new(0) };
    static FAIL_NEXT: Cell<bool> = const { Cell::new(false) };
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if take_failure() {
            return std::ptr::null_mut();
        }
        record_alloc(layout);
        System.alloc(layout)
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        if take_failure() {
            return std::ptr::null_mut();
        }
        record_alloc(layout);
        System.alloc_zeroed(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let _ = FREES.try_with(|f| f.set(f.get() + 1));
        System.dealloc(ptr, layout)
    }
}

fn take_failure() -> bool {
    FAIL_NEXT.try_with(|f| f.replace(false)).unwrap_or(false)
}

fn record_alloc(layout: Layout) {
    let _ = ALLOCS.try_with(|a| a.set(a.get() + 1));
    let _ = LAST_SIZE.try_with(|s| s.set(layout.size()));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub allocs: usize,
    pub frees: usize,
}

impl Snapshot {
    pub fn now() -> Self {
        Self {
            allocs: ALLOCS.with(Cell::get),
            frees: FREES.with(Cell::get),
        }
    }

    /// Allocations and frees performed on this thread since `self`.
    pub fn delta(&self) -> Snapshot {
        let now = Self::now();
        Snapshot {
            allocs: now.allocs - self.allocs,
            frees: now.frees - self.frees,
        }
    }
}

/// Size in bytes of the most recent allocation on this thread.
pub fn last_alloc_size() -> usize {
    LAST_SIZE.with(Cell::get)
}

/// Makes the next allocation on this thread return null.
pub fn fail_next_alloc() {
    FAIL_NEXT.with(|f| f.set(true));
}
