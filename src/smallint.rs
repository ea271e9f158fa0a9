mod error;
mod vector;
mod workload;

#[cfg(test)]
mod alloc_counter;

pub use error::Result;
pub use vector::{SmallIntVector, INLINE_CAPACITY};
pub use workload::RecordSet;
