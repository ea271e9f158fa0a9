use raw_buffer::AllocError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmallIntVectorError {
    /// The heap payload could not be obtained. There is no fallback storage.
    #[error("could not allocate heap storage: {0}")]
    AllocationFailure(#[from] AllocError),
    #[error("index {index} is out of range for capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, SmallIntVectorError>;
