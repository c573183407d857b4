use thiserror::Error;

/// Error returned when trying to push to a full ring buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("ring buffer is full")]
pub struct BufferFullError(());

impl BufferFullError {
    pub(crate) const fn new() -> Self {
        Self(())
    }
}

/// Error returned when storage for a ring buffer could not be reserved.
///
/// Only construction and cloning allocate, so this can only be returned from
/// [`try_with_capacity`](crate::RingBuffer::try_with_capacity),
/// [`try_clone`](crate::RingBuffer::try_clone) and
/// [`try_clone_from`](crate::RingBuffer::try_clone_from).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to reserve ring buffer storage for {capacity} items")]
pub struct AllocError {
    capacity: usize,
}

impl AllocError {
    pub(crate) const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// The capacity that could not be allocated.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
