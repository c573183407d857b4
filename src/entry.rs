use crate::RingBuffer;

/// A free slot at the end of a ring buffer, obtained from
/// [`with_vacancy`](RingBuffer::with_vacancy).
pub struct VacantEntry<'buf, A: Copy>(
    // Invariant: `buf.has_remaining()`
    &'buf mut RingBuffer<A>,
);

impl<'buf, A: Copy> VacantEntry<'buf, A> {
    pub(super) unsafe fn new_unchecked(buf: &'buf mut RingBuffer<A>) -> Self {
        debug_assert!(buf.has_remaining());
        Self(buf)
    }
}

impl<A: Copy> VacantEntry<'_, A> {
    pub fn write(&mut self, item: A) {
        // SAFETY: the invariant of `Self` is that `self.has_remaining()`
        unsafe { self.0.push_unchecked(item) };
    }
}
