//! A fixed-capacity circular FIFO buffer.
//!
//! [`RingBuffer`] owns a heap-allocated storage block whose capacity is chosen
//! at construction and never grows. Pushing into a full buffer evicts the
//! oldest item, and all operations other than construction and cloning are
//! O(1).
//!
//! ```
//! use cyclic_buffer::RingBuffer;
//!
//! let mut buf = RingBuffer::with_capacity(3);
//! for item in 1..=4 {
//!     buf.pop_push(item);
//! }
//! assert_eq!(buf, [2, 3, 4]);
//! assert_eq!(buf.pop_head(), Some(2));
//! buf.pop_push(5);
//! assert_eq!(buf, [3, 4, 5]);
//! ```

pub mod entry;
pub mod error;
pub mod iter;
mod pos;

use std::{
    fmt::{Debug, Formatter},
    hash::{Hash, Hasher},
    mem::{self, MaybeUninit},
    ops::{Index, IndexMut},
    ptr, slice,
};

pub use self::{
    error::{AllocError, BufferFullError},
    iter::{Iter, IterMut},
};

use self::{entry::VacantEntry, pos::Pos};

/// A ring buffer holding up to a fixed number of items of type `A`.
///
/// The capacity is chosen when the buffer is constructed and never changes.
/// Logical index 0 is always the oldest retained item.
///
/// `RingBuffer` is a plain single-threaded value type with no internal
/// synchronization; for concurrent access, wrap it in a lock.
pub struct RingBuffer<A: Copy> {
    // Invariant: at least `len` slots are initialized, starting from `at` and
    // circling back to the beginning of the storage if overflowing the capacity
    buf: Box<[MaybeUninit<A>]>,
    pos: Pos,
}

impl<A: Copy> Default for RingBuffer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Copy> RingBuffer<A> {
    /// Creates a ring buffer with capacity 0.
    ///
    /// Does not allocate. The buffer is valid but can never hold an item.
    pub fn new() -> Self {
        Self {
            buf: Vec::new().into_boxed_slice(),
            pos: Pos::new(0),
        }
    }

    /// Creates an empty ring buffer with the given capacity.
    ///
    /// Allocates storage for exactly `capacity` items; the process aborts if
    /// the allocation fails. See [`try_with_capacity`](Self::try_with_capacity)
    /// for a fallible variant.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Box::new_uninit_slice(capacity),
            pos: Pos::new(capacity),
        }
    }

    /// Creates an empty ring buffer with the given capacity, returning an
    /// error if the storage cannot be reserved.
    ///
    /// On failure no storage is allocated and no buffer exists.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| AllocError::new(capacity))?;
        slots.resize_with(capacity, MaybeUninit::uninit);
        Ok(Self {
            buf: slots.into_boxed_slice(),
            pos: Pos::new(capacity),
        })
    }

    /// Creates a ring buffer with the given capacity and fills it from an
    /// iterator, one [`pop_push`](Self::pop_push) per item.
    ///
    /// Eviction applies during construction exactly as it does later: if the
    /// iterator yields more than `capacity` items, only the last `capacity`
    /// of them are retained.
    ///
    /// # Panics
    /// Panics if `capacity` is 0 and the iterator yields any item.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let buf = RingBuffer::from_iter_with_capacity(2, [10, 20, 30]);
    /// assert_eq!(buf, [20, 30]);
    /// ```
    #[track_caller]
    pub fn from_iter_with_capacity<I: IntoIterator<Item = A>>(capacity: usize, iter: I) -> Self {
        let mut buf = Self::with_capacity(capacity);
        for item in iter {
            buf.pop_push(item);
        }
        buf
    }

    /// Returns the number of items in the ring buffer.
    pub const fn len(&self) -> usize {
        self.pos.len()
    }

    /// Returns the maximum number of items the ring buffer can hold.
    pub const fn capacity(&self) -> usize {
        self.pos.cap()
    }

    /// Returns `true` if the ring buffer is empty.
    pub const fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Returns `true` if the ring buffer is full.
    ///
    /// Note that it is equivalent to `!self.has_remaining()`, unless the capacity is 0 in which
    /// case both `self.has_remaining()` and `self.is_full()` will return false.
    pub const fn is_full(&self) -> bool {
        self.pos.is_full()
    }

    /// Returns the number of items that can be added to the ring buffer before it is full.
    ///
    /// Same as `self.capacity() - self.len()`.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::with_capacity(3);
    /// assert_eq!(buf.remaining(), 3);
    /// buf.extend([0, 1]);
    /// assert_eq!(buf.remaining(), 1);
    /// buf.push(2);
    /// assert_eq!(buf.remaining(), 0);
    /// assert_eq!(buf.pop_head(), Some(0));
    /// assert_eq!(buf.remaining(), 1);
    /// ```
    pub const fn remaining(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Returns `true` if the ring buffer has capacity for at least one more item without
    /// evicting anything.
    ///
    /// Equivalent to `self.remaining() > 0`.
    pub const fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Returns the physical storage index of the oldest item, or 0 if the buffer is empty.
    pub const fn head_index(&self) -> usize {
        self.pos.at()
    }

    /// Returns the physical storage index of the newest item, or 0 if the buffer is empty.
    ///
    /// Always equal to `(self.head_index() + self.len() - 1) % self.capacity()`
    /// for a non-empty buffer; the tail is derived, never tracked separately.
    pub const fn tail_index(&self) -> usize {
        match self.len() {
            0 => 0,
            len => self.pos.logical_index(len - 1),
        }
    }

    /// Returns a reference to the oldest item, or `None` if the buffer is empty.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let buf = RingBuffer::from_iter_with_capacity(3, [1, 2, 3, 4]);
    /// assert_eq!(buf.head(), Some(&2));
    /// ```
    pub fn head(&self) -> Option<&A> {
        self.get(0)
    }

    /// Returns a reference to the newest item, or `None` if the buffer is empty.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let buf = RingBuffer::from_iter_with_capacity(3, [1, 2, 3, 4]);
    /// assert_eq!(buf.tail(), Some(&4));
    /// ```
    pub fn tail(&self) -> Option<&A> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Returns a reference to the oldest, possibly uninitialized slot.
    ///
    /// # Safety
    /// The capacity must be greater than 0.
    /// It *is* safe to call this method on an empty ring buffer.
    #[inline(always)]
    unsafe fn first_item(&mut self) -> &mut MaybeUninit<A> {
        debug_assert!(self.capacity() > 0);
        self.buf.get_unchecked_mut(self.pos.at())
    }

    /// Returns a reference to the slot past the newest item, where the next item would be
    /// written.
    ///
    /// # Safety
    /// The capacity must be greater than 0.
    /// It *is* safe to call this method on an empty ring buffer.
    #[inline(always)]
    unsafe fn next_item(&mut self) -> &mut MaybeUninit<A> {
        debug_assert!(self.capacity() > 0);
        let index = self.pos.logical_index(self.len());
        self.buf.get_unchecked_mut(index)
    }

    /// Returns a reference to the newest slot.
    ///
    /// # Safety
    /// The buffer must be non-empty.
    #[inline(always)]
    unsafe fn last_item(&mut self) -> &mut MaybeUninit<A> {
        debug_assert!(!self.is_empty());
        let index = self.pos.logical_index(self.len() - 1);
        self.buf.get_unchecked_mut(index)
    }

    /// Returns a reference to the item at the given logical index without doing bounds checks.
    /// Also assumes that the item is initialized.
    ///
    /// # Safety
    /// The given index must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &A {
        debug_assert!(index < self.len());
        let index = self.pos.logical_index(index);
        self.buf.get_unchecked(index).assume_init_ref()
    }

    /// Returns a mutable reference to the item at the given logical index without doing bounds
    /// checks. Also assumes that the item is initialized.
    ///
    /// # Safety
    /// The given index must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut A {
        debug_assert!(index < self.len());
        let index = self.pos.logical_index(index);
        self.buf.get_unchecked_mut(index).assume_init_mut()
    }

    /// Returns a reference to the item at the given logical index, or `None` if the index is
    /// out of bounds. Index 0 is the oldest item.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let buf = RingBuffer::from_iter_with_capacity(3, [0, 1]);
    /// assert_eq!(buf.get(0), Some(&0));
    /// assert_eq!(buf.get(1), Some(&1));
    /// assert_eq!(buf.get(2), None);
    /// ````
    pub fn get(&self, index: usize) -> Option<&A> {
        if index >= self.len() {
            None
        } else {
            Some(unsafe { self.get_unchecked(index) })
        }
    }

    /// Returns a mutable reference to the item at the given logical index, or `None` if the
    /// index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::from_iter_with_capacity(3, [1, 2]);
    /// *buf.get_mut(0).unwrap() *= 2;
    /// *buf.get_mut(1).unwrap() *= 3;
    /// assert_eq!(buf.get_mut(2), None);
    /// assert_eq!(buf, [2, 6]);
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Option<&mut A> {
        if index >= self.len() {
            None
        } else {
            Some(unsafe { self.get_unchecked_mut(index) })
        }
    }

    /// Removes the oldest item from the ring buffer and returns it, or `None` if the buffer
    /// [is empty](Self::is_empty).
    ///
    /// When the last item is removed, the head and tail indices return to the canonical
    /// position 0.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::with_capacity(3);
    /// assert_eq!(buf.pop_head(), None);
    /// buf.extend([0, 1]);
    /// assert_eq!(buf.pop_head(), Some(0));
    /// assert_eq!(buf.pop_head(), Some(1));
    /// assert_eq!(buf.pop_head(), None);
    /// ```
    #[inline]
    pub fn pop_head(&mut self) -> Option<A> {
        if self.is_empty() {
            return None;
        }

        let item = mem::replace(
            // SAFETY: the capacity is > 0, otherwise `self.is_empty()` would have returned `true`
            unsafe { self.first_item() },
            MaybeUninit::uninit(),
        );
        // SAFETY: buffer is non-empty, so has at least one item
        let item = unsafe { item.assume_init() };
        self.pos.advance(1);
        // SAFETY: `0 < self.len() <= self.capacity()`, so `self.len() - 1` will not underflow
        // and is in bounds
        unsafe { self.pos.set_len(self.len() - 1) };
        if self.pos.is_empty() {
            self.pos.rewind();
        }
        Some(item)
    }

    /// Removes the newest item from the ring buffer and returns it, or `None` if the buffer
    /// [is empty](Self::is_empty).
    ///
    /// When the last item is removed, the head and tail indices return to the canonical
    /// position 0.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::from_iter_with_capacity(3, [0, 1, 2]);
    /// assert_eq!(buf.pop_tail(), Some(2));
    /// assert_eq!(buf.pop_tail(), Some(1));
    /// assert_eq!(buf, [0]);
    /// ```
    #[inline]
    pub fn pop_tail(&mut self) -> Option<A> {
        if self.is_empty() {
            return None;
        }

        let item = mem::replace(
            // SAFETY: the buffer is non-empty
            unsafe { self.last_item() },
            MaybeUninit::uninit(),
        );
        // SAFETY: buffer is non-empty, so has at least one item
        let item = unsafe { item.assume_init() };
        // SAFETY: `0 < self.len() <= self.capacity()`, so `self.len() - 1` will not underflow
        // and is in bounds
        unsafe { self.pos.set_len(self.len() - 1) };
        if self.pos.is_empty() {
            self.pos.rewind();
        }
        Some(item)
    }

    /// If the ring [has remaining capacity](Self::has_remaining), returns a [`VacantEntry`]
    /// that can be used to push a new item to the end of the ring buffer.
    ///
    /// See also [`try_push`](Self::try_push) and [`try_push_with`](Self::try_push_with).
    pub fn with_vacancy(&mut self) -> Option<VacantEntry<A>> {
        if self.has_remaining() {
            // SAFETY: `self.has_remaining()` returned `true`, so `self.len() < self.capacity()`
            Some(unsafe { VacantEntry::new_unchecked(self) })
        } else {
            None
        }
    }

    /// Adds an item to the end of the ring buffer, evicting the oldest item if the buffer
    /// [is full](Self::is_full). Returns the evicted item if the buffer was full, otherwise
    /// `None`.
    ///
    /// This is the only operation through which retained data can be lost.
    ///
    /// # Panics
    /// Panics if the capacity is 0.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::with_capacity(3);
    /// assert_eq!(buf.pop_push(0), None);
    /// assert_eq!(buf, [0]);
    /// assert_eq!(buf.pop_push(1), None);
    /// assert_eq!(buf, [0, 1]);
    /// assert_eq!(buf.pop_push(2), None);
    /// assert_eq!(buf, [0, 1, 2]);
    /// assert_eq!(buf.pop_push(3), Some(0));
    /// assert_eq!(buf, [1, 2, 3]);
    /// assert_eq!(buf.pop_push(4), Some(1));
    /// assert_eq!(buf, [2, 3, 4]);
    /// ```
    #[track_caller]
    #[inline]
    pub fn pop_push(&mut self, item: A) -> Option<A> {
        assert!(self.capacity() > 0);

        if self.is_full() {
            let item = mem::replace(
                // SAFETY: the capacity was asserted to be > 0 above
                unsafe { self.first_item() },
                MaybeUninit::new(item),
            );
            // SAFETY: buffer is full, so has at least one item
            let item = unsafe { item.assume_init() };
            self.pos.advance(1);
            Some(item)
        } else {
            // SAFETY: the capacity was asserted to be > 0 above
            unsafe { self.next_item() }.write(item);
            // SAFETY: `self.len() < self.capacity()` (since `self.is_full()` returned false),
            // so `self.len() + 1` will not overflow and is in bounds
            unsafe { self.pos.set_len(self.len() + 1) };
            None
        }
    }

    /// Tries to add an item to the end of the ring buffer, if the buffer
    /// [has remaining capacity](Self::has_remaining).
    /// Returns `Ok(())` if successful, otherwise returns `Err(BufferFullError)`.
    ///
    /// The item is constructed by calling the given closure, which is only called if the
    /// buffer has remaining capacity.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::from_iter_with_capacity(3, [0, 1]);
    /// let mut call_count = 0;
    /// assert!(
    ///     buf.try_push_with(|| {
    ///         call_count += 1;
    ///         2
    ///     }
    /// ).is_ok());
    /// assert_eq!(call_count, 1);
    /// assert_eq!(buf, [0, 1, 2]);
    /// assert!(
    ///     buf.try_push_with(|| {
    ///         call_count += 1;
    ///         3
    ///     }
    /// ).is_err());
    /// assert_eq!(call_count, 1);
    /// ```
    #[inline]
    pub fn try_push_with<F: FnOnce() -> A>(&mut self, f: F) -> Result<(), BufferFullError> {
        self.with_vacancy()
            .ok_or(BufferFullError::new())?
            .write(f());
        Ok(())
    }

    /// Adds an item to the end of the ring buffer, assuming the buffer
    /// [has remaining capacity](Self::has_remaining).
    ///
    /// # Safety
    /// The following invariant must be held:
    /// - `self.has_remaining()` (which implies the capacity is > 0)
    #[inline]
    pub unsafe fn push_unchecked(&mut self, item: A) {
        debug_assert!(self.has_remaining());
        self.next_item().write(item);
        self.pos.set_len(self.len() + 1);
    }

    /// Tries to add an item to the end of the ring buffer, if the buffer
    /// [has remaining capacity](Self::has_remaining).
    /// Returns `Ok(())` if successful, otherwise returns `Err(BufferFullError)`.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::from_iter_with_capacity(3, [1, 2]);
    /// assert_eq!(buf.try_push(3), Ok(()));
    /// assert_eq!(buf, [1, 2, 3]);
    /// assert!(buf.try_push(4).is_err());
    /// ```
    #[inline]
    pub fn try_push(&mut self, item: A) -> Result<(), BufferFullError> {
        self.try_push_with(|| item)
    }

    /// Adds an item to the end of the ring buffer.
    ///
    /// # Panics
    /// Panics if the buffer [has no remaining capacity](Self::has_remaining).
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::with_capacity(3);
    /// buf.push(0);
    /// assert_eq!(buf, [0]);
    /// buf.push(1);
    /// assert_eq!(buf, [0, 1]);
    /// buf.push(2);
    /// assert_eq!(buf, [0, 1, 2]);
    /// ```
    ///
    /// ```should_panic
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::from_iter_with_capacity(3, [0, 1, 2]);
    /// buf.push(3);
    /// ```
    #[track_caller]
    #[inline]
    pub fn push(&mut self, item: A) {
        self.try_push(item).unwrap()
    }

    /// Returns an iterator over the items in the ring buffer, oldest to newest.
    pub fn iter(&self) -> Iter<'_, A> {
        Iter::new(&self.buf, self.pos)
    }

    /// Returns an iterator over mutable references to the items in the ring buffer, oldest to
    /// newest.
    pub fn iter_mut(&mut self) -> IterMut<'_, A> {
        IterMut::new(&mut self.buf, self.pos)
    }

    /// Removes all items from the ring buffer and releases its storage.
    ///
    /// Afterwards the buffer is indistinguishable from a freshly [`new`](Self::new)-constructed
    /// one: capacity 0, length 0, head and tail at the canonical position. Idempotent.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::from_iter_with_capacity(3, [0, 1, 2]);
    /// buf.clear();
    /// assert!(buf.is_empty());
    /// assert_eq!(buf.capacity(), 0);
    /// ```
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Exchanges the entire state of two ring buffers in O(1), without copying any items.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns a deep copy of the ring buffer, or an error if storage for the copy cannot
    /// be reserved.
    ///
    /// On failure, `self` is untouched and nothing is leaked.
    pub fn try_clone(&self) -> Result<Self, AllocError> {
        let mut clone = Self::try_with_capacity(self.capacity())?;
        // SAFETY: `clone.buf` has the same length as `self.buf` and does not overlap it
        unsafe { self.copy_into_offsets(&mut clone.buf) };
        clone.pos = self.pos;
        Ok(clone)
    }

    /// Replaces the contents of `self` with a deep copy of `source`, keeping `self` unchanged
    /// if storage for the copy cannot be reserved.
    ///
    /// The replacement is built in full first and then swapped in, so failure can never leave
    /// `self` half-assigned.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), AllocError> {
        let mut replacement = source.try_clone()?;
        self.swap(&mut replacement);
        Ok(())
    }

    /// Copies the initialized region of the ring buffer into `dst`, keeping every item at the
    /// same physical offset it occupies in `self.buf`.
    ///
    /// # Safety
    /// `dst` must be at least `self.capacity()` slots long and must not overlap with
    /// `self.buf`.
    #[inline(always)]
    unsafe fn copy_into_offsets(&self, dst: &mut [MaybeUninit<A>]) {
        debug_assert!(dst.len() >= self.capacity());
        let front = self.front_slice();
        let back = self.back_slice();
        let dst = dst.as_mut_ptr();

        dst.add(self.pos.at())
            .copy_from_nonoverlapping(front.as_ptr().cast(), front.len());
        dst.copy_from_nonoverlapping(back.as_ptr().cast(), back.len());
    }

    /// Returns a slice reference containing the contents of the ring buffer, if the ring
    /// buffer is layed out contiguously in memory.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::from_iter_with_capacity(3, [0, 1]);
    /// assert_eq!(buf.as_slice(), Some(&[0, 1][..]));
    /// buf.push(2);
    /// assert_eq!(buf.as_slice(), Some(&[0, 1, 2][..]));
    /// buf.pop_head();
    /// assert_eq!(buf.as_slice(), Some(&[1, 2][..]));
    /// buf.push(3);
    /// assert_eq!(buf.as_slice(), None);
    /// buf.extend([4, 5]);
    /// assert_eq!(buf.as_slice(), Some(&[3, 4, 5][..]));
    /// ```
    #[inline]
    pub fn as_slice(&self) -> Option<&[A]> {
        // when the layout is contiguous, the front slice is the whole buffer
        self.pos.is_contiguous().then(|| self.front_slice())
    }

    /// Returns a mutable slice reference containing the contents of the ring buffer, if the
    /// ring buffer is layed out contiguously in memory.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::from_iter_with_capacity(3, [0, 1]);
    /// buf.as_slice_mut().unwrap().copy_from_slice(&[2, 3]);
    /// assert_eq!(buf, [2, 3]);
    /// buf.extend([4, 5]);
    /// assert_eq!(buf.as_slice_mut(), None);
    /// buf.extend([6, 7]);
    /// buf.as_slice_mut().unwrap().copy_from_slice(&[8, 9, 10]);
    /// assert_eq!(buf, [8, 9, 10]);
    /// ```
    #[inline]
    pub fn as_slice_mut(&mut self) -> Option<&mut [A]> {
        self.pos.is_contiguous().then(|| self.front_slice_mut())
    }

    /// Returns a slice reference containing the front part of the ring buffer.
    ///
    /// If the ring buffer is not layed out contiguously in memory,
    /// this slice will not contain all the items, and the rest of the items will be in the
    /// [back part of the ring buffer](Self::back_slice).
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::from_iter_with_capacity(3, [0, 1, 2]);
    /// assert_eq!(buf.front_slice(), &[0, 1, 2][..]);
    /// assert_eq!(buf.pop_head(), Some(0));
    /// assert_eq!(buf.front_slice(), &[1, 2][..]);
    /// buf.push(3);
    /// assert_eq!(buf.front_slice(), &[1, 2][..]);
    /// buf.pop_push(4);
    /// assert_eq!(buf.front_slice(), &[2][..]);
    /// ```
    pub fn front_slice(&self) -> &[A] {
        let at = self.pos.at();
        let len = self.pos.front_len();
        // SAFETY: the `front_len` slots starting at `at` are initialized
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(at).cast::<A>(), len) }
    }

    /// Returns a mutable slice reference containing the front part of the ring buffer.
    ///
    /// If the ring buffer is not layed out contiguously in memory,
    /// this slice will not contain all the items, and the rest of the items will be in the
    /// [back part of the ring buffer](Self::back_slice_mut).
    ///
    /// See also [`split_mut_slices`](Self::split_mut_slices).
    pub fn front_slice_mut(&mut self) -> &mut [A] {
        self.split_mut_slices().0
    }

    /// Returns a slice reference containing the back part of the ring buffer.
    ///
    /// If the ring buffer is layed out contiguously in memory,
    /// this slice will be empty. Otherwise, it will contain all the items that are not in the
    /// [front part of the ring buffer](Self::front_slice).
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::from_iter_with_capacity(3, [0, 1, 2]);
    /// assert_eq!(buf.back_slice(), &[][..]);
    /// // at this point, the next item will be written to the back part of the buffer
    /// assert_eq!(buf.pop_push(3), Some(0));
    /// assert_eq!(buf.back_slice(), &[3][..]);
    /// ```
    pub fn back_slice(&self) -> &[A] {
        let len = self.pos.back_len();
        // SAFETY: the first `back_len` slots are initialized
        unsafe { slice::from_raw_parts(self.buf.as_ptr().cast::<A>(), len) }
    }

    /// Returns a mutable slice reference containing the back part of the ring buffer.
    ///
    /// See also [`split_mut_slices`](Self::split_mut_slices).
    pub fn back_slice_mut(&mut self) -> &mut [A] {
        self.split_mut_slices().1
    }

    /// Splits the ring buffer into two mutable slice references, one containing the front part
    /// of the ring buffer, and one containing the back part.
    ///
    /// If the ring buffer is layed out contiguously in memory,
    /// the back slice will be empty, and the front slice will contain all the items.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::with_capacity(3);
    /// let (front, back) = buf.split_mut_slices();
    /// assert_eq!(front, &[0i32; 0][..]);
    /// assert_eq!(back, &[][..]);
    /// buf.extend([0, 1, 2]);
    /// let (front, back) = buf.split_mut_slices();
    /// assert_eq!(front, &[0, 1, 2][..]);
    /// assert_eq!(back, &[][..]);
    /// buf.pop_push(3);
    /// let (front, back) = buf.split_mut_slices();
    /// front.copy_from_slice(&[4, 5]);
    /// back.copy_from_slice(&[6]);
    /// assert_eq!(buf, [4, 5, 6]);
    /// buf.pop_push(7);
    /// let (front, back) = buf.split_mut_slices();
    /// front.copy_from_slice(&[8]);
    /// back.copy_from_slice(&[9, 10]);
    /// assert_eq!(buf, [8, 9, 10]);
    /// ```
    pub fn split_mut_slices(&mut self) -> (&mut [A], &mut [A]) {
        let front_len = self.pos.front_len();
        let back_len = self.pos.back_len();
        let at = self.pos.at();
        let ptr = self.buf.as_mut_ptr();
        // SAFETY: the front region starts at `at` and the back region at 0; both are
        // initialized and they never overlap, since together they hold at most `cap` slots
        unsafe {
            (
                slice::from_raw_parts_mut(ptr.add(at).cast::<A>(), front_len),
                slice::from_raw_parts_mut(ptr.cast::<A>(), back_len),
            )
        }
    }

    /// Copies the contents of the ring buffer into a `Vec`, oldest to newest.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::from_iter_with_capacity(3, [0, 1, 2]);
    /// buf.pop_push(3);
    /// assert_eq!(buf.to_vec(), [1, 2, 3]);
    /// ```
    pub fn to_vec(&self) -> Vec<A> {
        let mut vec = Vec::with_capacity(self.len());
        vec.extend_from_slice(self.front_slice());
        vec.extend_from_slice(self.back_slice());
        vec
    }
}

impl<A: Copy> Clone for RingBuffer<A> {
    /// Returns a deep copy with the same capacity, length, head and tail indices and item
    /// values, sharing no storage with the original.
    fn clone(&self) -> Self {
        let mut buf = Box::new_uninit_slice(self.capacity());
        // SAFETY: `buf` has the same length as `self.buf` and does not overlap it
        unsafe { self.copy_into_offsets(&mut buf) };
        Self {
            buf,
            pos: self.pos,
        }
    }

    /// Builds a full copy of `source` first and then swaps it in, so the previous storage of
    /// `self` is released only after the copy has fully succeeded.
    fn clone_from(&mut self, source: &Self) {
        let mut replacement = source.clone();
        self.swap(&mut replacement);
    }
}

/// Creates a full ring buffer with capacity `N` from an array.
///
/// # Examples
///
/// ```rust
/// # use cyclic_buffer::RingBuffer;
/// let buf = RingBuffer::from([0, 1, 2]);
/// assert_eq!(buf.capacity(), 3);
/// assert!(buf.is_full());
/// assert!(buf.iter().eq(&[0, 1, 2]));
/// ```
impl<A: Copy, const N: usize> From<[A; N]> for RingBuffer<A> {
    fn from(arr: [A; N]) -> Self {
        let mut buf = Box::new_uninit_slice(N);
        // SAFETY: both pointers are valid for `N` items and cannot overlap
        unsafe {
            ptr::copy_nonoverlapping(arr.as_ptr().cast::<MaybeUninit<A>>(), buf.as_mut_ptr(), N)
        };
        Self {
            buf,
            // SAFETY: all `N` slots of an `N`-capacity buffer are initialized
            pos: unsafe { Pos::new_unchecked(N, N, 0) },
        }
    }
}

/// Extends the ring buffer with the contents of the given iterator, evicting items from the
/// front of the ring buffer if necessary.
///
/// # Panics
/// Panics if the capacity is 0.
///
/// # Examples
/// ```
/// # use cyclic_buffer::RingBuffer;
/// let mut buf = RingBuffer::with_capacity(3);
/// buf.extend([0, 1]);
/// assert_eq!(buf, [0, 1]);
/// buf.extend([2, 3]);
/// assert_eq!(buf, [1, 2, 3]);
/// ```
impl<A: Copy> Extend<A> for RingBuffer<A> {
    #[track_caller]
    fn extend<T: IntoIterator<Item = A>>(&mut self, iter: T) {
        for item in iter {
            self.pop_push(item);
        }
    }
}

impl<A: Copy + PartialEq> PartialEq for RingBuffer<A> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<A: Copy + Eq> Eq for RingBuffer<A> {}

impl<A: Copy + PartialOrd> PartialOrd for RingBuffer<A> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<A: Copy + Ord> Ord for RingBuffer<A> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<A: Copy + Hash> Hash for RingBuffer<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iter().for_each(|item| item.hash(state))
    }
}

impl<A: Copy + PartialEq, B: AsRef<[A]> + ?Sized> PartialEq<B> for RingBuffer<A> {
    fn eq(&self, other: &B) -> bool {
        self.iter().eq(other.as_ref())
    }
}

impl<A: Copy + Debug> Debug for RingBuffer<A> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<A: Copy> Index<usize> for RingBuffer<A> {
    type Output = A;

    /// # Panics
    /// Panics if the logical index is out of bounds. Use [`get`](RingBuffer::get) for a
    /// checked variant.
    #[track_caller]
    fn index(&self, index: usize) -> &A {
        match self.get(index) {
            Some(item) => item,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len(),
                index
            ),
        }
    }
}

impl<A: Copy> IndexMut<usize> for RingBuffer<A> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut A {
        let len = self.len();
        match self.get_mut(index) {
            Some(item) => item,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}

impl<'buf, A: Copy> IntoIterator for &'buf RingBuffer<A> {
    type Item = &'buf A;
    type IntoIter = Iter<'buf, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'buf, A: Copy> IntoIterator for &'buf mut RingBuffer<A> {
    type Item = &'buf mut A;
    type IntoIter = IterMut<'buf, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test() {
        let mut arr = RingBuffer::with_capacity(3);
        assert_eq!(arr.pop_head(), None);
        assert_eq!(arr.iter().next(), None);
        assert_eq!(arr, [0i32; 0]);
        assert!(arr.is_empty());
        assert!(!arr.is_full());

        arr.with_vacancy().unwrap().write(0);
        arr.with_vacancy().unwrap().write(1);
        assert_eq!(arr, [0, 1]);
        assert_eq!(arr.len(), 2);
        assert!(!arr.is_empty());
        assert!(!arr.is_full());

        // fill cap
        arr.with_vacancy().unwrap().write(2);

        assert_eq!(arr, [0, 1, 2]);
        assert_eq!(arr.len(), 3);
        assert!(!arr.is_empty());
        assert!(arr.is_full());
        assert!(arr.with_vacancy().is_none());

        assert_eq!(arr.pop_head(), Some(0));
        assert_eq!(arr, [1, 2]);
        assert!(!arr.is_full());
        assert!(arr.iter().eq(&[1, 2]));

        arr.with_vacancy().unwrap().write(3);
        assert!(arr.is_full());
        assert_eq!(arr, [1, 2, 3]);

        assert_eq!(arr.pop_head(), Some(1));
        assert_eq!(arr.pop_head(), Some(2));
        assert_eq!(arr.pop_head(), Some(3));
        assert!(arr.is_empty());
        assert_eq!(arr, [0i32; 0]);
    }

    #[test]
    fn test_insert_evict_scenario() {
        let mut arr = RingBuffer::with_capacity(3);
        assert_eq!(arr.pop_push(1), None);
        assert_eq!(arr.pop_push(2), None);
        assert_eq!(arr.pop_push(3), None);
        assert_eq!(arr.pop_push(4), Some(1));
        assert_eq!(arr, [2, 3, 4]);
        assert_eq!(arr.head(), Some(&2));
        assert_eq!(arr.tail(), Some(&4));

        assert_eq!(arr.pop_head(), Some(2));
        assert_eq!(arr, [3, 4]);

        assert_eq!(arr.pop_push(5), None);
        assert_eq!(arr, [3, 4, 5]);

        assert_eq!(arr.pop_tail(), Some(5));
        assert_eq!(arr, [3, 4]);
    }

    #[test]
    fn test_fifo_overwrite() {
        let mut arr = RingBuffer::with_capacity(4);
        for item in 0..11 {
            arr.pop_push(item);
            assert!(arr.len() <= arr.capacity());
        }
        assert_eq!(arr, [7, 8, 9, 10]);
        assert_eq!(arr[0], 7);
        assert_eq!(arr[3], 10);
    }

    #[test]
    fn test_from_iter_with_capacity_overwrites() {
        let arr = RingBuffer::from_iter_with_capacity(2, [10, 20, 30]);
        assert_eq!(arr, [20, 30]);
        assert_eq!(arr.head(), Some(&20));
        assert_eq!(arr.tail(), Some(&30));
    }

    #[test]
    fn test_derived_tail() {
        let mut arr = RingBuffer::with_capacity(3);
        for item in 0..20 {
            arr.pop_push(item);
            let expected = (arr.head_index() + arr.len() - 1) % arr.capacity();
            assert_eq!(arr.tail_index(), expected);
        }
        while arr.pop_head().is_some() {
            if !arr.is_empty() {
                let expected = (arr.head_index() + arr.len() - 1) % arr.capacity();
                assert_eq!(arr.tail_index(), expected);
            }
        }
    }

    #[test]
    fn test_empty_state_canonicalization() {
        let mut arr = RingBuffer::with_capacity(3);
        for item in 0..5 {
            arr.pop_push(item);
        }
        assert_ne!(arr.head_index(), 0);

        // drain through a mix of both removal ends
        assert_eq!(arr.pop_head(), Some(2));
        assert_eq!(arr.pop_tail(), Some(4));
        assert_eq!(arr.pop_tail(), Some(3));
        assert!(arr.is_empty());
        assert_eq!(arr.head_index(), 0);
        assert_eq!(arr.tail_index(), 0);

        // inserting now behaves like inserting into a fresh buffer
        let mut fresh = RingBuffer::with_capacity(3);
        arr.pop_push(7);
        fresh.pop_push(7);
        assert_eq!(arr, fresh);
        assert_eq!(arr.head_index(), fresh.head_index());
        assert_eq!(arr.tail_index(), fresh.tail_index());
    }

    #[test]
    fn test_pop_tail() {
        let mut arr = RingBuffer::with_capacity(3);
        assert_eq!(arr.pop_tail(), None);

        for item in 0..5 {
            arr.pop_push(item);
        }
        assert_eq!(arr.pop_tail(), Some(4));
        assert_eq!(arr.pop_tail(), Some(3));
        assert_eq!(arr.pop_tail(), Some(2));
        assert_eq!(arr.pop_tail(), None);
        assert!(arr.is_empty());
        assert_eq!(arr.capacity(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = RingBuffer::from_iter_with_capacity(3, [0, 1, 2, 3]);
        let mut b = a.clone();
        assert_eq!(a, b);

        a.pop_push(4);
        assert_eq!(a, [2, 3, 4]);
        assert_eq!(b, [1, 2, 3]);

        b.pop_head();
        *b.get_mut(0).unwrap() = 9;
        assert_eq!(a, [2, 3, 4]);
        assert_eq!(b, [9, 3]);
    }

    #[test]
    fn test_clone_preserves_layout() {
        let mut a = RingBuffer::from_iter_with_capacity(4, 0..7);
        assert_ne!(a.head_index(), 0);

        let b = a.clone();
        assert_eq!(b.capacity(), a.capacity());
        assert_eq!(b.len(), a.len());
        assert_eq!(b.head_index(), a.head_index());
        assert_eq!(b.tail_index(), a.tail_index());
        assert!(b.iter().eq(a.iter()));

        // identical behavior after the copy, too
        let evicted_a = a.pop_push(7);
        let evicted_b = b.clone().pop_push(7);
        assert_eq!(evicted_a, evicted_b);
    }

    #[test]
    fn test_clone_from_swaps_in_replacement() {
        let mut a = RingBuffer::from_iter_with_capacity(2, [0, 1]);
        let b = RingBuffer::from_iter_with_capacity(4, 0..7);

        a.clone_from(&b);
        assert_eq!(a, b);
        assert_eq!(a.capacity(), 4);
        assert_eq!(a.head_index(), b.head_index());

        let c = a.clone();
        a.try_clone_from(&c).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn test_try_clone() {
        let a = RingBuffer::from_iter_with_capacity(3, [0, 1, 2, 3]);
        let b = a.try_clone().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.head_index(), b.head_index());
    }

    #[test]
    fn test_try_with_capacity() {
        let arr = RingBuffer::<u8>::try_with_capacity(16).unwrap();
        assert_eq!(arr.capacity(), 16);
        assert!(arr.is_empty());

        let arr = RingBuffer::<u8>::try_with_capacity(0).unwrap();
        assert_eq!(arr.capacity(), 0);
    }

    #[test]
    fn test_swap() {
        let mut a = RingBuffer::from_iter_with_capacity(2, [0, 1]);
        let mut b = RingBuffer::from_iter_with_capacity(3, [2, 3]);

        a.swap(&mut b);
        assert_eq!(a, [2, 3]);
        assert_eq!(a.capacity(), 3);
        assert_eq!(b, [0, 1]);
        assert_eq!(b.capacity(), 2);
    }

    #[test]
    fn test_clear() {
        let mut arr = RingBuffer::from_iter_with_capacity(3, [0, 1, 2, 3]);
        arr.clear();
        assert!(arr.is_empty());
        assert_eq!(arr.capacity(), 0);
        assert_eq!(arr.head_index(), 0);
        assert_eq!(arr.tail_index(), 0);

        // idempotent
        arr.clear();
        assert_eq!(arr.capacity(), 0);
        assert!(arr.try_push(4).is_err());
    }

    #[test]
    fn test_to_vec() {
        let mut arr = RingBuffer::with_capacity(3);
        assert_eq!(arr.to_vec(), [0i32; 0]);

        arr.push(0);
        assert_eq!(arr.to_vec(), [0]);
        arr.push(1);
        assert_eq!(arr.to_vec(), [0, 1]);
        arr.push(2);
        assert_eq!(arr.to_vec(), [0, 1, 2]);

        assert_eq!(arr.pop_head(), Some(0));
        assert_eq!(arr.pop_head(), Some(1));
        assert_eq!(arr.to_vec(), [2]);

        arr.extend([3, 4]);
        assert!(arr.as_slice().is_none());
        assert_eq!(arr.to_vec(), [2, 3, 4]);
    }

    #[test]
    fn test_zero_capacity() {
        let mut arr = RingBuffer::<i32>::with_capacity(0);
        assert_eq!(arr.to_vec(), [0i32; 0]);
        assert_eq!(arr.pop_head(), None);
        assert_eq!(arr.pop_tail(), None);
        assert!(arr.with_vacancy().is_none());
        assert!(arr.try_push(0).is_err());
        assert!(arr.iter().eq(&[]));
        assert!(arr.iter_mut().eq(&[]));
        assert_eq!(arr.get(0), None);
        assert_eq!(arr.get_mut(0), None);
        assert!(arr.is_full());
        assert!(arr.is_empty());
        assert!(!arr.has_remaining());
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.as_slice(), Some(&[][..]));
        assert_eq!(arr.as_slice_mut(), Some(&mut [][..]));
        assert_eq!(arr.front_slice(), &[]);
        assert_eq!(arr.front_slice_mut(), &mut []);
        assert_eq!(arr.back_slice(), &[]);
        assert_eq!(arr.back_slice_mut(), &mut []);
        assert_eq!(arr.split_mut_slices(), (&mut [][..], &mut [][..]));
    }

    #[test]
    #[should_panic]
    fn test_zero_cap_push() {
        let mut arr = RingBuffer::<i32>::new();
        arr.push(0);
    }

    #[test]
    #[should_panic]
    fn test_zero_cap_extend() {
        let mut arr = RingBuffer::<i32>::new();
        arr.extend([0]);
    }

    #[test]
    #[should_panic]
    fn test_zero_cap_pop_push() {
        let mut arr = RingBuffer::<i32>::new();
        arr.pop_push(0);
    }

    #[test]
    fn test_push() {
        let mut arr = RingBuffer::with_capacity(3);
        arr.push(0);
        assert_eq!(arr, [0]);
        arr.push(1);
        assert_eq!(arr, [0, 1]);
        arr.push(2);
        assert_eq!(arr, [0, 1, 2]);
    }

    #[test]
    #[should_panic = "BufferFullError"]
    fn test_push_overflow() {
        let mut arr = RingBuffer::with_capacity(3);
        arr.push(0);
        arr.push(1);
        arr.push(2);
        arr.push(3);
    }

    #[test]
    fn test_index() {
        let mut arr = RingBuffer::from_iter_with_capacity(3, [0, 1, 2, 3]);
        assert_eq!(arr[0], 1);
        assert_eq!(arr[2], 3);
        arr[1] *= 10;
        assert_eq!(arr, [1, 20, 3]);
    }

    #[test]
    #[should_panic = "index out of bounds"]
    fn test_index_out_of_bounds() {
        let arr = RingBuffer::from_iter_with_capacity(3, [0, 1]);
        let _ = arr[2];
    }

    #[test]
    #[should_panic = "index out of bounds"]
    fn test_index_mut_out_of_bounds() {
        let mut arr = RingBuffer::from_iter_with_capacity(3, [0, 1]);
        arr[2] = 5;
    }
}
