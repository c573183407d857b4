#[derive(Debug, Clone, Copy)]
pub(crate) struct Pos {
    // Invariant: `len` <= `cap`
    cap: usize,
    len: usize,
    // Invariant: `at` < `cap` (or `cap` == 0 and `at` == 0)
    at: usize,
}

impl Pos {
    /// Creates an empty `Pos` for a buffer of the given capacity.
    pub const fn new(cap: usize) -> Self {
        Self { cap, len: 0, at: 0 }
    }

    /// Creates a new `Pos` with the given capacity, length and starting index.
    ///
    /// # Safety
    /// The following invariants must be held:
    /// - `len` <= `cap`
    /// - `at` < `cap` (or `cap` == 0 and `at` == 0)
    pub const unsafe fn new_unchecked(cap: usize, len: usize, at: usize) -> Self {
        debug_assert!(len <= cap);
        debug_assert!(at < cap || (cap == 0 && at == 0));
        Self { cap, len, at }
    }

    #[inline(always)]
    pub const fn cap(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// # Safety
    /// The following invariant must be held:
    /// - `len` <= `self.cap()`
    #[inline(always)]
    pub unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.cap);
        self.len = len;
    }

    #[inline(always)]
    pub const fn at(&self) -> usize {
        self.at
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.len == self.cap
    }

    #[inline(always)]
    pub const fn is_contiguous(&self) -> bool {
        self.at + self.len <= self.cap
    }

    /// Length of the part of the buffer starting at `at`, up to the end of storage.
    #[inline(always)]
    pub const fn front_len(&self) -> usize {
        self.len - self.back_len()
    }

    /// Length of the part of the buffer that wrapped around to the start of storage.
    #[inline(always)]
    pub const fn back_len(&self) -> usize {
        if self.at + self.len > self.cap {
            self.at + self.len - self.cap
        } else {
            0
        }
    }

    /// Returns the index in the underlying storage corresponding to the given logical index.
    /// The returned index is guaranteed to be in bounds (i.e. < `self.cap()`), but the indexed
    /// slot is not necessarily initialized.
    ///
    /// # Panics
    /// Panics if `self.cap() == 0`.
    #[inline(always)]
    #[track_caller]
    pub const fn logical_index(&self, index: usize) -> usize {
        (self.at + index) % self.cap
    }

    pub fn advance(&mut self, n: usize) {
        self.at = self.logical_index(n);
    }

    /// Resets the starting index to the canonical position for an empty buffer.
    #[inline(always)]
    pub fn rewind(&mut self) {
        debug_assert!(self.is_empty());
        self.at = 0;
    }
}
