use std::{iter::FusedIterator, marker::PhantomData, mem::MaybeUninit};

use crate::{Pos, RingBuffer};

macro_rules! iter {
    ($name:ident(*$raw_mut:tt T, {$( $mut_:tt )?}, $as_ptr:ident)) => {
        pub struct $name<'buf, A: Copy> {
            buf: *$raw_mut MaybeUninit<A>,
            pos: Pos,
            _marker: PhantomData<&'buf $($mut_)? RingBuffer<A>>,
        }

        impl<'buf, A: Copy> $name<'buf, A> {
            pub(crate) fn new(buf: &'buf $($mut_)? [MaybeUninit<A>], pos: Pos) -> Self {
                Self {
                    buf: buf.$as_ptr(),
                    pos,
                    _marker: PhantomData,
                }
            }

            /// Returns a pointer to the item at the given logical index without doing bounds
            /// checks. Also assumes that the item is initialized.
            #[inline(always)]
            fn get_unchecked(& $($mut_)? self, index: usize) -> *$raw_mut A {
                let index = self.pos.logical_index(index);
                self.buf.wrapping_add(index).cast::<A>()
            }
        }

        impl<'buf, A: Copy> Iterator for $name<'buf, A> {
            type Item = &'buf $($mut_)? A;

            fn next(&mut self) -> Option<Self::Item> {
                let remaining = self.pos.len().checked_sub(1)?;
                // SAFETY: one less than the current length
                unsafe { self.pos.set_len(remaining) };
                let item = self.get_unchecked(0);
                self.pos.advance(1);
                // SAFETY: the first `len` slots starting at `at` are initialized, and the
                // pointee stays borrowed from the ring buffer for `'buf`
                Some(unsafe { & $($mut_)? *item })
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                (self.pos.len(), Some(self.pos.len()))
            }

            fn count(self) -> usize {
                self.pos.len()
            }
        }

        impl<A: Copy> DoubleEndedIterator for $name<'_, A> {
            fn next_back(&mut self) -> Option<Self::Item> {
                let remaining = self.pos.len().checked_sub(1)?;
                // SAFETY: one less than the current length
                unsafe { self.pos.set_len(remaining) };
                let item = self.get_unchecked(self.pos.len());
                // SAFETY: same as in `next`
                Some(unsafe { & $($mut_)? *item })
            }
        }

        impl<A: Copy> FusedIterator for $name<'_, A> {}

        impl<A: Copy> ExactSizeIterator for $name<'_, A> {
            fn len(&self) -> usize {
                self.pos.len()
            }
        }
    };
}

iter!(Iter(*const T, {/* no mut */}, as_ptr));
iter!(IterMut(*mut T, {mut}, as_mut_ptr));

impl<A: Copy> Clone for Iter<'_, A> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf,
            pos: self.pos,
            _marker: PhantomData,
        }
    }
}

unsafe impl<A: Copy + Sync> Sync for Iter<'_, A> {}
unsafe impl<A: Copy + Sync> Send for Iter<'_, A> {}

unsafe impl<A: Copy + Sync> Sync for IterMut<'_, A> {}
unsafe impl<A: Copy + Send> Send for IterMut<'_, A> {}

#[cfg(test)]
mod tests {
    use crate::RingBuffer;

    #[test]
    fn test_iter_contiguous() {
        let arr = RingBuffer::from_iter_with_capacity(5, [0, 1, 2]);
        let mut iter = arr.iter();

        assert_eq!(iter.len(), 3);
        assert!(iter.clone().eq(&[0, 1, 2]));

        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.len(), 2);
        assert!(iter.clone().eq(&[1, 2]));

        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_iter_wrapped() {
        let mut arr = RingBuffer::from([0, 1, 2, 3, 4]);
        assert_eq!(arr.pop_head(), Some(0));
        assert_eq!(arr.pop_head(), Some(1));
        arr.with_vacancy().unwrap().write(5);
        arr.with_vacancy().unwrap().write(6);
        assert_ne!(arr.head_index(), 0);

        let mut iter = arr.iter();

        assert_eq!(iter.len(), 5);
        assert!(iter.clone().eq(&[2, 3, 4, 5, 6]));

        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.len(), 4);
        assert!(iter.clone().eq(&[3, 4, 5, 6]));

        assert_eq!(iter.by_ref().take(3).count(), 3);
        assert_eq!(iter.len(), 1);
        assert!(iter.clone().eq(&[6]));

        assert_eq!(iter.next(), Some(&6));
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
    }

    // Full buffer whose head and one-past-tail slot coincide, the case an
    // index-equality end check gets wrong.
    #[test]
    fn test_iter_full_buffer_head_meets_tail() {
        let mut arr = RingBuffer::from_iter_with_capacity(4, 0..4);
        for item in 4..10 {
            arr.pop_push(item);
        }
        assert!(arr.is_full());
        assert_eq!((arr.tail_index() + 1) % arr.capacity(), arr.head_index());

        assert_eq!(arr.iter().count(), arr.len());
        assert!(arr.iter().eq(&[6, 7, 8, 9]));
    }

    #[test]
    fn test_iter_double_ended() {
        let mut arr = RingBuffer::from([0, 1, 2, 3, 4]);
        assert_eq!(arr.pop_head(), Some(0));
        assert_eq!(arr.pop_head(), Some(1));
        arr.with_vacancy().unwrap().write(5);
        arr.with_vacancy().unwrap().write(6);
        assert_ne!(arr.head_index(), 0);

        assert!(arr.iter().rev().eq(&[6, 5, 4, 3, 2]));

        let mut iter = arr.iter();

        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.len(), 4);
        assert!(iter.clone().eq(&[2, 3, 4, 5]));

        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 2);
        assert!(iter.clone().eq(&[3, 4]));

        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), Some(&4));
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn test_iter_mut() {
        let mut arr = RingBuffer::from([0, 1, 2, 3, 4]);
        assert_eq!(arr.pop_head(), Some(0));
        assert_eq!(arr.pop_head(), Some(1));
        arr.with_vacancy().unwrap().write(5);
        arr.with_vacancy().unwrap().write(6);
        assert_ne!(arr.head_index(), 0);

        arr.iter_mut()
            .zip(&[1, 2, 3, 4, 5])
            .for_each(|(a, b)| *a *= b);

        assert!(arr.iter().eq(&[2, 6, 12, 20, 30]));
    }
}
