use std::fmt;
use std::iter::{Chain, FusedIterator};
use std::slice;

/// An iterator over the elements of a `CircularDeque`.
///
/// This `struct` is created by the [`iter`] method on [`CircularDeque`]. See its
/// documentation for more.
///
/// [`iter`]: crate::CircularDeque::iter
/// [`CircularDeque`]: crate::CircularDeque
pub struct Iter<'a, T> {
    // the occupied slots from front to the end of the buffer, then the wrapped part
    inner: Chain<slice::Iter<'a, Option<T>>, slice::Iter<'a, Option<T>>>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(first: slice::Iter<'a, Option<T>>, second: slice::Iter<'a, Option<T>>) -> Self {
        Self { inner: first.chain(second) }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().and_then(Option::as_ref)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().and_then(Option::as_ref)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A mutable iterator over the elements of a `CircularDeque`.
///
/// This `struct` is created by the [`iter_mut`] method on [`CircularDeque`]. See its
/// documentation for more.
///
/// [`iter_mut`]: crate::CircularDeque::iter_mut
/// [`CircularDeque`]: crate::CircularDeque
pub struct IterMut<'a, T> {
    inner: Chain<slice::IterMut<'a, Option<T>>, slice::IterMut<'a, Option<T>>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(
        first: slice::IterMut<'a, Option<T>>,
        second: slice::IterMut<'a, Option<T>>,
    ) -> Self {
        Self { inner: first.chain(second) }
    }
}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.inner.size_hint().0).finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next().and_then(Option::as_mut)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().and_then(Option::as_mut)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}
