use std::iter::FusedIterator;

use super::CircularDeque;

/// An owning iterator over the elements of a `CircularDeque`.
///
/// This `struct` is created by the [`into_iter`] method on [`CircularDeque`] (provided by the
/// [`IntoIterator`] trait). See its documentation for more information.
///
/// [`into_iter`]: CircularDeque::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
#[derive(Debug, Clone)]
pub struct IntoIter<T> {
    inner: CircularDeque<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(inner: CircularDeque<T>) -> Self {
        IntoIter { inner }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
