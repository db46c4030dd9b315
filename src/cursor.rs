use super::{CircularDeque, DequeError, Result};

/// A front-to-back cursor over a [`CircularDeque`].
///
/// This `struct` is created by the [`cursor`] method on [`CircularDeque`]. Unlike [`Iter`] it
/// does not borrow the deque; every call takes the deque it was created from. If that deque is
/// structurally changed by anything but this cursor's own [`remove`], the next call to [`next`]
/// or [`remove`] fails with [`DequeError::ConcurrentModification`].
///
/// [`cursor`]: CircularDeque::cursor
/// [`Iter`]: crate::Iter
/// [`next`]: Cursor::next
/// [`remove`]: Cursor::remove
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    // slot of the element the next call to next returns
    pos: usize,
    // slot of the element last returned by next, None after a remove
    last_returned: Option<usize>,
    // elements from pos to the back, so the logical index of pos is len - remaining
    remaining: usize,
    expected_mod_count: usize,
}

impl Cursor {
    pub(super) fn new<T>(deque: &CircularDeque<T>) -> Self {
        Self {
            pos: deque.front,
            last_returned: None,
            remaining: deque.len,
            expected_mod_count: deque.mod_count,
        }
    }

    /// Returns `true` if [`next`] has another element to return.
    ///
    /// This does not look at the deque, so a cursor invalidated by a modification may still
    /// report `true`; the following [`next`] then fails.
    ///
    /// [`next`]: Cursor::next
    #[inline]
    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    /// Returns the next element and moves the cursor one step towards the back.
    ///
    /// # Errors
    ///
    /// - [`DequeError::ConcurrentModification`] if `deque` was changed outside of this cursor.
    /// - [`DequeError::NoSuchElement`] if the back has been passed.
    pub fn next<'a, T>(&mut self, deque: &'a CircularDeque<T>) -> Result<&'a T> {
        check_for_comodification(self.expected_mod_count, deque)?;
        if self.remaining == 0 {
            return Err(DequeError::NoSuchElement);
        }
        let slot = self.pos;
        let value = deque.buf[slot].as_ref().ok_or(DequeError::NoSuchElement)?;
        self.last_returned = Some(slot);
        self.pos = deque.wrap_add(slot, 1);
        self.remaining -= 1;
        Ok(value)
    }

    /// Removes the element last returned by [`next`] from the deque and returns it.
    ///
    /// The cursor stays valid and continues with the element after the removed one.
    ///
    /// # Errors
    ///
    /// - [`DequeError::IllegalState`] if [`next`] has not been called since the cursor was
    ///   created or since the last `remove`.
    /// - [`DequeError::ConcurrentModification`] if `deque` was changed outside of this cursor.
    /// - [`DequeError::UnsupportedRemoval`] if the element is no longer the first or the last
    ///   one, which happens when a traversal removes an element after skipping others.
    ///
    /// [`next`]: Cursor::next
    pub fn remove<T>(&mut self, deque: &mut CircularDeque<T>) -> Result<T> {
        let slot = self.last_returned.ok_or(DequeError::IllegalState)?;
        check_for_comodification(self.expected_mod_count, deque)?;
        let value = deque.remove_slot(slot)?;
        // the removal may have shrunk the buffer, so find pos again from its logical index
        self.pos = deque.physical(deque.len - self.remaining);
        self.last_returned = None;
        self.expected_mod_count = deque.mod_count;
        Ok(value)
    }
}

/// A back-to-front cursor over a [`CircularDeque`].
///
/// This `struct` is created by the [`descending_cursor`] method on [`CircularDeque`]. It follows
/// the same rules as [`Cursor`], walking in the other direction.
///
/// [`descending_cursor`]: CircularDeque::descending_cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescendingCursor {
    // slot of the element the next call to next returns, the slot before front once exhausted
    pos: usize,
    last_returned: Option<usize>,
    // elements from the front to pos, so the logical index of pos is remaining - 1
    remaining: usize,
    expected_mod_count: usize,
}

impl DescendingCursor {
    pub(super) fn new<T>(deque: &CircularDeque<T>) -> Self {
        Self {
            pos: deque.last_slot(),
            last_returned: None,
            remaining: deque.len,
            expected_mod_count: deque.mod_count,
        }
    }

    /// Returns `true` if [`next`] has another element to return.
    ///
    /// [`next`]: DescendingCursor::next
    #[inline]
    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    /// Returns the next element and moves the cursor one step towards the front.
    ///
    /// # Errors
    ///
    /// - [`DequeError::ConcurrentModification`] if `deque` was changed outside of this cursor.
    /// - [`DequeError::NoSuchElement`] if the front has been passed.
    pub fn next<'a, T>(&mut self, deque: &'a CircularDeque<T>) -> Result<&'a T> {
        check_for_comodification(self.expected_mod_count, deque)?;
        if self.remaining == 0 {
            return Err(DequeError::NoSuchElement);
        }
        let slot = self.pos;
        let value = deque.buf[slot].as_ref().ok_or(DequeError::NoSuchElement)?;
        self.last_returned = Some(slot);
        self.pos = deque.wrap_sub(slot, 1);
        self.remaining -= 1;
        Ok(value)
    }

    /// Removes the element last returned by [`next`] from the deque and returns it.
    ///
    /// # Errors
    ///
    /// Same as [`Cursor::remove`].
    ///
    /// [`next`]: DescendingCursor::next
    pub fn remove<T>(&mut self, deque: &mut CircularDeque<T>) -> Result<T> {
        let slot = self.last_returned.ok_or(DequeError::IllegalState)?;
        check_for_comodification(self.expected_mod_count, deque)?;
        let value = deque.remove_slot(slot)?;
        self.pos = deque.wrap_sub(deque.physical(self.remaining), 1);
        self.last_returned = None;
        self.expected_mod_count = deque.mod_count;
        Ok(value)
    }
}

#[inline]
fn check_for_comodification<T>(expected: usize, deque: &CircularDeque<T>) -> Result<()> {
    if deque.mod_count == expected {
        Ok(())
    } else {
        Err(DequeError::ConcurrentModification)
    }
}
