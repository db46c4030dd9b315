use std::fmt;

/// Shorthand for results of fallible deque and cursor operations.
pub type Result<T, E = DequeError> = core::result::Result<T, E>;

/// The ways an operation on a [`CircularDeque`] or one of its cursors can fail.
///
/// A failing call never changes the deque.
///
/// [`CircularDeque`]: crate::CircularDeque
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DequeError {
    /// Peeking or popping on an empty deque.
    Empty,
    /// A cursor was advanced past its last element.
    NoSuchElement,
    /// The deque was structurally changed by something other than the cursor in use.
    ConcurrentModification,
    /// A cursor's `remove` was called before `next`, or twice without a `next` in between.
    IllegalState,
    /// Removal was requested for a slot that is neither the first nor the last element.
    UnsupportedRemoval,
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DequeError::Empty => "deque is empty",
            DequeError::NoSuchElement => "no more elements in this direction",
            DequeError::ConcurrentModification => "deque was modified outside of this cursor",
            DequeError::IllegalState => "remove called before next or twice in a row",
            DequeError::UnsupportedRemoval => "only the first or last element can be removed",
        })
    }
}

impl std::error::Error for DequeError {}
