//! A double-ended queue backed by a growable ring buffer, with fail-fast cursors.
//!
//! `CircularDeque` keeps its elements in a power-of-two sized buffer of slots. Logical element
//! `i` lives in slot `(front + i) & (capacity - 1)`, so pushing and popping at either end never
//! moves other elements:
//! ```text
//!                 rear                front
//!                  |                    |
//!                  v                    v
//! +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
//! | 6 | 7 | 8 | 9 |   |   |   |   |   | 0 | 1 | 2 | 3 | 4 | 5 |...
//! +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
//! ```
//!
//! The buffer doubles when a push finds it full and halves when a pop leaves it at most a
//! quarter full, but it never gets smaller than [`DEFAULT_CAPACITY`]. Both resizes move the
//! elements so that the front ends up in slot 0.
//!
//! Besides the usual borrowing iterators, the deque hands out [`Cursor`]s and
//! [`DescendingCursor`]s. A cursor does not borrow the deque: it remembers a slot and the
//! deque's modification count, and every call takes the deque as an argument. That makes it
//! possible to change the deque while a traversal is in progress, and the cursor reports
//! [`DequeError::ConcurrentModification`] on its next step instead of yielding stale data. A
//! cursor can also remove the element it last returned, as long as that element is currently
//! at one of the two ends.
//!
//! ```
//! use circdeque::{CircularDeque, DequeError};
//!
//! let mut deque: CircularDeque<i32> = (0..10).collect();
//! let mut cursor = deque.cursor();
//! while cursor.has_next() {
//!     if *cursor.next(&deque)? == 5 {
//!         deque.push_back(99);
//!         assert_eq!(cursor.next(&deque), Err(DequeError::ConcurrentModification));
//!         break;
//!     }
//! }
//! # Ok::<(), DequeError>(())
//! ```

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::ops::{Index, IndexMut, Range};

use std::fmt;
use std::iter::repeat_with;

#[macro_use]
mod macros;

mod cursor;
mod error;
mod into_iter;
mod iter;

pub use cursor::{Cursor, DescendingCursor};
pub use error::{DequeError, Result};
pub use into_iter::IntoIter;
pub use iter::{Iter, IterMut};


/// The smallest capacity a deque ever has. Shrinking stops here.
pub const DEFAULT_CAPACITY: usize = 8;

/// A double-ended queue implemented with a growable ring buffer.
///
/// See the [module-level documentation](./index.html) for more details.
pub struct CircularDeque<T> {
    // Front is the slot of the first element, rear the slot after the last one, which is where
    // push_back writes. front == rear both when the deque is empty and when it is full, len
    // tells the two apart.
    // Slots outside of the len elements starting at front are always None.
    // buf.len() is a power of two and >= DEFAULT_CAPACITY.
    buf: Box<[Option<T>]>,
    front: usize,
    rear: usize,
    len: usize,
    // Bumped on every structural change, checked by cursors.
    mod_count: usize,
}

impl<T> CircularDeque<T> {
    /// Creates an empty deque with [`DEFAULT_CAPACITY`].
    ///
    /// # Examples
    ///
    /// ```
    /// use circdeque::CircularDeque;
    ///
    /// let deque: CircularDeque<i32> = CircularDeque::new();
    /// assert_eq!(deque.capacity(), 8);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty deque with space for at least `capacity` elements.
    ///
    /// The capacity is rounded up to a power of two and to at least [`DEFAULT_CAPACITY`]. Note
    /// that popping may later shrink the buffer below the requested capacity.
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity overflows a `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circdeque::CircularDeque;
    ///
    /// let deque: CircularDeque<i32> = CircularDeque::with_capacity(10);
    /// assert_eq!(deque.capacity(), 16);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = capacity
            .max(DEFAULT_CAPACITY)
            .checked_next_power_of_two()
            .unwrap_or_else(|| capacity_overflow());
        Self { buf: allocate(cap), front: 0, rear: 0, len: 0, mod_count: 0 }
    }

    /// Returns the number of elements the deque can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap()
    }

    /// Returns the number of elements in the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let deque = CircularDeque::from([1, 2, 3]);
    /// assert_eq!(deque.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the deque is empty or not.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let mut deque = CircularDeque::new();
    /// assert!(deque.is_empty());
    /// deque.push_back(42);
    /// assert!(!deque.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Provides a reference to the element at the given index.
    ///
    /// Element at index 0 is the front of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let deque = CircularDeque::from([1, 2, 3]);
    /// assert_eq!(deque.get(1), Some(&2));
    /// assert_eq!(deque.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            self.buf[self.physical(index)].as_ref()
        } else {
            None
        }
    }

    /// Provides a mutable reference to the element at the given index.
    ///
    /// Element at index 0 is the front of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let mut deque = CircularDeque::from([1, 2, 3]);
    /// if let Some(el) = deque.get_mut(1) {
    ///     *el += 40;
    /// }
    /// assert_eq!(deque.get(1), Some(&42));
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            let slot = self.physical(index);
            self.buf[slot].as_mut()
        } else {
            None
        }
    }

    /// Returns `true` if the deque contains an element equal to the given value.
    ///
    /// This operation is *O(n)*.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let deque = CircularDeque::from([0, 1]);
    /// assert!(deque.contains(&1));
    /// assert!(!deque.contains(&4));
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|el| el == x)
    }

    /// Provides a reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::{CircularDeque, DequeError};
    /// let mut deque = CircularDeque::new();
    /// assert_eq!(deque.front(), Err(DequeError::Empty));
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque.front(), Ok(&1));
    /// ```
    pub fn front(&self) -> Result<&T> {
        self.get(0).ok_or(DequeError::Empty)
    }

    /// Provides a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.get_mut(0).ok_or(DequeError::Empty)
    }

    /// Provides a reference to the back element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::{CircularDeque, DequeError};
    /// let mut deque = CircularDeque::new();
    /// assert_eq!(deque.back(), Err(DequeError::Empty));
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque.back(), Ok(&2));
    /// ```
    pub fn back(&self) -> Result<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last)).ok_or(DequeError::Empty)
    }

    /// Provides a mutable reference to the back element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let mut deque = CircularDeque::from([1, 2]);
    /// *deque.back_mut()? += 10;
    /// assert_eq!(deque, [1, 12]);
    /// # Ok::<(), circdeque::DequeError>(())
    /// ```
    pub fn back_mut(&mut self) -> Result<&mut T> {
        match self.len.checked_sub(1) {
            Some(last) => self.get_mut(last).ok_or(DequeError::Empty),
            None => Err(DequeError::Empty),
        }
    }

    /// Prepends an element to the front of the deque, doubling the buffer first if it is full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let mut deque = CircularDeque::new();
    /// deque.push_front(1);
    /// deque.push_front(2);
    /// deque.push_front(3);
    /// assert_eq!(deque, [3, 2, 1]);
    /// ```
    pub fn push_front(&mut self, value: T) {
        if self.is_full() {
            self.grow();
        }
        self.front = self.wrap_sub(self.front, 1);
        self.buf[self.front] = Some(value);
        self.len += 1;
        self.bump();
    }

    /// Appends an element to the back of the deque, doubling the buffer first if it is full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let mut deque = CircularDeque::new();
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// deque.push_back(3);
    /// assert_eq!(deque, [1, 2, 3]);
    /// ```
    pub fn push_back(&mut self, value: T) {
        if self.is_full() {
            self.grow();
        }
        let rear = self.rear;
        self.buf[rear] = Some(value);
        self.rear = self.wrap_add(rear, 1);
        self.len += 1;
        self.bump();
    }

    /// Removes the first element and returns it.
    ///
    /// If this leaves the buffer at most a quarter full it is halved, unless it is already at
    /// [`DEFAULT_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::{CircularDeque, DequeError};
    /// let mut deque = CircularDeque::from([1, 2]);
    /// assert_eq!(deque.pop_front(), Ok(1));
    /// assert_eq!(deque.pop_front(), Ok(2));
    /// assert_eq!(deque.pop_front(), Err(DequeError::Empty));
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(DequeError::Empty);
        }
        let front = self.front;
        let value = self.buf[front].take().ok_or(DequeError::Empty)?;
        self.front = self.wrap_add(front, 1);
        self.len -= 1;
        self.bump();
        self.shrink_if_sparse();
        Ok(value)
    }

    /// Removes the last element and returns it.
    ///
    /// If this leaves the buffer at most a quarter full it is halved, unless it is already at
    /// [`DEFAULT_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Empty`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::{CircularDeque, DequeError};
    /// let mut deque = CircularDeque::from([1, 2]);
    /// assert_eq!(deque.pop_back(), Ok(2));
    /// assert_eq!(deque.pop_back(), Ok(1));
    /// assert_eq!(deque.pop_back(), Err(DequeError::Empty));
    /// ```
    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(DequeError::Empty);
        }
        let last = self.last_slot();
        let value = self.buf[last].take().ok_or(DequeError::Empty)?;
        self.rear = last;
        self.len -= 1;
        self.bump();
        self.shrink_if_sparse();
        Ok(value)
    }

    /// Clears the deque, removing all elements. The capacity is left as it is.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let mut deque = CircularDeque::new();
    /// deque.push_back(1);
    /// deque.clear();
    /// assert!(deque.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.buf.iter_mut().for_each(|slot| *slot = None);
        self.front = 0;
        self.rear = 0;
        self.len = 0;
        self.bump();
    }

    /// Returns a front-to-back iterator over the deque.
    ///
    /// The iterator borrows the deque, so it can not observe modifications. Use [`cursor`] to
    /// traverse while changing the deque.
    ///
    /// [`cursor`]: CircularDeque::cursor
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let deque = CircularDeque::from([1, 2, 3]);
    /// let mut iter = deque.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let (first, second) = self.slot_ranges();
        Iter::new(self.buf[first].iter(), self.buf[second].iter())
    }

    /// Returns a front-to-back iterator over the deque that returns mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let mut deque = CircularDeque::from([1, 2, 3]);
    /// for el in deque.iter_mut() {
    ///     *el += 10;
    /// }
    /// assert_eq!(deque, [11, 12, 13]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (first, second) = self.slot_ranges();
        // first always starts at front and second always ends before it
        let (head, tail) = self.buf.split_at_mut(first.start);
        IterMut::new(tail[..first.len()].iter_mut(), head[second].iter_mut())
    }

    /// Returns a front-to-back cursor over the deque.
    ///
    /// The cursor fails with [`DequeError::ConcurrentModification`] once the deque has been
    /// changed by anything other than the cursor itself.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let mut deque = CircularDeque::from([1, 2, 3]);
    /// let mut cursor = deque.cursor();
    /// assert_eq!(cursor.next(&deque)?, &1);
    /// assert_eq!(cursor.remove(&mut deque)?, 1);
    /// assert_eq!(cursor.next(&deque)?, &2);
    /// assert_eq!(deque, [2, 3]);
    /// # Ok::<(), circdeque::DequeError>(())
    /// ```
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self)
    }

    /// Returns a back-to-front cursor over the deque.
    ///
    /// See [`cursor`] for the modification rules.
    ///
    /// [`cursor`]: CircularDeque::cursor
    ///
    /// # Examples
    ///
    /// ```
    /// # use circdeque::CircularDeque;
    /// let deque = CircularDeque::from([1, 2, 3]);
    /// let mut cursor = deque.descending_cursor();
    /// let mut seen = Vec::new();
    /// while cursor.has_next() {
    ///     seen.push(*cursor.next(&deque)?);
    /// }
    /// assert_eq!(seen, [3, 2, 1]);
    /// # Ok::<(), circdeque::DequeError>(())
    /// ```
    pub fn descending_cursor(&self) -> DescendingCursor {
        DescendingCursor::new(self)
    }

    /// Removes the element in the given physical slot, which must be the first or the last one.
    fn remove_slot(&mut self, slot: usize) -> Result<T> {
        if slot == self.front {
            self.pop_front()
        } else if slot == self.last_slot() {
            self.pop_back()
        } else {
            Err(DequeError::UnsupportedRemoval)
        }
    }

    #[inline]
    fn cap(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.len == self.cap()
    }

    #[inline]
    fn bump(&mut self) {
        self.mod_count = self.mod_count.wrapping_add(1);
    }

    #[inline]
    fn wrap_add(&self, slot: usize, n: usize) -> usize {
        slot.wrapping_add(n) & (self.cap() - 1)
    }

    #[inline]
    fn wrap_sub(&self, slot: usize, n: usize) -> usize {
        slot.wrapping_sub(n) & (self.cap() - 1)
    }

    /// Slot of the element at logical `index`.
    #[inline]
    fn physical(&self, index: usize) -> usize {
        self.wrap_add(self.front, index)
    }

    #[inline]
    fn last_slot(&self) -> usize {
        self.wrap_sub(self.rear, 1)
    }

    /// The occupied slots in logical order: first from front towards the end of the buffer,
    /// then the part that wrapped around to the start.
    fn slot_ranges(&self) -> (Range<usize>, Range<usize>) {
        let first_len = self.len.min(self.cap() - self.front);
        (self.front..self.front + first_len, 0..self.len - first_len)
    }

    /// Double the buffer size. This method is inline(never), so we expect it to only be called in
    /// cold paths.
    #[inline(never)]
    fn grow(&mut self) {
        debug_assert!(self.is_full());
        let new_cap = self.cap().checked_mul(2).unwrap_or_else(|| capacity_overflow());
        self.resize(new_cap);
        debug_assert!(!self.is_full());
    }

    fn shrink_if_sparse(&mut self) {
        let cap = self.cap();
        if self.len <= cap / 4 && cap > DEFAULT_CAPACITY {
            self.resize(cap / 2);
        }
    }

    /// Moves all elements into a new buffer of `new_cap` slots, with the front in slot 0.
    fn resize(&mut self, new_cap: usize) {
        debug_assert!(new_cap.is_power_of_two());
        debug_assert!(new_cap > self.len);

        let mut buf = allocate(new_cap);
        for (index, slot) in buf.iter_mut().take(self.len).enumerate() {
            let old = self.physical(index);
            *slot = self.buf[old].take();
        }
        self.buf = buf;
        self.front = 0;
        self.rear = self.len;
        self.bump();
    }
}

impl<T: Clone> Clone for CircularDeque<T> {
    fn clone(&self) -> Self {
        let mut deque = Self::with_capacity(self.len);
        deque.extend(self.iter().cloned());
        deque
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T> Default for CircularDeque<T> {
    /// Creates an empty deque.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for CircularDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push_back(element);
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for CircularDeque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> From<Vec<T>> for CircularDeque<T> {
    /// Moves the elements of a [`Vec<T>`] into a new [`CircularDeque<T>`].
    ///
    /// [`CircularDeque<T>`]: crate::CircularDeque
    fn from(other: Vec<T>) -> Self {
        let mut deque = Self::with_capacity(other.len());
        deque.extend(other);
        deque
    }
}

impl<T> From<CircularDeque<T>> for Vec<T> {
    /// Turns a [`CircularDeque<T>`] into a [`Vec<T>`] in front-to-back order.
    ///
    /// [`CircularDeque<T>`]: crate::CircularDeque
    fn from(other: CircularDeque<T>) -> Self {
        other.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for CircularDeque<T> {
    /// Converts a `[T; N]` into a `CircularDeque<T>`.
    fn from(arr: [T; N]) -> Self {
        let mut deque = Self::with_capacity(N);
        deque.extend(arr);
        deque
    }
}

impl<T> FromIterator<T> for CircularDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut deque = Self::with_capacity(lower);
        deque.extend(iter);
        deque
    }
}

impl<T: Hash> Hash for CircularDeque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|elem| elem.hash(state));
    }
}

impl<T> Index<usize> for CircularDeque<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        self.get(index).unwrap_or_else(|| index_out_of_bounds(self.len, index))
    }
}

impl<T> IndexMut<usize> for CircularDeque<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        self.get_mut(index).unwrap_or_else(|| index_out_of_bounds(len, index))
    }
}

impl<T> IntoIterator for CircularDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the deque into a front-to-back iterator yielding elements by value.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a CircularDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut CircularDeque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T: PartialOrd> PartialOrd for CircularDeque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for CircularDeque<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: PartialEq> PartialEq for CircularDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularDeque<T> {}

__impl_slice_eq! { [] CircularDeque<T>, Vec<U>, }
__impl_slice_eq! { [] CircularDeque<T>, &[U], }
__impl_slice_eq! { [] CircularDeque<T>, &mut [U], }
__impl_slice_eq! { [const N: usize] CircularDeque<T>, [U; N], }
__impl_slice_eq! { [const N: usize] CircularDeque<T>, &[U; N], }
__impl_slice_eq! { [const N: usize] CircularDeque<T>, &mut [U; N], }

fn allocate<T>(cap: usize) -> Box<[Option<T>]> {
    repeat_with(|| None).take(cap).collect()
}

fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

fn index_out_of_bounds(len: usize, index: usize) -> ! {
    panic!("index out of bounds: the len is {} but the index is {}", len, index);
}
