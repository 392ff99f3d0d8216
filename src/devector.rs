//! A contiguous growable array type with spare capacity at both ends.
//!
//! Like a vector, a [`Devector`] stores its elements in a single
//! heap-allocated buffer, so the whole slice API is available through
//! [`Deref`]. Unlike a vector, the live elements may sit anywhere inside
//! that buffer: the slots before them form the *front* spare capacity, the
//! slots after them the *back* spare capacity. Pushing onto whichever end
//! has a spare slot is O(1), and growth at either end is amortized O(1).
//!
//! Insertion and erasure at arbitrary positions shift whichever side has
//! fewer elements to move, so operations near the front are as cheap as
//! operations near the back.
//!
//! ```
//! use devector::Devector;
//!
//! let mut d = Devector::new();
//! d.push_back(2);
//! d.push_front(1);
//! d.push_back(3);
//! assert_eq!(d, [1, 2, 3]);
//! ```
//!
//! The container is generic over an allocator; see [`Devector::new_in`]
//! and friends. With the default [`Global`] allocator it behaves just
//! like the standard library collections.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem::{self, ManuallyDrop};
use core::ops::{Bound, Deref, DerefMut, Index, IndexMut, Range, RangeBounds};
use core::ptr::{self, NonNull};
use core::slice::{self, SliceIndex};

use allocator_api2::alloc::{Allocator, Global};

use crate::raw::{max_capacity, RawBuffer, TryReserveError};

/// The smallest non-zero capacity a growth operation will allocate.
const MIN_CAP: usize = 4;

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

#[cold]
#[inline(never)]
fn handle_reserve_error(err: TryReserveError) -> ! {
    match err {
        TryReserveError::CapacityOverflow => capacity_overflow(),
        TryReserveError::AllocError { layout } => alloc::alloc::handle_alloc_error(layout),
    }
}

fn normalize_range<R: RangeBounds<usize>>(range: R, len: usize) -> Range<usize> {
    #[cold]
    #[inline(never)]
    fn bad_range(start: usize, end: usize, len: usize) -> ! {
        panic!("range {}..{} is invalid for a length of {}", start, end, len);
    }

    let start = match range.start_bound() {
        Bound::Included(&i) => i,
        Bound::Excluded(&i) => i + 1,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&i) => i + 1,
        Bound::Excluded(&i) => i,
        Bound::Unbounded => len,
    };

    if start > end || end > len {
        bad_range(start, end, len);
    }

    Range { start, end }
}

/// A contiguous growable array type with amortized O(1) insertion at both
/// ends.
///
/// Generic over the allocator type `A`, which defaults to [`Global`].
///
/// See the [module-level documentation](crate::devector) for more.
pub struct Devector<T, A: Allocator = Global> {
    buf: RawBuffer<T, A>,
    front: usize,
    len: usize,
}

unsafe impl<T: Send, A: Allocator + Send> Send for Devector<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Devector<T, A> {}

impl<T> Devector<T> {
    /// Constructs a new, empty `Devector<T>`. No memory is allocated
    /// until elements are inserted.
    ///
    /// # Examples
    /// ```
    /// let d = devector::Devector::<u32>::new();
    /// assert_eq!(d.len(), 0);
    /// assert_eq!(d.capacity(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Constructs a new, empty `Devector<T>` with spare capacity for at
    /// least `capacity` elements at the back.
    ///
    /// # Panics
    /// Panics if the required allocation exceeds the maximum supported
    /// size, or if the allocator reports a failure.
    ///
    /// # Examples
    /// ```
    /// let d = devector::Devector::<u32>::with_capacity(10);
    /// assert_eq!(d.capacity(), 10);
    /// assert_eq!(d.back_free_capacity(), 10);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Constructs a new, empty `Devector<T>` with the given spare
    /// capacity at the front and at the back.
    ///
    /// # Panics
    /// Panics if the required allocation exceeds the maximum supported
    /// size, or if the allocator reports a failure.
    ///
    /// # Examples
    /// ```
    /// let d = devector::Devector::<u32>::with_free_capacity(3, 5);
    /// assert_eq!(d.capacity(), 8);
    /// assert_eq!(d.front_free_capacity(), 3);
    /// assert_eq!(d.back_free_capacity(), 5);
    /// ```
    #[inline]
    pub fn with_free_capacity(front: usize, back: usize) -> Self {
        Self::with_free_capacity_in(front, back, Global)
    }
}

impl<T: Clone> Devector<T> {
    /// Constructs a `Devector<T>` holding `count` clones of `value`.
    ///
    /// The [`devector!`](crate::devector!) macro expands to this for the
    /// `devector![value; count]` form.
    ///
    /// # Examples
    /// ```
    /// let d = devector::Devector::from_elem(7, 5);
    /// assert_eq!(d, [7, 7, 7, 7, 7]);
    /// ```
    pub fn from_elem(value: T, count: usize) -> Self {
        let mut dv = Self::with_capacity(count);
        dv.extend(core::iter::repeat(value).take(count));
        dv
    }
}

impl<T, A: Allocator> Devector<T, A> {
    /// Constructs a new, empty `Devector<T, A>` using the given
    /// allocator. No memory is allocated until elements are inserted.
    #[inline]
    pub fn new_in(alloc: A) -> Self {
        Devector {
            buf: RawBuffer::new_in(alloc),
            front: 0,
            len: 0,
        }
    }

    /// Constructs a new, empty `Devector<T, A>` with spare capacity for
    /// at least `capacity` elements at the back, using the given
    /// allocator.
    ///
    /// # Panics
    /// Panics if the required allocation exceeds the maximum supported
    /// size, or if the allocator reports a failure.
    #[inline]
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self::with_free_capacity_in(0, capacity, alloc)
    }

    /// Constructs a new, empty `Devector<T, A>` with the given spare
    /// capacity at the front and at the back, using the given allocator.
    ///
    /// # Panics
    /// Panics if the required allocation exceeds the maximum supported
    /// size, or if the allocator reports a failure.
    pub fn with_free_capacity_in(front: usize, back: usize, alloc: A) -> Self {
        let capacity = match front.checked_add(back) {
            Some(capacity) => capacity,
            None => capacity_overflow(),
        };
        let buf = match RawBuffer::try_with_capacity_in(capacity, alloc) {
            Ok(buf) => buf,
            Err(err) => handle_reserve_error(err),
        };
        Devector {
            buf,
            front: if mem::size_of::<T>() == 0 { 0 } else { front },
            len: 0,
        }
    }

    /// Returns a reference to the underlying allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Returns the number of elements in the devector.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the devector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the total number of elements the devector can hold
    /// without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the number of elements that can be pushed onto the front
    /// without reallocating.
    ///
    /// For zero-sized element types, all spare capacity is reported at
    /// the back.
    #[inline]
    pub fn front_free_capacity(&self) -> usize {
        self.front
    }

    /// Returns the number of elements that can be pushed onto the back
    /// without reallocating.
    #[inline]
    pub fn back_free_capacity(&self) -> usize {
        self.capacity() - self.front - self.len
    }

    /// Returns the largest capacity this devector can ever have, as
    /// limited by the element size. Requests beyond this limit fail with
    /// [`TryReserveError::CapacityOverflow`].
    #[inline]
    pub fn max_capacity() -> usize {
        max_capacity::<T>()
    }

    /// Returns a raw pointer to the first element.
    ///
    /// The caller must ensure the devector outlives the pointer, and
    /// that it is not reallocated while the pointer is in use.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.base().wrapping_add(self.front)
    }

    /// Returns a raw mutable pointer to the first element.
    ///
    /// The caller must ensure the devector outlives the pointer, and
    /// that it is not reallocated while the pointer is in use.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.base().wrapping_add(self.front)
    }

    /// Extracts a slice containing the entire devector.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice of the entire devector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Returns a reference to the element at the specified index, or
    /// [`None`] if the index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// let d = devector::devector![1, 2, 3];
    /// assert_eq!(d.get(1), Some(&2));
    /// assert_eq!(d.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns a mutable reference to the element at the specified
    /// index, or [`None`] if the index is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Returns a reference to the first element, or [`None`] if the
    /// devector is empty.
    ///
    /// # Examples
    /// ```
    /// let d = devector::devector![1, 2, 3];
    /// assert_eq!(d.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns a mutable reference to the first element, or [`None`] if
    /// the devector is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns a reference to the last element, or [`None`] if the
    /// devector is empty.
    ///
    /// # Examples
    /// ```
    /// let d = devector::devector![1, 2, 3];
    /// assert_eq!(d.back(), Some(&3));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns a mutable reference to the last element, or [`None`] if
    /// the devector is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Ensures there is spare capacity for at least `additional` more
    /// elements at the front.
    ///
    /// Reallocates only if the requested spare capacity is not already
    /// available; the back spare capacity is carried over unchanged.
    /// Over-allocates geometrically, so repeated reservations remain
    /// amortized O(1) per reserved slot.
    ///
    /// # Panics
    /// Panics if the new capacity exceeds the maximum supported size, or
    /// if the allocator reports a failure.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3];
    /// d.reserve_front(10);
    /// assert!(d.front_free_capacity() >= 10);
    /// assert_eq!(d, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn reserve_front(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve_front(additional) {
            handle_reserve_error(err);
        }
    }

    /// Ensures there is spare capacity for at least `additional` more
    /// elements at the back.
    ///
    /// Reallocates only if the requested spare capacity is not already
    /// available; the front spare capacity is carried over unchanged.
    /// Over-allocates geometrically, so repeated reservations remain
    /// amortized O(1) per reserved slot.
    ///
    /// # Panics
    /// Panics if the new capacity exceeds the maximum supported size, or
    /// if the allocator reports a failure.
    #[inline]
    pub fn reserve_back(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve_back(additional) {
            handle_reserve_error(err);
        }
    }

    /// Fallible version of [`reserve_front`](Devector::reserve_front).
    ///
    /// On error, the devector is left untouched.
    pub fn try_reserve_front(&mut self, additional: usize) -> Result<(), TryReserveError> {
        if mem::size_of::<T>() == 0 {
            return if additional <= usize::MAX - self.len {
                Ok(())
            } else {
                Err(TryReserveError::CapacityOverflow)
            };
        }

        let spare = self.front;
        if spare >= additional {
            return Ok(());
        }

        let growth = Self::growth_amount(self.capacity(), additional - spare);
        let new_cap = self
            .capacity()
            .checked_add(growth)
            .ok_or(TryReserveError::CapacityOverflow)?;
        unsafe { self.try_reallocate(new_cap, self.front + growth) }
    }

    /// Fallible version of [`reserve_back`](Devector::reserve_back).
    ///
    /// On error, the devector is left untouched.
    ///
    /// # Examples
    /// ```
    /// use devector::{Devector, TryReserveError};
    ///
    /// let mut d = Devector::<u32>::new();
    /// assert_eq!(
    ///     d.try_reserve_back(usize::MAX / 2),
    ///     Err(TryReserveError::CapacityOverflow),
    /// );
    /// assert_eq!(d.capacity(), 0);
    /// ```
    pub fn try_reserve_back(&mut self, additional: usize) -> Result<(), TryReserveError> {
        if mem::size_of::<T>() == 0 {
            return if additional <= usize::MAX - self.len {
                Ok(())
            } else {
                Err(TryReserveError::CapacityOverflow)
            };
        }

        let spare = self.back_free_capacity();
        if spare >= additional {
            return Ok(());
        }

        let growth = Self::growth_amount(self.capacity(), additional - spare);
        let new_cap = self
            .capacity()
            .checked_add(growth)
            .ok_or(TryReserveError::CapacityOverflow)?;
        unsafe { self.try_reallocate(new_cap, self.front) }
    }

    /// Shrinks the capacity to match the current length, reallocating
    /// unless the devector is already exactly full.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::Devector::with_capacity(16);
    /// d.extend(0..5);
    /// d.shrink_to_fit();
    /// assert_eq!(d.capacity(), 5);
    /// assert_eq!(d, [0, 1, 2, 3, 4]);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        if mem::size_of::<T>() == 0 || self.capacity() == self.len {
            return;
        }

        unsafe {
            if self.len == 0 {
                self.buf.replace(NonNull::dangling(), 0);
                self.front = 0;
            } else if let Err(err) = self.try_reallocate(self.len, 0) {
                handle_reserve_error(err);
            }
        }
    }

    /// Prepends an element to the front of the devector.
    ///
    /// # Panics
    /// Panics if the new capacity exceeds the maximum supported size, or
    /// if the allocator reports a failure.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![2, 3];
    /// d.push_front(1);
    /// assert_eq!(d, [1, 2, 3]);
    /// ```
    pub fn push_front(&mut self, value: T) {
        if self.front_free_capacity() == 0 {
            if let Err(err) = self.try_ensure_front(1) {
                handle_reserve_error(err);
            }
        }

        unsafe {
            if mem::size_of::<T>() != 0 {
                self.front -= 1;
            }
            self.base().add(self.front).write(value);
        }
        self.len += 1;
    }

    /// Appends an element to the back of the devector.
    ///
    /// # Panics
    /// Panics if the new capacity exceeds the maximum supported size, or
    /// if the allocator reports a failure.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2];
    /// d.push_back(3);
    /// assert_eq!(d, [1, 2, 3]);
    /// ```
    pub fn push_back(&mut self, value: T) {
        if self.back_free_capacity() == 0 {
            if let Err(err) = self.try_ensure_back(1) {
                handle_reserve_error(err);
            }
        }

        unsafe {
            self.base().add(self.front + self.len).write(value);
        }
        self.len += 1;
    }

    /// Removes the first element and returns it, or [`None`] if the
    /// devector is empty.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3];
    /// assert_eq!(d.pop_front(), Some(1));
    /// assert_eq!(d, [2, 3]);
    /// ```
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        unsafe {
            let value = self.base().add(self.front).read();
            self.advance_front(1);
            self.len -= 1;
            Some(value)
        }
    }

    /// Removes the last element and returns it, or [`None`] if the
    /// devector is empty.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3];
    /// assert_eq!(d.pop_back(), Some(3));
    /// assert_eq!(d, [1, 2]);
    /// ```
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        unsafe { Some(self.base().add(self.front + self.len).read()) }
    }

    /// Inserts an element at position `index`, shifting whichever side
    /// of the devector has fewer elements to move.
    ///
    /// Inserting at position 0 or at `len()` is O(1) whenever the
    /// corresponding side has a spare slot.
    ///
    /// # Panics
    /// Panics if `index > len`, if the new capacity exceeds the maximum
    /// supported size, or if the allocator reports a failure.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3, 4, 5];
    /// d.insert(2, 99);
    /// assert_eq!(d, [1, 2, 99, 3, 4, 5]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        #[cold]
        #[inline(never)]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!(
                "insertion index (is {}) should be <= len (is {})",
                index, len
            );
        }

        if index > self.len {
            assert_failed(index, self.len);
        }

        if index == 0 {
            return self.push_front(value);
        }
        if index == self.len {
            return self.push_back(value);
        }

        unsafe {
            let gap = self.make_gap(index, 1);
            gap.write(value);
        }
        self.len += 1;
    }

    /// Inserts every element yielded by `iterable` at position `index`,
    /// preserving both the existing order and the order of the new
    /// elements.
    ///
    /// If the iterator reports an exact size, a single gap of that size
    /// is opened and filled in one pass. Otherwise the new elements are
    /// collected at the back and rotated into position.
    ///
    /// # Panics
    /// Panics if `index > len`, if the new capacity exceeds the maximum
    /// supported size, or if the allocator reports a failure.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 6, 7];
    /// d.insert_from_iter(2, [3, 4, 5]);
    /// assert_eq!(d, [1, 2, 3, 4, 5, 6, 7]);
    /// ```
    pub fn insert_from_iter<I: IntoIterator<Item = T>>(&mut self, index: usize, iterable: I) {
        #[cold]
        #[inline(never)]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!(
                "insertion index (is {}) should be <= len (is {})",
                index, len
            );
        }

        if index > self.len {
            assert_failed(index, self.len);
        }

        let mut iter = iterable.into_iter();
        let (lower, upper) = iter.size_hint();
        let mut inserted = 0;

        if upper == Some(lower) && lower > 0 {
            unsafe {
                self.make_gap(index, lower);
                let mut guard = GapGuard {
                    dv: self,
                    index,
                    gap: lower,
                    filled: 0,
                };
                while guard.filled < guard.gap {
                    match iter.next() {
                        Some(value) => guard.fill_next(value),
                        None => break,
                    }
                }
                inserted = guard.filled;
                if guard.filled == guard.gap {
                    guard.commit();
                } else {
                    guard.commit_partial();
                }
            }
        }

        // anything the size hint did not account for goes through the back
        let old_len = self.len;
        self.extend(iter);
        let appended = self.len - old_len;
        if appended > 0 {
            self.as_mut_slice()[index + inserted..].rotate_right(appended);
        }
    }

    /// Removes and returns the element at position `index`, closing the
    /// gap by shifting whichever side has fewer elements to move.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3];
    /// assert_eq!(d.remove(0), 1);
    /// assert_eq!(d, [2, 3]);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        #[cold]
        #[inline(never)]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("removal index (is {}) should be < len (is {})", index, len);
        }

        if index >= self.len {
            assert_failed(index, self.len);
        }

        unsafe {
            let p = self.base().add(self.front + index);
            let value = ptr::read(p);

            let before = index;
            let after = self.len - index - 1;
            if before < after {
                let src = self.base().add(self.front);
                ptr::copy(src, src.add(1), before);
                self.advance_front(1);
            } else {
                ptr::copy(p.add(1), p, after);
            }

            self.len -= 1;
            value
        }
    }

    /// Removes and returns the element at position `index` in O(1) by
    /// swapping it with the first element and popping the front. Does
    /// not preserve ordering.
    ///
    /// Returns [`None`] if `index` is out of bounds.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3, 4];
    /// assert_eq!(d.swap_remove_front(2), Some(3));
    /// assert_eq!(d, [2, 1, 4]);
    /// ```
    pub fn swap_remove_front(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        self.as_mut_slice().swap(0, index);
        self.pop_front()
    }

    /// Removes and returns the element at position `index` in O(1) by
    /// swapping it with the last element and popping the back. Does not
    /// preserve ordering.
    ///
    /// Returns [`None`] if `index` is out of bounds.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3, 4];
    /// assert_eq!(d.swap_remove_back(1), Some(2));
    /// assert_eq!(d, [1, 4, 3]);
    /// ```
    pub fn swap_remove_back(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let last = self.len - 1;
        self.as_mut_slice().swap(index, last);
        self.pop_back()
    }

    /// Creates a draining iterator that removes the specified range and
    /// yields the removed items.
    ///
    /// When the iterator is dropped, all remaining elements in the range
    /// are removed and the gap is closed by shifting whichever side has
    /// fewer elements to move. If the iterator is leaked (with
    /// [`core::mem::forget`], for example), it is unspecified how many
    /// elements are removed.
    ///
    /// # Panics
    /// Panics if the range is decreasing or if its end is greater than
    /// the length of the devector.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::Devector::from_elem(7, 5);
    /// d.drain(1..3);
    /// assert_eq!(d, [7, 7, 7]);
    /// ```
    pub fn drain<R: RangeBounds<usize>>(&mut self, range: R) -> Drain<'_, T, A> {
        let Range { start, end } = normalize_range(range, self.len);

        // shorten the live range so a leaked Drain cannot expose the gap
        let original_len = self.len;
        self.len = start;

        Drain {
            parent: self,
            original_len,
            target_start: start,
            target_end: end,
            front_index: start,
            back_index: end,
        }
    }

    /// Shortens the devector to `len` elements, dropping the excess from
    /// the back. Has no effect if `len` is not less than the current
    /// length.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3, 4];
    /// d.truncate(2);
    /// assert_eq!(d, [1, 2]);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        unsafe {
            let excess = self.len - len;
            let p = self.base().add(self.front + len);
            self.len = len;
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(p, excess));
        }
    }

    /// Shortens the devector to `len` elements, dropping the excess from
    /// the front. Has no effect if `len` is not less than the current
    /// length.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3, 4];
    /// d.truncate_front(2);
    /// assert_eq!(d, [3, 4]);
    /// ```
    pub fn truncate_front(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        unsafe {
            let excess = self.len - len;
            let p = self.base().add(self.front);
            self.advance_front(excess);
            self.len = len;
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(p, excess));
        }
    }

    /// Clears the devector, dropping all values. The allocated capacity
    /// is retained.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, removes all elements `e` such that `f(&e)`
    /// returns `false`. This method operates in place, visiting each
    /// element exactly once in the original order, and preserves the
    /// order of the retained elements.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3, 4];
    /// d.retain(|&x| x % 2 == 0);
    /// assert_eq!(d, [2, 4]);
    /// ```
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut f: F) {
        let len = self.len;
        let mut removed = 0;
        {
            let slice = self.as_mut_slice();
            for i in 0..len {
                if !f(&slice[i]) {
                    removed += 1;
                } else if removed > 0 {
                    slice.swap(i - removed, i);
                }
            }
        }
        if removed > 0 {
            self.truncate(len - removed);
        }
    }

    /// Replaces the contents with the elements yielded by `iterable`.
    ///
    /// Elements that fit within the current length are overwritten in
    /// place; any excess new elements are pushed onto the back, and any
    /// excess old elements are dropped. The allocated capacity is reused
    /// where possible.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3, 4, 5];
    /// d.assign_iter([9, 8]);
    /// assert_eq!(d, [9, 8]);
    /// ```
    pub fn assign_iter<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        let mut iter = iterable.into_iter();
        let mut kept = 0;

        while kept < self.len {
            match iter.next() {
                Some(value) => {
                    self.as_mut_slice()[kept] = value;
                    kept += 1;
                }
                None => {
                    self.truncate(kept);
                    return;
                }
            }
        }

        for value in iter {
            self.push_back(value);
        }
    }

    #[inline]
    fn base(&self) -> *mut T {
        self.buf.ptr()
    }

    #[inline]
    fn advance_front(&mut self, n: usize) {
        if mem::size_of::<T>() != 0 {
            self.front += n;
        }
    }

    fn growth_amount(capacity: usize, needed: usize) -> usize {
        needed
            .max(capacity / 2)
            .max(MIN_CAP.saturating_sub(capacity))
    }

    /// Moves the live elements so that they start at `new_front`.
    ///
    /// # Safety
    /// `new_front + self.len` must not exceed the capacity.
    unsafe fn shift_live(&mut self, new_front: usize) {
        debug_assert!(new_front + self.len <= self.capacity());
        if new_front != self.front && self.len > 0 {
            ptr::copy(
                self.base().add(self.front),
                self.base().add(new_front),
                self.len,
            );
        }
        self.front = new_front;
    }

    /// Moves the elements into a fresh allocation of `new_cap` slots,
    /// with the live range starting at `new_front`.
    ///
    /// # Safety
    /// `new_front + self.len` must not exceed `new_cap`, and `T` must
    /// not be zero-sized.
    unsafe fn try_reallocate(
        &mut self,
        new_cap: usize,
        new_front: usize,
    ) -> Result<(), TryReserveError> {
        debug_assert!(new_front + self.len <= new_cap);
        let new_ptr = self.buf.try_allocate_block(new_cap)?;
        if self.len > 0 {
            ptr::copy_nonoverlapping(
                self.base().add(self.front),
                new_ptr.as_ptr().add(new_front),
                self.len,
            );
        }
        self.buf.replace(new_ptr, new_cap);
        self.front = new_front;
        Ok(())
    }

    /// Makes room for at least `needed` more elements at the front,
    /// recentering the live range into back spare capacity when that is
    /// cheaper than reallocating.
    fn try_ensure_front(&mut self, needed: usize) -> Result<(), TryReserveError> {
        if mem::size_of::<T>() == 0 {
            return if needed <= usize::MAX - self.len {
                Ok(())
            } else {
                Err(TryReserveError::CapacityOverflow)
            };
        }

        if self.front >= needed {
            return Ok(());
        }

        let free = self.capacity() - self.len;
        if free >= needed && self.len <= free / 2 {
            let new_front = needed + (free - needed) / 2;
            unsafe { self.shift_live(new_front) };
            return Ok(());
        }

        self.try_reserve_front(needed)
    }

    /// Makes room for at least `needed` more elements at the back,
    /// recentering the live range into front spare capacity when that is
    /// cheaper than reallocating.
    fn try_ensure_back(&mut self, needed: usize) -> Result<(), TryReserveError> {
        if self.back_free_capacity() >= needed {
            return Ok(());
        }

        let free = self.capacity() - self.len;
        if free >= needed && self.len <= free / 2 {
            let new_front = (free - needed) / 2;
            unsafe { self.shift_live(new_front) };
            return Ok(());
        }

        self.try_reserve_back(needed)
    }

    /// Opens a gap of `n` uninitialized slots before position `index`,
    /// shifting whichever side is cheaper to move, or reallocating when
    /// neither side's spare capacity suffices.
    ///
    /// Returns a pointer to the first slot of the gap. `self.len` is
    /// *not* updated; until the caller has initialized the gap and added
    /// `n` to the length, the devector must not be dropped or otherwise
    /// used, so any code that can unwind in between must be covered by a
    /// guard that restores a valid state.
    ///
    /// # Safety
    /// `index` must not exceed `self.len`, and `n` must be non-zero.
    unsafe fn make_gap(&mut self, index: usize, n: usize) -> *mut T {
        debug_assert!(index <= self.len);
        debug_assert!(n > 0);

        if mem::size_of::<T>() == 0 {
            if n > usize::MAX - self.len {
                capacity_overflow();
            }
            return self.base();
        }

        let before = index;
        let after = self.len - index;
        let front_spare = self.front;
        let back_spare = self.back_free_capacity();

        if front_spare >= n && (before <= after || back_spare < n) {
            // shift the elements before the gap toward the front
            let src = self.base().add(self.front);
            ptr::copy(src, src.sub(n), before);
            self.front -= n;
        } else if back_spare >= n {
            // shift the elements after the gap toward the back
            let p = self.base().add(self.front + index);
            ptr::copy(p, p.add(n), after);
        } else if front_spare + back_spare >= n {
            // split the gap across both sides; neither alone suffices
            let take_front = front_spare;
            let take_back = n - take_front;
            let src = self.base().add(self.front);
            ptr::copy(src, src.sub(take_front), before);
            let p = self.base().add(self.front + index);
            ptr::copy(p, p.add(take_back), after);
            self.front -= take_front;
        } else {
            return self.realloc_with_gap(index, n);
        }

        self.base().add(self.front + index)
    }

    /// Moves the elements into a fresh, larger allocation, leaving a gap
    /// of `n` uninitialized slots before position `index`.
    ///
    /// # Safety
    /// Same contract as [`make_gap`](Self::make_gap); additionally, the
    /// total spare capacity must be less than `n` and `T` must not be
    /// zero-sized.
    unsafe fn realloc_with_gap(&mut self, index: usize, n: usize) -> *mut T {
        let free = self.capacity() - self.len;
        debug_assert!(free < n);

        let growth = Self::growth_amount(self.capacity(), n - free);
        let new_cap = match self.capacity().checked_add(growth) {
            Some(new_cap) => new_cap,
            None => capacity_overflow(),
        };
        let new_ptr = match self.buf.try_allocate_block(new_cap) {
            Ok(new_ptr) => new_ptr,
            Err(err) => handle_reserve_error(err),
        };

        let new_front = (new_cap - (self.len + n)) / 2;
        let src = self.base().add(self.front);
        ptr::copy_nonoverlapping(src, new_ptr.as_ptr().add(new_front), index);
        ptr::copy_nonoverlapping(
            src.add(index),
            new_ptr.as_ptr().add(new_front + index + n),
            self.len - index,
        );

        self.buf.replace(new_ptr, new_cap);
        self.front = new_front;
        self.base().add(self.front + index)
    }
}

impl<T: Clone, A: Allocator> Devector<T, A> {
    /// Inserts `count` clones of `value` at position `index`.
    ///
    /// A single gap is opened with the cheapest available shift, then
    /// filled. If a clone panics, the elements inserted so far are
    /// dropped and the original element sequence is restored.
    ///
    /// # Panics
    /// Panics if `index > len`, if the new capacity exceeds the maximum
    /// supported size, or if the allocator reports a failure.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2];
    /// d.insert_fill(1, 3, 9);
    /// assert_eq!(d, [1, 9, 9, 9, 2]);
    /// ```
    pub fn insert_fill(&mut self, index: usize, count: usize, value: T) {
        #[cold]
        #[inline(never)]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!(
                "insertion index (is {}) should be <= len (is {})",
                index, len
            );
        }

        if index > self.len {
            assert_failed(index, self.len);
        }
        if count == 0 {
            return;
        }

        unsafe {
            self.make_gap(index, count);
            let mut guard = GapGuard {
                dv: self,
                index,
                gap: count,
                filled: 0,
            };
            for _ in 1..count {
                guard.fill_next(value.clone());
            }
            guard.fill_next(value);
            guard.commit();
        }
    }

    /// Replaces the contents with `count` clones of `value`, reusing the
    /// allocated capacity where possible.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3];
    /// d.assign(5, 9);
    /// assert_eq!(d, [9, 9, 9, 9, 9]);
    /// ```
    pub fn assign(&mut self, count: usize, value: T) {
        self.assign_iter(core::iter::repeat(value).take(count));
    }

    /// Resizes the devector to `len` elements, cloning `value` onto the
    /// back or dropping elements from the back as needed.
    ///
    /// Equivalent to [`resize_back`](Devector::resize_back).
    #[inline]
    pub fn resize(&mut self, len: usize, value: T) {
        self.resize_back(len, value);
    }

    /// Resizes the devector to `len` elements, cloning `value` onto the
    /// back or dropping elements from the back as needed.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1, 2, 3];
    /// d.resize_back(5, 0);
    /// assert_eq!(d, [1, 2, 3, 0, 0]);
    /// d.resize_back(2, 0);
    /// assert_eq!(d, [1, 2]);
    /// ```
    pub fn resize_back(&mut self, len: usize, value: T) {
        if len <= self.len {
            self.truncate(len);
            return;
        }

        let additional = len - self.len;
        if let Err(err) = self.try_ensure_back(additional) {
            handle_reserve_error(err);
        }
        for _ in 1..additional {
            self.push_back(value.clone());
        }
        self.push_back(value);
    }

    /// Resizes the devector to `len` elements, cloning `value` onto the
    /// front or dropping elements from the front as needed.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![5, 6];
    /// d.resize_front(4, 0);
    /// assert_eq!(d, [0, 0, 5, 6]);
    /// d.resize_front(1, 0);
    /// assert_eq!(d, [6]);
    /// ```
    pub fn resize_front(&mut self, len: usize, value: T) {
        if len <= self.len {
            self.truncate_front(len);
            return;
        }

        let additional = len - self.len;
        if let Err(err) = self.try_ensure_front(additional) {
            handle_reserve_error(err);
        }
        unsafe {
            let start = if mem::size_of::<T>() == 0 {
                0
            } else {
                self.front - additional
            };
            let mut guard = FrontGuard {
                dv: self,
                start,
                filled: 0,
            };
            for _ in 1..additional {
                guard.fill_next(value.clone());
            }
            guard.fill_next(value);
            guard.commit();
        }
    }
}

impl<T, A: Allocator> Devector<T, A> {
    /// Resizes the devector to `len` elements, filling the back with the
    /// results of calling `f` or dropping elements from the back as
    /// needed.
    ///
    /// Equivalent to [`resize_back_with`](Devector::resize_back_with).
    #[inline]
    pub fn resize_with<F: FnMut() -> T>(&mut self, len: usize, f: F) {
        self.resize_back_with(len, f);
    }

    /// Resizes the devector to `len` elements, filling the back with the
    /// results of calling `f` or dropping elements from the back as
    /// needed.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![1];
    /// let mut next = 1;
    /// d.resize_back_with(4, || { next *= 2; next });
    /// assert_eq!(d, [1, 2, 4, 8]);
    /// ```
    pub fn resize_back_with<F: FnMut() -> T>(&mut self, len: usize, mut f: F) {
        if len <= self.len {
            self.truncate(len);
            return;
        }

        let additional = len - self.len;
        if let Err(err) = self.try_ensure_back(additional) {
            handle_reserve_error(err);
        }
        for _ in 0..additional {
            self.push_back(f());
        }
    }

    /// Resizes the devector to `len` elements, filling the front with
    /// the results of calling `f` or dropping elements from the front as
    /// needed. The new elements appear in call order.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![9];
    /// let mut next = 0;
    /// d.resize_front_with(3, || { next += 1; next });
    /// assert_eq!(d, [1, 2, 9]);
    /// ```
    pub fn resize_front_with<F: FnMut() -> T>(&mut self, len: usize, mut f: F) {
        if len <= self.len {
            self.truncate_front(len);
            return;
        }

        let additional = len - self.len;
        if let Err(err) = self.try_ensure_front(additional) {
            handle_reserve_error(err);
        }
        unsafe {
            let start = if mem::size_of::<T>() == 0 {
                0
            } else {
                self.front - additional
            };
            let mut guard = FrontGuard {
                dv: self,
                start,
                filled: 0,
            };
            for _ in 0..additional {
                guard.fill_next(f());
            }
            guard.commit();
        }
    }

    /// Prepends every element yielded by `iterable` to the front, as a
    /// block, preserving the order of the new elements.
    ///
    /// # Examples
    /// ```
    /// let mut d = devector::devector![4, 5];
    /// d.extend_front([1, 2, 3]);
    /// assert_eq!(d, [1, 2, 3, 4, 5]);
    /// ```
    #[inline]
    pub fn extend_front<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        self.insert_from_iter(0, iterable);
    }
}

/// Removes all elements equal to `value` from the devector, preserving
/// the order of the retained elements, and returns how many were
/// removed.
///
/// # Examples
/// ```
/// let mut d = devector::devector![1, 2, 2, 3, 2];
/// assert_eq!(devector::erase(&mut d, &2), 3);
/// assert_eq!(d, [1, 3]);
/// ```
pub fn erase<T: PartialEq, A: Allocator>(dv: &mut Devector<T, A>, value: &T) -> usize {
    erase_if(dv, |item| item == value)
}

/// Removes all elements satisfying `pred` from the devector, preserving
/// the order of the retained elements, and returns how many were
/// removed.
///
/// # Examples
/// ```
/// let mut d = devector::devector![1, 2, 3, 4, 5, 6];
/// assert_eq!(devector::erase_if(&mut d, |&x| x % 2 == 0), 3);
/// assert_eq!(d, [1, 3, 5]);
/// ```
pub fn erase_if<T, A: Allocator, F: FnMut(&T) -> bool>(
    dv: &mut Devector<T, A>,
    mut pred: F,
) -> usize {
    let before = dv.len();
    dv.retain(|item| !pred(item));
    before - dv.len()
}

/// Cleanup guard for filling a freshly opened gap.
///
/// While the gap is only partially initialized, the devector's length
/// still counts the gap's slots as part of the suffix, so the container
/// must not be observed. Dropping the guard (on unwind) destroys what
/// was written and closes the gap, restoring the original element
/// sequence; `commit` and `commit_partial` finalize the insertion
/// instead.
struct GapGuard<'a, T, A: Allocator> {
    dv: &'a mut Devector<T, A>,
    index: usize,
    gap: usize,
    filled: usize,
}

impl<T, A: Allocator> GapGuard<'_, T, A> {
    /// Writes `value` into the next free slot of the gap.
    ///
    /// # Safety
    /// Must not be called more than `gap` times.
    unsafe fn fill_next(&mut self, value: T) {
        debug_assert!(self.filled < self.gap);
        let offset = self.dv.front + self.index + self.filled;
        self.dv.base().add(offset).write(value);
        self.filled += 1;
    }

    fn commit(self) {
        debug_assert_eq!(self.filled, self.gap);
        let mut this = ManuallyDrop::new(self);
        let gap = this.gap;
        this.dv.len += gap;
    }

    /// Closes the unfilled remainder of the gap, keeping what was
    /// written so far.
    fn commit_partial(self) {
        let mut this = ManuallyDrop::new(self);
        let (index, gap, filled) = (this.index, this.gap, this.filled);
        let dv = &mut *this.dv;
        unsafe {
            let start = dv.base().add(dv.front + index);
            ptr::copy(start.add(gap), start.add(filled), dv.len - index);
        }
        dv.len += filled;
    }
}

impl<T, A: Allocator> Drop for GapGuard<'_, T, A> {
    fn drop(&mut self) {
        unsafe {
            let dv = &mut *self.dv;
            let start = dv.base().add(dv.front + self.index);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, self.filled));
            ptr::copy(start.add(self.gap), start, dv.len - self.index);
        }
    }
}

/// Cleanup guard for constructing new elements into front spare
/// capacity.
///
/// The slots being filled sit entirely before the live range, so the
/// devector remains valid throughout; dropping the guard (on unwind)
/// only needs to destroy what was written. `commit` extends the live
/// range over the new elements.
struct FrontGuard<'a, T, A: Allocator> {
    dv: &'a mut Devector<T, A>,
    start: usize,
    filled: usize,
}

impl<T, A: Allocator> FrontGuard<'_, T, A> {
    /// Writes `value` into the next free slot.
    ///
    /// # Safety
    /// Must not be called more than `dv.front - start` times (for
    /// zero-sized element types, there is no limit).
    unsafe fn fill_next(&mut self, value: T) {
        self.dv.base().add(self.start + self.filled).write(value);
        self.filled += 1;
    }

    fn commit(self) {
        let mut this = ManuallyDrop::new(self);
        let filled = this.filled;
        if mem::size_of::<T>() != 0 {
            this.dv.front = this.start;
        }
        this.dv.len += filled;
    }
}

impl<T, A: Allocator> Drop for FrontGuard<'_, T, A> {
    fn drop(&mut self) {
        unsafe {
            let start = self.dv.base().add(self.start);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, self.filled));
        }
    }
}

impl<T, A: Allocator> Deref for Devector<T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for Devector<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator, I: SliceIndex<[T]>> Index<I> for Devector<T, A> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, A: Allocator, I: SliceIndex<[T]>> IndexMut<I> for Devector<T, A> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, A: Allocator> AsRef<[T]> for Devector<T, A> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> AsMut<[T]> for Devector<T, A> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: Allocator> Drop for Devector<T, A> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
        }
    }
}

impl<T, A: Allocator + Default> Default for Devector<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for Devector<T, A> {
    fn clone(&self) -> Self {
        let mut out = Devector::with_capacity_in(self.len, self.allocator().clone());
        out.extend(self.iter().cloned());
        out
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_iter(source.iter().cloned());
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Devector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T: Hash, A: Allocator> Hash for Devector<T, A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state)
    }
}

impl<T, U, A, B> PartialEq<Devector<U, B>> for Devector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    #[inline]
    fn eq(&self, other: &Devector<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for Devector<T, A> {}

impl<T, U, A: Allocator> PartialEq<&[U]> for Devector<T, A>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, A: Allocator> PartialEq<&mut [U]> for Devector<T, A>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &&mut [U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, A: Allocator, const N: usize> PartialEq<[U; N]> for Devector<T, A>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<T, U, A: Allocator> PartialEq<Devector<U, A>> for &[T]
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &Devector<U, A>) -> bool {
        *self == other.as_slice()
    }
}

impl<T, U, A: Allocator> PartialEq<Devector<U, A>> for &mut [T]
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &Devector<U, A>) -> bool {
        **self == *other.as_slice()
    }
}

impl<T: PartialOrd, A: Allocator> PartialOrd for Devector<T, A> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: Allocator> Ord for Devector<T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T, A: Allocator> Extend<T> for Devector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        let iter = iterable.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > 0 {
            if let Err(err) = self.try_ensure_back(lower) {
                handle_reserve_error(err);
            }
        }
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for Devector<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iterable: I) {
        self.extend(iterable.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Devector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        let iter = iterable.into_iter();
        let (lower, _) = iter.size_hint();
        let mut dv = Devector::with_capacity(lower);
        dv.extend(iter);
        dv
    }
}

impl<T, const N: usize> From<[T; N]> for Devector<T> {
    fn from(array: [T; N]) -> Self {
        let mut dv = Devector::with_capacity(N);
        dv.extend(array);
        dv
    }
}

impl<T: Clone> From<&[T]> for Devector<T> {
    fn from(slice: &[T]) -> Self {
        let mut dv = Devector::with_capacity(slice.len());
        dv.extend(slice.iter().cloned());
        dv
    }
}

impl<T> From<alloc::vec::Vec<T>> for Devector<T> {
    /// Takes over the vector's buffer without copying or reallocating.
    fn from(vec: alloc::vec::Vec<T>) -> Self {
        let mut vec = ManuallyDrop::new(vec);
        let (ptr, len, capacity) = (vec.as_mut_ptr(), vec.len(), vec.capacity());
        unsafe {
            let ptr = NonNull::new_unchecked(ptr);
            Devector {
                buf: RawBuffer::from_raw_parts_in(ptr, capacity, Global),
                front: 0,
                len,
            }
        }
    }
}

impl<T> From<Devector<T>> for alloc::vec::Vec<T> {
    /// Takes over the devector's buffer; O(1) when there is no front
    /// spare capacity, otherwise the elements are shifted to the start
    /// of the buffer first.
    fn from(mut dv: Devector<T>) -> Self {
        unsafe {
            if mem::size_of::<T>() != 0 {
                dv.shift_live(0);
            }
            let len = dv.len;
            let this = ManuallyDrop::new(dv);
            let buf = ptr::read(&this.buf);
            let (ptr, capacity, _alloc) = buf.into_raw_parts();
            alloc::vec::Vec::from_raw_parts(ptr.as_ptr(), len, capacity)
        }
    }
}

impl<T, A: Allocator> IntoIterator for Devector<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        let this = ManuallyDrop::new(self);
        unsafe {
            let buf = ptr::read(&this.buf);
            IntoIter {
                buf,
                start: this.front,
                end: this.front + this.len,
            }
        }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Devector<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Devector<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}

/// An iterator that moves out of a devector.
///
/// This `struct` is created by the `into_iter` method on
/// [`Devector`] (provided by the [`IntoIterator`] trait).
pub struct IntoIter<T, A: Allocator = Global> {
    buf: RawBuffer<T, A>,
    start: usize,
    end: usize,
}

unsafe impl<T: Send, A: Allocator + Send> Send for IntoIter<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for IntoIter<T, A> {}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        let value = unsafe { self.buf.ptr().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.end - self.start;
        (size, Some(size))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;
        unsafe { Some(self.buf.ptr().add(self.end).read()) }
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}
impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.ptr().add(self.start),
                self.end - self.start,
            ));
        }
    }
}

/// A draining iterator for `Devector<T, A>`.
///
/// This `struct` is created by [`Devector::drain`]. See its
/// documentation for more.
pub struct Drain<'p, T, A: Allocator = Global> {
    parent: &'p mut Devector<T, A>,
    original_len: usize,
    target_start: usize,
    target_end: usize,
    front_index: usize,
    back_index: usize,
}

impl<T, A: Allocator> Iterator for Drain<'_, T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front_index == self.back_index {
            return None;
        }

        let offset = self.parent.front + self.front_index;
        let value = unsafe { self.parent.base().add(offset).read() };
        self.front_index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.back_index - self.front_index;
        (size, Some(size))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for Drain<'_, T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.front_index == self.back_index {
            return None;
        }

        self.back_index -= 1;
        let offset = self.parent.front + self.back_index;
        unsafe { Some(self.parent.base().add(offset).read()) }
    }
}

impl<T, A: Allocator> ExactSizeIterator for Drain<'_, T, A> {}
impl<T, A: Allocator> FusedIterator for Drain<'_, T, A> {}

impl<T, A: Allocator> Drop for Drain<'_, T, A> {
    fn drop(&mut self) {
        while self.next().is_some() {}

        let count = self.target_end - self.target_start;
        let (start, end) = (self.target_start, self.target_end);
        let tail = self.original_len - end;
        let dv = &mut *self.parent;

        unsafe {
            let base = dv.base().add(dv.front);
            if start <= tail {
                // the prefix is shorter, shift it back into the gap
                ptr::copy(base, base.add(count), start);
                dv.advance_front(count);
            } else {
                ptr::copy(base.add(end), base.add(start), tail);
            }
        }

        dv.len = self.original_len - count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devector;

    use alloc::vec;
    use alloc::vec::Vec;
    use core::alloc::Layout;
    use core::cell::Cell;

    use allocator_api2::alloc::AllocError;

    #[test]
    fn scenario_insert_in_the_middle() {
        let mut d = devector![1, 2, 3, 4, 5];
        d.insert(2, 99);
        assert_eq!(d, [1, 2, 99, 3, 4, 5]);
        assert_eq!(d.len(), 6);
    }

    #[test]
    fn scenario_mixed_pushes() {
        let mut d = Devector::new();
        d.push_front(1);
        d.push_front(2);
        d.push_back(3);
        assert_eq!(d, [2, 1, 3]);
    }

    #[test]
    fn scenario_drain_from_fill() {
        let mut d = Devector::from_elem(7, 5);
        d.drain(1..3);
        assert_eq!(d, [7, 7, 7]);
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn scenario_resize_both_ends() {
        let mut d = devector![1, 2, 3];
        d.resize_back(5, 0);
        assert_eq!(d, [1, 2, 3, 0, 0]);
        d.truncate_front(2);
        assert_eq!(d, [0, 0]);
    }

    #[test]
    fn scenario_assign_grows_storage() {
        let mut d = Devector::with_capacity(5);
        d.extend(['a', 'b', 'c']);
        assert_eq!(d.front_free_capacity(), 0);
        assert_eq!(d.back_free_capacity(), 2);

        d.assign(10, 'x');
        assert_eq!(d.len(), 10);
        assert!(d.iter().all(|&c| c == 'x'));
        assert!(d.capacity() >= 10);
    }

    #[test]
    fn insert_prefers_the_shorter_side() {
        // room only at the front: the prefix shifts left
        let mut d = Devector::with_free_capacity(2, 2);
        d.push_back(1);
        d.push_back(2);
        d.insert(1, 9);
        assert_eq!(d, [1, 9, 2]);
        assert_eq!(d.capacity(), 4);
        assert_eq!(d.front_free_capacity(), 1);

        // room only at the back: the suffix shifts right
        let mut d = Devector::with_free_capacity(0, 4);
        d.extend([1, 2, 3]);
        d.insert(2, 9);
        assert_eq!(d, [1, 2, 9, 3]);
        assert_eq!(d.capacity(), 4);
        assert_eq!(d.front_free_capacity(), 0);
    }

    #[test]
    fn insert_fill_splits_across_both_spares() {
        let mut d = Devector::with_free_capacity(1, 3);
        d.push_back(1);
        d.push_back(2);
        assert_eq!(d.front_free_capacity(), 1);
        assert_eq!(d.back_free_capacity(), 1);

        d.insert_fill(1, 2, 9);
        assert_eq!(d, [1, 9, 9, 2]);
        assert_eq!(d.capacity(), 4);
    }

    #[test]
    fn insert_fill_reallocates_when_full() {
        let mut d = Devector::with_capacity(4);
        d.extend([1, 2, 3, 4]);
        d.insert_fill(2, 3, 9);
        assert_eq!(d, [1, 2, 9, 9, 9, 3, 4]);
        assert!(d.capacity() >= 7);
    }

    #[test]
    fn zero_count_insertions_do_nothing() {
        let mut d = devector![1, 2];
        d.insert_fill(1, 0, 9);
        assert_eq!(d, [1, 2]);
        d.insert_from_iter(1, core::iter::empty());
        assert_eq!(d, [1, 2]);
    }

    #[test]
    fn insert_from_iter_without_exact_size() {
        // `filter` discards the lower bound, forcing the rotation path
        let mut d = devector![1, 2, 7];
        d.insert_from_iter(2, (3..=6).filter(|_| true));
        assert_eq!(d, [1, 2, 3, 4, 5, 6, 7]);
    }

    struct Stutter<I: Iterator> {
        inner: I,
        claimed: usize,
    }

    impl<I: Iterator> Iterator for Stutter<I> {
        type Item = I::Item;

        fn next(&mut self) -> Option<I::Item> {
            self.inner.next()
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (self.claimed, Some(self.claimed))
        }
    }

    #[test]
    fn insert_from_iter_with_lying_size_hints() {
        // claims more elements than it yields
        let mut d = devector![1, 2, 6];
        d.insert_from_iter(2, Stutter { inner: [3, 4].into_iter(), claimed: 5 });
        assert_eq!(d, [1, 2, 3, 4, 6]);

        // claims fewer elements than it yields
        let mut d = devector![1, 2, 6];
        d.insert_from_iter(2, Stutter { inner: [3, 4, 5].into_iter(), claimed: 1 });
        assert_eq!(d, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn remove_shifts_the_shorter_side() {
        let mut d = devector![1, 2, 3, 4];
        assert_eq!(d.remove(1), 2);
        assert_eq!(d, [1, 3, 4]);
        assert_eq!(d.remove(2), 4);
        assert_eq!(d, [1, 3]);
        assert_eq!(d.remove(0), 1);
        assert_eq!(d.remove(0), 3);
        assert!(d.is_empty());
    }

    #[test]
    fn swap_removes() {
        let mut d = devector![1, 2, 3, 4, 5];
        assert_eq!(d.swap_remove_back(1), Some(2));
        assert_eq!(d, [1, 5, 3, 4]);
        assert_eq!(d.swap_remove_front(2), Some(3));
        assert_eq!(d, [5, 1, 4]);
        assert_eq!(d.swap_remove_back(17), None);
    }

    #[test]
    fn pushes_within_capacity_use_front_spare() {
        let mut d = Devector::with_free_capacity(4, 0);
        d.push_back(1);
        assert_eq!(d.capacity(), 4);
        d.push_front(0);
        assert_eq!(d.capacity(), 4);
        assert_eq!(d, [0, 1]);
    }

    #[test]
    fn pops_on_empty_return_none() {
        let mut d: Devector<u32> = Devector::new();
        assert_eq!(d.pop_front(), None);
        assert_eq!(d.pop_back(), None);
    }

    #[test]
    fn reserves_preserve_the_other_side() {
        let mut d: Devector<u8> = Devector::new();
        d.reserve_front(10);
        assert!(d.front_free_capacity() >= 10);

        let front_spare = d.front_free_capacity();
        d.reserve_back(7);
        assert!(d.back_free_capacity() >= 7);
        assert_eq!(d.front_free_capacity(), front_spare);
    }

    #[test]
    fn try_reserve_reports_overflow() {
        let mut d: Devector<u32> = Devector::new();
        assert_eq!(
            d.try_reserve_back(usize::MAX / 2),
            Err(TryReserveError::CapacityOverflow)
        );
        assert_eq!(
            d.try_reserve_front(usize::MAX / 2),
            Err(TryReserveError::CapacityOverflow)
        );
        assert_eq!(d.capacity(), 0);
        assert!(d.is_empty());
    }

    #[test]
    fn shrink_to_fit_is_idempotent() {
        let mut d = Devector::with_capacity(16);
        d.extend(0..5);
        d.shrink_to_fit();
        assert_eq!(d.capacity(), 5);
        assert_eq!(d, [0, 1, 2, 3, 4]);
        d.shrink_to_fit();
        assert_eq!(d.capacity(), 5);
        assert_eq!(d, [0, 1, 2, 3, 4]);

        d.clear();
        d.shrink_to_fit();
        assert_eq!(d.capacity(), 0);
    }

    #[test]
    fn assign_iter_reuses_capacity() {
        let mut d = Devector::with_capacity(10);
        d.extend(0..10);
        d.assign_iter([20, 21, 22]);
        assert_eq!(d, [20, 21, 22]);
        assert_eq!(d.capacity(), 10);
    }

    #[test]
    fn clone_and_clone_from() {
        let original = devector![1, 2, 3];
        let copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.capacity(), 3);

        let mut target = Devector::with_capacity(8);
        target.extend(0..8);
        target.clone_from(&original);
        assert_eq!(target, [1, 2, 3]);
        assert_eq!(target.capacity(), 8);
    }

    #[test]
    fn comparisons_are_lexicographic() {
        assert!(devector![1, 2, 3] < devector![1, 2, 4]);
        assert!(devector![1, 2] < devector![1, 2, 0]);
        assert_eq!(devector![1, 2], devector![1, 2]);
        assert_ne!(devector![1, 2], devector![2, 1]);
        assert_eq!(devector![1, 2, 3], &[1, 2, 3][..]);
    }

    #[test]
    fn retain_and_erase_helpers() {
        let mut d = devector![1, 2, 3, 4, 5, 6];
        d.retain(|&x| x % 2 == 0);
        assert_eq!(d, [2, 4, 6]);

        let mut d = devector![1, 2, 2, 3, 2];
        assert_eq!(erase(&mut d, &2), 3);
        assert_eq!(d, [1, 3]);

        let mut d = devector![1, 2, 3, 4, 5, 6];
        assert_eq!(erase_if(&mut d, |&x| x > 4), 2);
        assert_eq!(d, [1, 2, 3, 4]);
    }

    #[test]
    fn conversions_with_vec() {
        let mut d = Devector::from(vec![1, 2, 3]);
        assert_eq!(d, [1, 2, 3]);
        d.push_front(0);

        let v = Vec::from(d);
        assert_eq!(v, [0, 1, 2, 3]);
    }

    #[test]
    fn extend_front_preserves_order() {
        let mut d = devector![4, 5];
        d.extend_front([1, 2, 3]);
        assert_eq!(d, [1, 2, 3, 4, 5]);

        let mut d: Devector<u32> = Devector::new();
        d.extend_front([1, 2]);
        assert_eq!(d, [1, 2]);
    }

    #[test]
    fn drains_close_the_gap_from_either_side() {
        let mut d = devector![0, 1, 2, 3, 4, 5, 6, 7];
        d.drain(1..3);
        assert_eq!(d, [0, 3, 4, 5, 6, 7]);

        let mut d = devector![0, 1, 2, 3, 4, 5, 6, 7];
        d.drain(5..7);
        assert_eq!(d, [0, 1, 2, 3, 4, 7]);

        let mut d = devector![0, 1, 2];
        d.drain(1..1);
        assert_eq!(d, [0, 1, 2]);
        d.drain(..);
        assert!(d.is_empty());
    }

    #[derive(Clone)]
    struct Droppable<'a> {
        value: usize,
        counter: &'a Cell<usize>,
    }

    impl Drop for Droppable<'_> {
        fn drop(&mut self) {
            let count = self.counter.get();
            self.counter.set(count + 1);
        }
    }

    #[test]
    fn iterators_take_and_drop_correctly() {
        let drop_count = Cell::new(0usize);

        let mut dv = Devector::with_capacity(8);
        for i in 1..=8 {
            dv.push_back(Droppable {
                value: i,
                counter: &drop_count,
            });
        }

        let mut drain_iter = dv.drain(2..=5);
        assert_eq!(drain_iter.next_back().unwrap().value, 6);
        assert_eq!(drop_count.get(), 1);

        drop(drain_iter);
        assert_eq!(drop_count.get(), 4);

        let mut into_iter = dv.into_iter();
        assert_eq!(into_iter.next().unwrap().value, 1);
        assert_eq!(into_iter.next().unwrap().value, 2);
        assert_eq!(into_iter.next().unwrap().value, 7);
        assert_eq!(drop_count.get(), 7);

        drop(into_iter);
        assert_eq!(drop_count.get(), 8);
    }

    #[test]
    fn truncate_and_clear_drop_correctly() {
        let drop_count = Cell::new(0usize);

        let mut dv = Devector::with_capacity(8);
        for i in 0..6 {
            dv.push_back(Droppable {
                value: i,
                counter: &drop_count,
            });
        }

        dv.truncate_front(4);
        assert_eq!(drop_count.get(), 2);
        assert_eq!(dv.front().unwrap().value, 2);

        dv.truncate(2);
        assert_eq!(drop_count.get(), 4);
        assert_eq!(dv.back().unwrap().value, 3);

        dv.clear();
        assert_eq!(drop_count.get(), 6);
        assert!(dv.is_empty());
    }

    struct Fused<'a> {
        fuse: &'a Cell<usize>,
        drops: &'a Cell<usize>,
        value: u32,
    }

    impl Clone for Fused<'_> {
        fn clone(&self) -> Self {
            let remaining = self.fuse.get();
            if remaining == 0 {
                panic!("fuse burned out");
            }
            self.fuse.set(remaining - 1);
            Fused {
                fuse: self.fuse,
                drops: self.drops,
                value: self.value,
            }
        }
    }

    impl Drop for Fused<'_> {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn failed_insert_fill_rolls_back() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        let fuse = Cell::new(usize::MAX);
        let drops = Cell::new(0usize);

        let mut dv = Devector::with_capacity(8);
        for i in 0..4 {
            dv.push_back(Fused {
                fuse: &fuse,
                drops: &drops,
                value: i,
            });
        }

        fuse.set(2);
        let result = catch_unwind(AssertUnwindSafe(|| {
            dv.insert_fill(
                2,
                4,
                Fused {
                    fuse: &fuse,
                    drops: &drops,
                    value: 9,
                },
            );
        }));
        assert!(result.is_err());

        // the two clones and the original fill value must have been dropped
        assert_eq!(drops.get(), 3);
        assert_eq!(dv.len(), 4);
        assert_eq!(dv.capacity(), 8);
        let values: Vec<u32> = dv.iter().map(|f| f.value).collect();
        assert_eq!(values, [0, 1, 2, 3]);
        assert_eq!(
            dv.capacity(),
            dv.front_free_capacity() + dv.len() + dv.back_free_capacity()
        );

        drop(dv);
        assert_eq!(drops.get(), 7);
    }

    #[test]
    fn failed_insert_after_reallocation_keeps_elements() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        let fuse = Cell::new(usize::MAX);
        let drops = Cell::new(0usize);

        let mut dv = Devector::with_capacity(4);
        for i in 0..4 {
            dv.push_back(Fused {
                fuse: &fuse,
                drops: &drops,
                value: i,
            });
        }
        assert_eq!(dv.back_free_capacity(), 0);

        fuse.set(1);
        let result = catch_unwind(AssertUnwindSafe(|| {
            dv.insert_fill(
                2,
                3,
                Fused {
                    fuse: &fuse,
                    drops: &drops,
                    value: 9,
                },
            );
        }));
        assert!(result.is_err());

        assert_eq!(dv.len(), 4);
        let values: Vec<u32> = dv.iter().map(|f| f.value).collect();
        assert_eq!(values, [0, 1, 2, 3]);

        drop(dv);
        assert_eq!(drops.get(), 2 + 4);
    }

    #[derive(Clone, Copy)]
    struct CountingAlloc<'a> {
        live: &'a Cell<isize>,
        allocations: &'a Cell<usize>,
    }

    unsafe impl Allocator for CountingAlloc<'_> {
        fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
            let block = Global.allocate(layout)?;
            self.live.set(self.live.get() + 1);
            self.allocations.set(self.allocations.get() + 1);
            Ok(block)
        }

        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            self.live.set(self.live.get() - 1);
            Global.deallocate(ptr, layout);
        }
    }

    #[test]
    fn push_growth_is_amortized() {
        let live = Cell::new(0isize);
        let allocations = Cell::new(0usize);

        {
            let alloc = CountingAlloc {
                live: &live,
                allocations: &allocations,
            };
            let mut dv = Devector::new_in(alloc);
            for i in 0..1024u32 {
                if i % 2 == 0 {
                    dv.push_back(i);
                } else {
                    dv.push_front(i);
                }
            }
            assert_eq!(dv.len(), 1024);

            // geometric growth reallocates O(log n) times
            assert!(
                allocations.get() <= 32,
                "too many allocations: {}",
                allocations.get()
            );
        }

        assert_eq!(live.get(), 0);
    }

    #[test]
    fn no_memory_leaks_through_custom_allocators() {
        let live = Cell::new(0isize);
        let allocations = Cell::new(0usize);
        let alloc = CountingAlloc {
            live: &live,
            allocations: &allocations,
        };

        {
            let mut dv = Devector::with_capacity_in(4, alloc);
            dv.extend(0..100);
            dv.shrink_to_fit();
            let _ = dv.drain(10..90);
            dv.reserve_front(32);
        }
        assert_eq!(live.get(), 0);

        {
            let mut dv = Devector::with_capacity_in(3, alloc);
            dv.extend(0..3);
            let _iter = dv.into_iter();
        }
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn zero_sized_elements() {
        let mut dv = Devector::new();
        assert_eq!(dv.capacity(), usize::MAX);

        for _ in 0..64 {
            dv.push_back(());
            dv.push_front(());
        }
        assert_eq!(dv.len(), 128);

        dv.insert(77, ());
        assert_eq!(dv.len(), 129);
        assert_eq!(dv.pop_front(), Some(()));
        assert_eq!(dv.remove(0), ());
        assert_eq!(dv.capacity(), usize::MAX);

        dv.truncate(5);
        assert_eq!(dv.len(), 5);
        dv.drain(1..3);
        assert_eq!(dv.len(), 3);

        let collected: Vec<()> = dv.into_iter().collect();
        assert_eq!(collected.len(), 3);
    }

    #[test]
    fn randomized_operations_match_vec_model() {
        use rand::{rngs::SmallRng, Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(0x005E_ED00);
        let mut dv: Devector<u32> = Devector::new();
        let mut model: Vec<u32> = Vec::new();

        for step in 0..4000u32 {
            match rng.gen_range(0..8) {
                0 | 1 => {
                    dv.push_back(step);
                    model.push(step);
                }
                2 => {
                    dv.push_front(step);
                    model.insert(0, step);
                }
                3 => assert_eq!(dv.pop_back(), model.pop()),
                4 => {
                    let expected = if model.is_empty() {
                        None
                    } else {
                        Some(model.remove(0))
                    };
                    assert_eq!(dv.pop_front(), expected);
                }
                5 => {
                    let index = rng.gen_range(0..=model.len());
                    dv.insert(index, step);
                    model.insert(index, step);
                }
                6 => {
                    if !model.is_empty() {
                        let index = rng.gen_range(0..model.len());
                        assert_eq!(dv.remove(index), model.remove(index));
                    }
                }
                _ => {
                    if !model.is_empty() {
                        let start = rng.gen_range(0..model.len());
                        let end = rng.gen_range(start..=model.len());
                        let drained: Vec<u32> = dv.drain(start..end).collect();
                        let expected: Vec<u32> = model.drain(start..end).collect();
                        assert_eq!(drained, expected);
                    }
                }
            }

            assert_eq!(dv.len(), model.len());
            assert_eq!(
                dv.capacity(),
                dv.front_free_capacity() + dv.len() + dv.back_free_capacity()
            );
            if step % 64 == 0 {
                assert_eq!(dv.as_slice(), model.as_slice());
            }
        }

        assert_eq!(dv.as_slice(), model.as_slice());
    }

    #[test]
    fn slice_access_and_indexing() {
        let mut d = devector![1, 2, 3];
        assert_eq!(d.get(1), Some(&2));
        assert_eq!(d.get(3), None);
        assert_eq!(d[0], 1);
        assert_eq!(&d[1..], &[2, 3][..]);

        d[1] = 9;
        assert_eq!(d, [1, 9, 3]);

        *d.front_mut().unwrap() = 0;
        *d.back_mut().unwrap() = 5;
        assert_eq!(d, [0, 9, 5]);

        let empty: Devector<u32> = Devector::new();
        assert_eq!(empty.front(), None);
        assert_eq!(empty.back(), None);
    }

    #[test]
    fn max_capacity_depends_on_element_size() {
        assert_eq!(Devector::<u8>::max_capacity(), isize::MAX as usize);
        assert_eq!(Devector::<u64>::max_capacity(), isize::MAX as usize / 8);
        assert_eq!(Devector::<()>::max_capacity(), usize::MAX);
    }
}
