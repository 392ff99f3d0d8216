//! Raw, uninitialized storage blocks for the devector.
//!
//! A [`RawBuffer`] owns an allocation and nothing else: it never reads,
//! constructs, or drops elements. Deciding which slots are live is the
//! container's job.

use core::alloc::Layout;
use core::fmt;
use core::mem::{self, ManuallyDrop};
use core::ptr::{self, NonNull};

use allocator_api2::alloc::Allocator;

/// The error type for fallible reservation methods.
///
/// Distinguishes "the request can never be satisfied" from "the allocator
/// would not satisfy it right now", so callers can react differently to
/// the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TryReserveError {
    /// The computed capacity exceeds the maximum size the container can
    /// represent (`isize::MAX` bytes). Raised before any allocator call.
    CapacityOverflow,
    /// The allocator refused to provide a block of the given layout.
    AllocError {
        /// The layout of the allocation request that failed.
        layout: Layout,
    },
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryReserveError::CapacityOverflow => {
                f.write_str("requested capacity exceeds the maximum supported size")
            }
            TryReserveError::AllocError { .. } => {
                f.write_str("memory allocation failed")
            }
        }
    }
}

impl core::error::Error for TryReserveError {}

/// The largest number of `T` slots any buffer may hold.
///
/// Allocations are limited to `isize::MAX` bytes; zero-sized types are
/// never allocated for and have no meaningful limit.
pub(crate) const fn max_capacity<T>() -> usize {
    if mem::size_of::<T>() == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / mem::size_of::<T>()
    }
}

fn allocate_block<T, A: Allocator>(alloc: &A, cap: usize) -> Result<NonNull<T>, TryReserveError> {
    if mem::size_of::<T>() == 0 || cap == 0 {
        return Ok(NonNull::dangling());
    }
    if cap > max_capacity::<T>() {
        return Err(TryReserveError::CapacityOverflow);
    }

    let layout = Layout::array::<T>(cap).map_err(|_| TryReserveError::CapacityOverflow)?;
    match alloc.allocate(layout) {
        Ok(block) => Ok(block.cast()),
        Err(_) => Err(TryReserveError::AllocError { layout }),
    }
}

/// An owned block of `cap` uninitialized `T` slots, tied to an allocator
/// instance.
///
/// For zero-sized `T` the pointer dangles and the capacity reads as
/// `usize::MAX`; no allocator call is ever made.
pub(crate) struct RawBuffer<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
}

impl<T, A: Allocator> RawBuffer<T, A> {
    pub(crate) fn new_in(alloc: A) -> Self {
        RawBuffer {
            ptr: NonNull::dangling(),
            cap: if mem::size_of::<T>() == 0 { usize::MAX } else { 0 },
            alloc,
        }
    }

    pub(crate) fn try_with_capacity_in(cap: usize, alloc: A) -> Result<Self, TryReserveError> {
        let ptr = allocate_block::<T, A>(&alloc, cap)?;
        Ok(RawBuffer {
            ptr,
            cap: if mem::size_of::<T>() == 0 { usize::MAX } else { cap },
            alloc,
        })
    }

    /// Reassembles a buffer from its raw parts.
    ///
    /// # Safety
    /// `ptr` must denote a block of exactly `cap` slots allocated through
    /// `alloc` (or dangle, with `cap == 0` or `T` zero-sized).
    pub(crate) unsafe fn from_raw_parts_in(ptr: NonNull<T>, cap: usize, alloc: A) -> Self {
        RawBuffer { ptr, cap, alloc }
    }

    /// Disassembles the buffer without deallocating it.
    pub(crate) fn into_raw_parts(self) -> (NonNull<T>, usize, A) {
        let this = ManuallyDrop::new(self);
        (this.ptr, this.cap, unsafe { ptr::read(&this.alloc) })
    }

    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Allocates a fresh block of `cap` slots from this buffer's allocator
    /// without touching the current block.
    pub(crate) fn try_allocate_block(&self, cap: usize) -> Result<NonNull<T>, TryReserveError> {
        allocate_block::<T, A>(&self.alloc, cap)
    }

    /// Installs a new block, releasing the old one.
    ///
    /// # Safety
    /// `ptr` must come from [`try_allocate_block`](Self::try_allocate_block)
    /// on this buffer with capacity `cap` (or dangle, with `cap == 0`), and
    /// any elements in the old block must have been moved out or dropped.
    pub(crate) unsafe fn replace(&mut self, ptr: NonNull<T>, cap: usize) {
        self.release();
        self.ptr = ptr;
        self.cap = if mem::size_of::<T>() == 0 { usize::MAX } else { cap };
    }

    fn release(&mut self) {
        if mem::size_of::<T>() != 0 && self.cap != 0 {
            // the layout was validated when the block was allocated
            let layout = Layout::array::<T>(self.cap).unwrap();
            unsafe { self.alloc.deallocate(self.ptr.cast(), layout) };
        }
    }
}

impl<T, A: Allocator> Drop for RawBuffer<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}
