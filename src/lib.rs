#![no_std]
#![warn(missing_docs)]

//! A contiguous double-ended vector.
//!
//! A [`Devector`] stores its elements in one heap-allocated buffer, like
//! a vector, but keeps spare capacity at *both* ends of that buffer, so
//! pushing onto the front is as cheap as pushing onto the back. Unlike a
//! ring-buffer deque, the elements stay contiguous, and the entire slice
//! API is available through `Deref`.
//!
//! ```
//! use devector::devector;
//!
//! let mut d = devector![2, 3];
//! d.push_front(1);
//! d.push_back(4);
//! assert_eq!(d, [1, 2, 3, 4]);
//!
//! d.sort_unstable_by(|a, b| b.cmp(a));
//! assert_eq!(d, [4, 3, 2, 1]);
//! ```
//!
//! The container is `no_std` (it requires `alloc`) and is generic over
//! an allocator through the [`allocator-api2`] crate, so stateful and
//! custom allocators work on stable Rust.
//!
//! [`allocator-api2`]: https://crates.io/crates/allocator-api2

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod devector;
mod raw;

pub use crate::devector::{erase, erase_if, Devector, Drain, IntoIter};
pub use crate::raw::TryReserveError;

/// Creates a [`Devector`] containing the arguments.
///
/// `devector!` supports the same forms as the `vec!` macro:
///
/// ```
/// use devector::{devector, Devector};
///
/// let d = devector![1, 2, 3];
/// assert_eq!(d, [1, 2, 3]);
///
/// let d = devector![7; 5];
/// assert_eq!(d, [7, 7, 7, 7, 7]);
///
/// let empty: Devector<u8> = devector![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! devector {
    () => {
        $crate::Devector::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::Devector::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::Devector::from([$($x),+])
    };
}
