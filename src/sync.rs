//! # Synchronization Utilities
//!
//! Mutex handling shared by the width cache and the logger.
//!
//! A mutex becomes poisoned when a thread panics while holding it. Both
//! users in this crate guard data that stays valid afterwards: a cache of
//! display widths, and the logger's output sink. Every lock recovers from
//! poison instead of propagating it.
//!
//! ```rust
//! use std::sync::Mutex;
//! use make_colors::sync::lock_recover;
//!
//! let data = Mutex::new(vec![1, 2, 3]);
//! let guard = lock_recover(&data);
//! assert_eq!(guard.len(), 3);
//! ```

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering from poison if necessary.
///
/// # Panics
///
/// This function never panics. It always recovers from poison.
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
