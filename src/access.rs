//! Alias word access
//!
//! Every flag operation lowers to exactly one of these. They have to stay volatile:
//! the compiler must neither elide, merge nor reorder alias accesses.

use core::ptr::NonNull;

#[cfg(test)]
pub(crate) use self::emulator::{read, write};

/// # Safety
///
/// `word` has to be a valid, aligned alias word.
#[cfg(not(test))]
#[inline(always)]
pub(crate) unsafe fn write(word: NonNull<u32>, value: u32) {
    core::ptr::write_volatile(word.as_ptr(), value)
}

/// # Safety
///
/// `word` has to be a valid, aligned alias word.
#[cfg(not(test))]
#[inline(always)]
pub(crate) unsafe fn read(word: NonNull<u32>) -> u32 {
    core::ptr::read_volatile(word.as_ptr())
}
