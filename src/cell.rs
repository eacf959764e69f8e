//! Storage cells

use core::sync::atomic::AtomicU8;

use crate::flag::Flag;
use crate::region::Region;

/// A byte whose bits may be written through the bit-band alias window while it is
/// borrowed
///
/// # Safety
///
/// `as_byte_ptr` has to return the address of the single byte of storage owned by
/// `self`. That byte must be interior mutable and safe to mutate from other execution
/// contexts, since flags derived from it are `Send + Sync`.
pub unsafe trait StorageCell: Sync {
    /// Address of the byte
    fn as_byte_ptr(&self) -> *const u8;
}

unsafe impl StorageCell for AtomicU8 {
    fn as_byte_ptr(&self) -> *const u8 {
        // same size and alignment as `u8`
        self as *const AtomicU8 as *const u8
    }
}

/// Extension trait to derive SRAM bit-band flags from a storage cell
pub trait FlagExt: StorageCell + Sized {
    /// Flag for bit `bit` in [`Region::SRAM`], `None` if `bit` is not in `0..8` or the
    /// cell is not in the bit-band region
    fn flag(&self, bit: u8) -> Option<Flag<'_>> {
        Region::SRAM.flag(self, bit)
    }

    /// All eight flags of the cell in [`Region::SRAM`]
    fn flags(&self) -> Option<[Flag<'_>; 8]> {
        Region::SRAM.flags(self)
    }
}

impl<C: StorageCell> FlagExt for C {}
