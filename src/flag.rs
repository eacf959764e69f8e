//! Bit-band flags
//!
//! A [`Flag`] is the alias word of one bit of one SRAM byte. Setting, clearing and
//! testing it are each a single word store or load, so flags of the same byte can be
//! shared between thread mode and interrupt handlers without a read-modify-write.
//!
//! Flags are only created by translation, see [`Region::flag`](crate::Region::flag).

use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;
use core::sync::atomic::AtomicU8;

use cortex_m::interrupt::CriticalSection;

use crate::access;

/// Alias word of a single bit in a bit-band storage cell
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Flag<'a> {
    word: NonNull<u32>,
    _cell: PhantomData<&'a AtomicU8>,
}

// Alias word accesses are single bus transactions and leave the other bits of the
// byte untouched.
unsafe impl Send for Flag<'_> {}
unsafe impl Sync for Flag<'_> {}

impl<'a> Flag<'a> {
    /// # Safety
    ///
    /// `word` has to be the alias word of a bit of a storage cell that lives for `'a`.
    pub(crate) unsafe fn from_alias(word: NonNull<u32>) -> Self {
        Flag {
            word,
            _cell: PhantomData,
        }
    }

    /// Sets the bit
    #[inline]
    pub fn set(&self) {
        unsafe { access::write(self.word, 1) }
    }

    /// Clears the bit
    #[inline]
    pub fn clear(&self) {
        unsafe { access::write(self.word, 0) }
    }

    /// Sets or clears the bit
    #[inline]
    pub fn write(&self, value: bool) {
        unsafe { access::write(self.word, value as u32) }
    }

    /// Tests the bit. Only an alias word reading exactly `1` counts as set.
    #[inline]
    pub fn is_set(&self) -> bool {
        unsafe { access::read(self.word) == 1 }
    }

    /// Inverts the bit.
    ///
    /// This is a read followed by a write, so it has to run with interrupts masked.
    pub fn toggle(&self, _cs: &CriticalSection) {
        self.write(!self.is_set());
    }

    /// Address of the alias word
    pub fn address(&self) -> usize {
        self.word.as_ptr() as usize
    }

    /// Raw pointer to the alias word
    pub fn as_ptr(&self) -> *mut u32 {
        self.word.as_ptr()
    }
}

impl fmt::Debug for Flag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flag({:#010x})", self.address())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Flag<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Flag({=usize:#010x})", self.address())
    }
}
