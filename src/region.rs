//! Bit-band regions and address translation
//!
//! "The processor memory map includes two bit-band regions.
//! These occupy the lowest 1MB of the SRAM and Peripheral memory regions respectively.
//! These bit-band regions map each word in an alias region of memory to a bit
//! in a bit-band region of memory."
//!
//! bit_word_addr = bit_band_base + (byte_offset x 32) + (bit_number x 4)
//!
//! Only the SRAM pair is handled here.

use core::fmt;
use core::ptr::NonNull;

use crate::cell::StorageCell;
use crate::config;
use crate::flag::Flag;

/// Number of bits in a storage cell
pub const BITS_PER_CELL: u8 = 8;

/// Alias bytes covering one source byte (one word per bit)
const ALIAS_BYTES_PER_BYTE: usize = 32;

/// Alias bytes covering one source bit
const ALIAS_BYTES_PER_BIT: usize = 4;

// Evaluated even when nothing refers to `Region::SRAM`, so a bad pair fails the build.
const _: Region = Region::SRAM;

/// Bit-band region error
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bit index is not in `0..8`
    BitOutOfRange,
    /// Storage cell lies outside the bit-band source window
    OutsideRegion,
    /// Region covers no bytes
    EmptyRegion,
    /// Alias window is null or not aligned to a 32-bit word
    MisalignedAlias,
    /// Source or alias window wraps around the address space
    Overflow,
    /// Source and alias windows overlap
    Overlap,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::BitOutOfRange => "bit index out of range",
            Error::OutsideRegion => "storage cell outside of the bit-band region",
            Error::EmptyRegion => "bit-band region is empty",
            Error::MisalignedAlias => "alias base is not word aligned",
            Error::Overflow => "bit-band window overflows the address space",
            Error::Overlap => "source and alias windows overlap",
        };
        f.write_str(msg)
    }
}

/// A bit-band mapping: `size` bytes starting at `source_base`, each bit of which is
/// mirrored by one word of the alias window starting at `alias_base`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    source_base: usize,
    alias_base: usize,
    size: usize,
}

impl Region {
    /// SRAM bit-band region selected at build time
    pub const SRAM: Region = match unsafe {
        Region::new(config::SRAM_BASE, config::SRAM_BB_BASE, config::SRAM_BB_SIZE)
    } {
        Ok(region) => region,
        Err(_) => panic!("SRAM bit-band configuration is invalid"),
    };

    /// Describes a bit-band mapping.
    ///
    /// Checks that the region is non-empty, that the alias window is word aligned and
    /// non-null, and that neither window wraps nor overlaps the other.
    ///
    /// # Safety
    ///
    /// The hardware has to implement this mapping. Flags derived from the region write
    /// to the alias window without further checks.
    pub const unsafe fn new(
        source_base: usize,
        alias_base: usize,
        size: usize,
    ) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::EmptyRegion);
        }
        if alias_base == 0 || alias_base % ALIAS_BYTES_PER_BIT != 0 {
            return Err(Error::MisalignedAlias);
        }

        let alias_size = match size.checked_mul(ALIAS_BYTES_PER_BYTE) {
            Some(alias_size) => alias_size,
            None => return Err(Error::Overflow),
        };
        let source_end = match source_base.checked_add(size) {
            Some(end) => end,
            None => return Err(Error::Overflow),
        };
        let alias_end = match alias_base.checked_add(alias_size) {
            Some(end) => end,
            None => return Err(Error::Overflow),
        };

        if source_base < alias_end && alias_base < source_end {
            return Err(Error::Overlap);
        }

        Ok(Region {
            source_base,
            alias_base,
            size,
        })
    }

    /// First byte of the bit-band (source) window
    pub const fn source_base(&self) -> usize {
        self.source_base
    }

    /// First word of the alias window
    pub const fn alias_base(&self) -> usize {
        self.alias_base
    }

    /// Size of the source window in bytes
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Size of the alias window in bytes
    pub const fn alias_size(&self) -> usize {
        self.size * ALIAS_BYTES_PER_BYTE
    }

    /// Whether `byte_address` lies in the source window
    pub const fn contains(&self, byte_address: usize) -> bool {
        byte_address >= self.source_base && byte_address - self.source_base < self.size
    }

    /// Whether `address` lies in the alias window
    pub const fn alias_contains(&self, address: usize) -> bool {
        address >= self.alias_base && address - self.alias_base < self.alias_size()
    }

    /// Translates a byte address and bit number into the address of its alias word.
    ///
    /// Returns `None` when `bit` is not in `0..8`. The byte address is not checked
    /// against the window: addresses outside of it produce a well-formed but
    /// meaningless result.
    pub const fn alias_address(&self, byte_address: usize, bit: u8) -> Option<usize> {
        if bit >= BITS_PER_CELL {
            return None;
        }

        let byte_offset = byte_address.wrapping_sub(self.source_base);
        let word_offset = byte_offset
            .wrapping_mul(ALIAS_BYTES_PER_BYTE)
            .wrapping_add(bit as usize * ALIAS_BYTES_PER_BIT);

        Some(self.alias_base.wrapping_add(word_offset))
    }

    /// Inverse of [`Region::alias_address`]: the byte address and bit number an alias
    /// word maps to. `None` for addresses outside the alias window or not word aligned.
    pub const fn locate(&self, alias_address: usize) -> Option<(usize, u8)> {
        if !self.alias_contains(alias_address) {
            return None;
        }

        let word_offset = alias_address - self.alias_base;
        if word_offset % ALIAS_BYTES_PER_BIT != 0 {
            return None;
        }

        let byte_address = self.source_base + word_offset / ALIAS_BYTES_PER_BYTE;
        let bit = (word_offset % ALIAS_BYTES_PER_BYTE) / ALIAS_BYTES_PER_BIT;

        Some((byte_address, bit as u8))
    }

    /// Creates the flag for bit `bit` of `cell`.
    ///
    /// Returns `None`, the invalid flag, when `bit` is not in `0..8` or `cell` does
    /// not lie inside the source window.
    pub fn flag<'a, C: StorageCell>(&self, cell: &'a C, bit: u8) -> Option<Flag<'a>> {
        self.try_flag(cell, bit).ok()
    }

    /// Like [`Region::flag`], reporting why no flag could be created.
    pub fn try_flag<'a, C: StorageCell>(&self, cell: &'a C, bit: u8) -> Result<Flag<'a>, Error> {
        let address = cell.as_byte_ptr() as usize;

        if bit >= BITS_PER_CELL {
            #[cfg(feature = "defmt")]
            defmt::trace!("bit-band: bit {=u8} out of range", bit);
            return Err(Error::BitOutOfRange);
        }
        if !self.contains(address) {
            #[cfg(feature = "defmt")]
            defmt::trace!("bit-band: cell {=usize:#x} outside of {}", address, self);
            return Err(Error::OutsideRegion);
        }

        // In-window cells map into the alias window, which is non-null and does not wrap.
        unsafe { self.flag_unchecked(cell, bit) }.ok_or(Error::OutsideRegion)
    }

    /// Creates the flag for bit `bit` of `cell`, only validating the bit number.
    ///
    /// Returns `None` when `bit` is not in `0..8` or the translated address is null.
    ///
    /// # Safety
    ///
    /// `cell` has to lie inside the source window. Otherwise the flag refers to an
    /// arbitrary word, which is written by [`Flag::set`] and [`Flag::clear`].
    pub unsafe fn flag_unchecked<'a, C: StorageCell>(
        &self,
        cell: &'a C,
        bit: u8,
    ) -> Option<Flag<'a>> {
        let address = self.alias_address(cell.as_byte_ptr() as usize, bit)?;
        NonNull::new(address as *mut u32).map(|word| Flag::from_alias(word))
    }

    /// All eight flags of `cell`, indexed by bit number
    pub fn flags<'a, C: StorageCell>(&self, cell: &'a C) -> Option<[Flag<'a>; 8]> {
        let first = self.flag(cell, 0)?;
        let mut flags = [first; BITS_PER_CELL as usize];
        for (bit, flag) in flags.iter_mut().enumerate().skip(1) {
            *flag = self.flag(cell, bit as u8)?;
        }

        Some(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicU8;

    const SOURCE: usize = 0x2000_0000;
    const ALIAS: usize = 0x2200_0000;
    const SIZE: usize = 0x0010_0000;

    fn armv7m() -> Region {
        unsafe { Region::new(SOURCE, ALIAS, SIZE) }.unwrap()
    }

    #[test]
    fn alias_address_of_byte_four_bit_three() {
        let region = armv7m();

        assert_eq!(region.alias_address(0x2000_0004, 3), Some(0x2200_008C));
    }

    #[test]
    fn alias_address_edges() {
        let region = armv7m();

        assert_eq!(region.alias_address(SOURCE, 0), Some(ALIAS));
        assert_eq!(region.alias_address(SOURCE, 7), Some(ALIAS + 28));
        assert_eq!(
            region.alias_address(SOURCE + SIZE - 1, 7),
            Some(ALIAS + SIZE * 32 - 4)
        );
    }

    #[test]
    fn bit_eight_is_invalid() {
        let region = armv7m();

        assert_eq!(region.alias_address(0x2000_0004, 8), None);
        assert_eq!(region.alias_address(SOURCE, u8::MAX), None);
    }

    #[test]
    fn adjacent_bits_are_one_word_apart() {
        let region = armv7m();
        let bit0 = region.alias_address(0x2000_0010, 0).unwrap();
        let bit1 = region.alias_address(0x2000_0010, 1).unwrap();

        assert_eq!(bit1 - bit0, 4);
    }

    #[test]
    fn out_of_window_address_still_translates() {
        let region = armv7m();

        // one byte past the window lands one word past the alias window
        assert_eq!(
            region.alias_address(SOURCE + SIZE, 0),
            Some(ALIAS + SIZE * 32)
        );
        assert!(!region.contains(SOURCE + SIZE));
        assert!(!region.contains(SOURCE - 1));
    }

    #[test]
    fn locate_inverts_translation() {
        let region = armv7m();

        assert_eq!(region.locate(0x2200_008C), Some((0x2000_0004, 3)));
        assert_eq!(region.locate(ALIAS + 2), None);
        assert_eq!(region.locate(ALIAS - 4), None);
        assert_eq!(region.locate(ALIAS + SIZE * 32), None);
    }

    #[test]
    fn new_validates_windows() {
        unsafe {
            assert_eq!(Region::new(SOURCE, ALIAS, 0), Err(Error::EmptyRegion));
            assert_eq!(Region::new(SOURCE, ALIAS + 2, SIZE), Err(Error::MisalignedAlias));
            assert_eq!(Region::new(SOURCE, 0, SIZE), Err(Error::MisalignedAlias));
            assert_eq!(Region::new(SOURCE, ALIAS, usize::MAX), Err(Error::Overflow));
            assert_eq!(Region::new(usize::MAX, ALIAS, 2), Err(Error::Overflow));
            // alias window 0x2000_0000..0x2200_0000 swallows the source window
            assert_eq!(Region::new(SOURCE + 0x100, SOURCE, SIZE), Err(Error::Overlap));
            assert_eq!(Region::new(SOURCE + 4, SOURCE, 1), Err(Error::Overlap));
        }
    }

    #[test]
    fn accessors() {
        let region = armv7m();

        assert_eq!(region.source_base(), SOURCE);
        assert_eq!(region.alias_base(), ALIAS);
        assert_eq!(region.size(), SIZE);
        assert_eq!(region.alias_size(), 0x0200_0000);
        assert!(region.alias_contains(ALIAS + 0x01FF_FFFC));
        assert!(!region.alias_contains(ALIAS + 0x0200_0000));
    }

    #[cfg(any(feature = "cortex-m3", feature = "cortex-m4"))]
    #[test]
    fn sram_uses_architectural_map() {
        assert_eq!(Region::SRAM, armv7m());
    }

    #[test]
    fn host_cells_are_outside_sram() {
        let cell = AtomicU8::new(0);

        assert_eq!(Region::SRAM.try_flag(&cell, 0), Err(Error::OutsideRegion));
        assert_eq!(Region::SRAM.try_flag(&cell, 8), Err(Error::BitOutOfRange));
        assert!(Region::SRAM.flag(&cell, 3).is_none());
        assert!(Region::SRAM.flags(&cell).is_none());
    }

    #[test]
    fn error_display() {
        use std::string::ToString;

        assert_eq!(Error::BitOutOfRange.to_string(), "bit index out of range");
        assert_eq!(Error::Overlap.to_string(), "source and alias windows overlap");
    }
}
