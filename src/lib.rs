//! Atomic single-bit flags in Cortex-M3/M4 SRAM
//!
//! Bit-banding maps each bit of the lowest MiB of SRAM onto a full word of the alias
//! region. Writing `1` or `0` to that word sets or clears the bit; reading it tests the
//! bit. Each access is a single bus transaction, so bits of a byte shared between
//! thread mode and interrupt handlers can be updated without masking interrupts.
//!
//! The SRAM and alias base addresses are fixed at build time, either by the
//! `cortex-m3` / `cortex-m4` features (architectural map) or through the `SRAM_BASE`
//! and `SRAM_BB_BASE` environment variables. The crate does not build without one.
//!
//! ```no_run
//! use core::sync::atomic::AtomicU8;
//! use sram_bitband::prelude::*;
//!
//! static STATE: AtomicU8 = AtomicU8::new(0);
//!
//! // `None` if the bit is out of range or STATE is not in the bit-band region
//! let error = STATE.flag(3).unwrap();
//! error.set();
//! assert!(error.is_set());
//! error.clear();
//! ```

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod access;
pub mod cell;
pub mod flag;
pub mod prelude;
pub mod region;

mod config {
    include!(concat!(env!("OUT_DIR"), "/regions.rs"));
}

pub use crate::cell::{FlagExt, StorageCell};
pub use crate::flag::Flag;
pub use crate::region::{Error, Region, BITS_PER_CELL};
