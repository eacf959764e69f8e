//! Prelude - Include traits for bit-band flags

pub use crate::cell::FlagExt as _FlagExtSramBitband;
pub use crate::cell::StorageCell as _StorageCellSramBitband;
