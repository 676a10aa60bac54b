//! Section position packing constants and world-space units.
//!
//! # Packed Section Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PACKED SECTION POSITION (u64)                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  bit:  63        56 55                       28 27                    0 │
//! │        ┌──────────┬───────────────────────────┬───────────────────────┐ │
//! │        │  detail  │        X (signed)         │      Z (signed)       │ │
//! │        │  8 bits  │         28 bits           │       28 bits         │ │
//! │        └──────────┴───────────────────────────┴───────────────────────┘ │
//! │                                                                         │
//! │  X and Z are two's complement, sign-extended on unpack.                 │
//! │  The detail level sits in the high byte, so equal (x, z) at different   │
//! │  levels always pack to different keys.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Detail Levels
//!
//! ```text
//! Section width = BASE_UNIT << detail_level
//!
//!   level 0  →   1 block
//!   level 4  →  16 blocks (chunk)
//!   level 9  → 512 blocks (region)
//! ```

/// World-space width of a detail level 0 section, in blocks.
pub const BASE_UNIT: i64 = 1;

/// Bits reserved for the detail level.
pub const DETAIL_LEVEL_BITS: u32 = 8;

/// Bits reserved for each of the X and Z grid coordinates.
pub const COORD_BITS: u32 = 28;

/// Shift of the X field inside the packed value.
pub const X_SHIFT: u32 = COORD_BITS;

/// Shift of the detail level field inside the packed value.
pub const DETAIL_LEVEL_SHIFT: u32 = COORD_BITS * 2;

/// Mask for a single unpacked coordinate field (0x0FFF_FFFF).
pub const COORD_MASK: u64 = (1 << COORD_BITS) - 1;

/// Mask for the unpacked detail level field (0xFF).
pub const DETAIL_LEVEL_MASK: u64 = (1 << DETAIL_LEVEL_BITS) - 1;

/// Smallest grid coordinate that fits in `COORD_BITS` (-2^27).
pub const MIN_COORD: i32 = -(1 << (COORD_BITS - 1));

/// Largest grid coordinate that fits in `COORD_BITS` (2^27 - 1).
pub const MAX_COORD: i32 = (1 << (COORD_BITS - 1)) - 1;

/// Coarsest supported detail level.
///
/// Keeps `MAX_COORD << MAX_DETAIL_LEVEL` inside an i64 world coordinate.
pub const MAX_DETAIL_LEVEL: u8 = 30;

/// Detail level of a single block.
pub const BLOCK_DETAIL_LEVEL: u8 = 0;

/// Detail level of a 16-block chunk column.
pub const CHUNK_DETAIL_LEVEL: u8 = 4;

/// Detail level of a 512-block region.
pub const REGION_DETAIL_LEVEL: u8 = 9;

/// Separator between the biome and block-state serial strings of a
/// [`BlockBiomePair`](crate::interner::BlockBiomePair).
pub const BLOCK_STATE_SEPARATOR: &str = "_DH-BSW_";

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
