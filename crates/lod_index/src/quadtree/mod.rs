//! Quad-tree module for LOD-based section addressing.
//!
//! The tree is keyed by packed [`SectionPos`] values. Parent/child
//! relationships are computed via coordinate math; the index only stores the
//! nodes that exist and a per-node bitmask of populated quadrants.
//!
//! # LOD Convention
//!
//! Detail level 0 = finest (single block), higher = coarser.
//!
//! ```text
//! Section Width = BASE_UNIT << detail_level
//!
//!  level 2  +---------------+
//!           |       |       |
//!  level 1  |   2   |   3   |    quadrant bits: bit 0 = +X, bit 1 = +Z
//!           |-------+-------|
//!           |   0   |   1   |
//!           +---------------+  -> +X
//! ```
//!
//! # Module Structure
//!
//! - [`section_pos`]: `SectionPos` - packed, immutable section address
//! - [`bounds`]: `SectionBounds` - world-space XZ footprint
//! - [`config`]: `QuadTreeConfig` - detail level range of an index
//! - [`index`]: `QuadTreeIndex` - sparse, thread-safe tree with pruning
//!   traversal

pub mod bounds;
pub mod config;
pub mod index;
pub mod section_pos;

// Re-exports
pub use bounds::SectionBounds;
pub use config::QuadTreeConfig;
pub use index::{QuadTreeIndex, Traversal, TraversalNode};
pub use section_pos::SectionPos;
