//! lod_index - Engine independent LOD section indexing and render list assembly
//!
//! World data is stored as square sections of increasing size, one size per
//! detail level. This crate keeps track of which sections exist, which IDs
//! their data uses, and which of them a camera should draw this frame.
//!
//! # Features
//!
//! - **Quad-tree index**: sparse, level-bounded, concurrently updatable
//!   section index with pruning DFS traversal
//! - **Identity interning**: per-section (biome, block state) ID maps with a
//!   stable binary stream form and merge remapping
//! - **Culling frustums**: plane-extracted view frustum, camera-distance box
//!   culler and a pass-through frustum behind one trait
//! - **Render lists**: per-pass (primary, shadow) near-to-far lists built in
//!   parallel, with fail-open culling and per-pass counters
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lod_index::{
//!   CullingConfig, FrustumBounds, QuadTreeConfig, QuadTreeIndex, RenderListBuilder,
//!   RenderPass, RenderSection, SectionPos, ViewParams, WorldHeight,
//! };
//!
//! let index = QuadTreeIndex::new(QuadTreeConfig::new(4, 10));
//! let section = Arc::new(RenderSection::new(SectionPos::new(4, 0, 0)?));
//! section.set_buffer(Some(gpu_buffer));
//! index.insert(section.pos(), section)?;
//!
//! let mut builder = RenderListBuilder::new(CullingConfig::DEFAULT);
//! let mut frustum = FrustumBounds::new();
//! let view = ViewParams::new(camera_xz, view_projection, WorldHeight::DEFAULT);
//! for entry in builder.build(RenderPass::Primary, &index, &mut frustum, &view).iter() {
//!   draw(entry.handle);
//! }
//! ```

pub mod constants;
pub mod error;

// Sparse quad-tree of sections
pub mod quadtree;
pub use quadtree::{QuadTreeConfig, QuadTreeIndex, SectionBounds, SectionPos};

// Per-section ID maps
pub mod interner;
pub use interner::{BlockBiomePair, IdentityInterner, InternKey};

// Visibility tests
pub mod culling;
pub use culling::{BoxCullFrustum, CullingFrustum, FrustumBounds, NeverCullFrustum};

// Per-frame render lists
pub mod render;
pub use render::{
  CullingConfig, PassRequest, RenderList, RenderListBuilder, RenderPass, RenderSection,
  RenderSource, RenderStats, ViewParams, WorldHeight,
};

// Pass timing and counters
pub mod metrics;
pub use metrics::RenderMetrics;

// Producer to index hand-off
pub mod update_queue;
pub use update_queue::{ApplyReport, CellUpdate, CellUpdateQueue};

pub use error::{CollectError, CullingError, IndexError, InternerError, SectionPosError};

#[cfg(test)]
mod test_utils;
