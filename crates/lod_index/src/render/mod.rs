//! Per-frame render list assembly.
//!
//! # Module Structure
//!
//! - [`pass`]: `RenderPass`, `CullingConfig`, `WorldHeight`, `ViewParams`
//! - [`section`]: `RenderSource` trait and the `RenderSection` payload
//! - [`render_list`]: `RenderList` - near-to-far ordered output
//! - [`builder`]: `RenderListBuilder` - clear / update / traverse / collect

pub mod builder;
pub mod pass;
pub mod render_list;
pub mod section;

// Re-exports
pub use builder::{PassRequest, RenderListBuilder, RenderStats};
pub use pass::{CullingConfig, RenderPass, ViewParams, WorldHeight};
pub use render_list::{RenderEntry, RenderList};
pub use section::{RenderSection, RenderSource};
