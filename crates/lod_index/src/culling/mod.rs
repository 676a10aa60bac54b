//! Visibility tests for render passes.
//!
//! A [`CullingFrustum`] answers one question per quad-tree node: can any part
//! of this section's column be visible? Implementations must be conservative:
//! reporting a visible section as hidden is a bug, reporting a hidden section
//! as visible only costs a draw.
//!
//! Each render pass owns its own frustum instance. Errors never abort a
//! pass; the render list builder treats them as "not culled".
//!
//! # Implementations
//!
//! - [`FrustumBounds`]: six planes from a view-projection matrix
//! - [`BoxCullFrustum`]: fixed-distance box around the camera (shadow passes)
//! - [`NeverCullFrustum`]: everything visible

pub mod box_cull;
pub mod frustum_bounds;
pub mod never_cull;

pub use box_cull::BoxCullFrustum;
pub use frustum_bounds::FrustumBounds;
pub use never_cull::NeverCullFrustum;

use glam::Mat4;

use crate::error::CullingError;

/// Pluggable view-volume test over section footprints.
pub trait CullingFrustum: Send + Sync {
  /// Recompute the view volume. Called once per pass, before traversal.
  ///
  /// `min_y..=max_y` is the vertical extent every section column spans.
  fn update(&mut self, min_y: f64, max_y: f64, view_projection: &Mat4) -> Result<(), CullingError>;

  /// Test the column `[min_x, min_x + width) x [min_y, max_y] x [min_z, min_z + width)`.
  fn intersects(
    &self,
    min_x: i64,
    min_z: i64,
    width: i64,
    detail_level: u8,
  ) -> Result<bool, CullingError>;
}

/// Validate the vertical extent passed to [`CullingFrustum::update`].
pub(crate) fn check_height(min_y: f64, max_y: f64) -> Result<(), CullingError> {
  if !min_y.is_finite() || !max_y.is_finite() || min_y > max_y {
    return Err(CullingError::NonFiniteBounds);
  }
  Ok(())
}
