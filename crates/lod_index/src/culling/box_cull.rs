//! BoxCullFrustum - distance box around the camera.
//!
//! Shadow maps need casters outside the camera frustum, so shadow passes
//! usually cull by distance alone: anything farther than `max_distance` from
//! the camera on any axis is dropped.

use glam::{DVec3, Mat4};

use super::{check_height, CullingFrustum};
use crate::error::CullingError;

#[derive(Clone, Debug)]
pub struct BoxCullFrustum {
  max_distance: f64,
  camera: DVec3,
  /// Allowed region `(min, max)`, set by `update`.
  allowed: Option<(DVec3, DVec3)>,
  min_y: f64,
  max_y: f64,
}

impl BoxCullFrustum {
  pub fn new(max_distance: f64) -> Self {
    Self {
      max_distance: max_distance.abs(),
      camera: DVec3::ZERO,
      allowed: None,
      min_y: 0.0,
      max_y: 0.0,
    }
  }

  pub fn max_distance(&self) -> f64 {
    self.max_distance
  }

  /// Move the box center. Takes effect on the next `update`.
  pub fn set_camera(&mut self, camera: DVec3) {
    self.camera = camera;
  }
}

impl CullingFrustum for BoxCullFrustum {
  /// The matrix is ignored; only the camera and the height range matter.
  fn update(&mut self, min_y: f64, max_y: f64, _view_projection: &Mat4) -> Result<(), CullingError> {
    self.allowed = None;
    check_height(min_y, max_y)?;
    if !self.camera.is_finite() || !self.max_distance.is_finite() {
      return Err(CullingError::NonFiniteBounds);
    }
    let extent = DVec3::splat(self.max_distance);
    self.allowed = Some((self.camera - extent, self.camera + extent));
    self.min_y = min_y;
    self.max_y = max_y;
    Ok(())
  }

  fn intersects(
    &self,
    min_x: i64,
    min_z: i64,
    width: i64,
    _detail_level: u8,
  ) -> Result<bool, CullingError> {
    let (allowed_min, allowed_max) = self.allowed.ok_or(CullingError::NotUpdated)?;
    let min = DVec3::new(min_x as f64, self.min_y, min_z as f64);
    let max = DVec3::new((min_x + width) as f64, self.max_y, (min_z + width) as f64);

    let culled = max.cmplt(allowed_min).any() || min.cmpgt(allowed_max).any();
    Ok(!culled)
  }
}
