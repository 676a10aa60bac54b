use glam::Mat4;

use super::CullingFrustum;
use crate::error::CullingError;

/// Pass-through frustum: every section is visible.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCullFrustum;

impl CullingFrustum for NeverCullFrustum {
  fn update(&mut self, _min_y: f64, _max_y: f64, _view_projection: &Mat4) -> Result<(), CullingError> {
    Ok(())
  }

  fn intersects(&self, _min_x: i64, _min_z: i64, _width: i64, _detail_level: u8) -> Result<bool, CullingError> {
    Ok(true)
  }
}
