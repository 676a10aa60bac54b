//! FrustumBounds - plane-based frustum culling.
//!
//! Planes are extracted from the rows of the view-projection matrix
//! (Gribb/Hartmann) and normalized so plane distances are in world units.
//!
//! ```text
//! left   = r3 + r0      right = r3 - r0
//! bottom = r3 + r1      top   = r3 - r1
//! near   = r3 + r2      far   = r3 - r2
//! ```
//!
//! The near plane uses the `[-w, w]` depth convention. For `[0, w]`
//! projections that plane sits behind the real one, so the test stays
//! conservative for both.

use glam::{DMat4, DVec3, DVec4, Mat4};

use super::{check_height, CullingFrustum};
use crate::error::CullingError;

/// Slack applied to plane distances to absorb f32 matrix precision.
const PLANE_EPSILON: f64 = 1e-4;

/// Normal length below which a plane is considered degenerate.
const MIN_NORMAL_LENGTH: f64 = 1e-12;

/// Camera frustum over section columns.
#[derive(Clone, Debug, Default)]
pub struct FrustumBounds {
  planes: Option<[DVec4; 6]>,
  min_y: f64,
  max_y: f64,
}

impl FrustumBounds {
  pub fn new() -> Self {
    Self::default()
  }

  /// Normalized planes from the last successful update.
  pub fn planes(&self) -> Option<&[DVec4; 6]> {
    self.planes.as_ref()
  }

  /// Test a world-space box. Requires a prior successful update.
  pub fn intersects_box(&self, min: DVec3, max: DVec3) -> Result<bool, CullingError> {
    let planes = self.planes.as_ref().ok_or(CullingError::NotUpdated)?;
    if !min.is_finite() || !max.is_finite() {
      return Err(CullingError::NonFiniteBounds);
    }

    for plane in planes {
      // Corner furthest along the plane normal
      let p = DVec3::new(
        if plane.x >= 0.0 { max.x } else { min.x },
        if plane.y >= 0.0 { max.y } else { min.y },
        if plane.z >= 0.0 { max.z } else { min.z },
      );
      if plane.truncate().dot(p) + plane.w < -PLANE_EPSILON {
        return Ok(false);
      }
    }
    Ok(true)
  }
}

impl CullingFrustum for FrustumBounds {
  fn update(&mut self, min_y: f64, max_y: f64, view_projection: &Mat4) -> Result<(), CullingError> {
    // A failed update must not leave the previous frame's planes behind.
    self.planes = None;
    check_height(min_y, max_y)?;
    self.planes = Some(extract_planes(&view_projection.as_dmat4())?);
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
    let min = DVec3::new(min_x as f64, self.min_y, min_z as f64);
    let max = DVec3::new((min_x + width) as f64, self.max_y, (min_z + width) as f64);
    self.intersects_box(min, max)
  }
}

/// Extract and normalize the six clip planes of `m`.
pub fn extract_planes(m: &DMat4) -> Result<[DVec4; 6], CullingError> {
  let determinant = m.determinant();
  if !determinant.is_finite() || determinant.abs() < f64::EPSILON {
    return Err(CullingError::DegenerateMatrix);
  }

  let (r0, r1, r2, r3) = (m.row(0), m.row(1), m.row(2), m.row(3));
  let mut planes = [
    r3 + r0, // left
    r3 - r0, // right
    r3 + r1, // bottom
    r3 - r1, // top
    r3 + r2, // near
    r3 - r2, // far
  ];

  for plane in &mut planes {
    let length = plane.truncate().length();
    if !length.is_finite() || length < MIN_NORMAL_LENGTH {
      return Err(CullingError::DegenerateMatrix);
    }
    *plane /= length;
  }
  Ok(planes)
}

#[cfg(test)]
#[path = "frustum_bounds_test.rs"]
mod frustum_bounds_test;
