//! Shared test fixtures.

use std::sync::Once;

use glam::{Mat4, Vec3};

static TRACING: Once = Once::new();

/// Route `tracing` output to the test harness. Safe to call from every test.
pub fn init_tracing() {
  TRACING.call_once(|| {
    let _ = tracing_subscriber::fmt()
      .with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
          .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lod_index=debug")),
      )
      .with_test_writer()
      .try_init();
  });
}

/// Camera high above the world looking straight down, seeing exactly
/// `x in [min_x, max_x]`, `z in [min_z, max_z]` and `y in [-1000, 999.9]`.
///
/// With up = -Z, view-space x is world x and view-space y is world -z.
pub fn top_down_ortho(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Mat4 {
  let view = Mat4::look_at_rh(Vec3::new(0.0, 1000.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);
  let projection = Mat4::orthographic_rh_gl(min_x, max_x, -max_z, -min_z, 0.1, 2000.0);
  projection * view
}

/// Perspective camera at `eye` looking at `target`, 90 degree vertical FOV.
pub fn perspective_gl(eye: Vec3, target: Vec3) -> Mat4 {
  let view = Mat4::look_at_rh(eye, target, Vec3::Y);
  let projection = Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 1000.0);
  projection * view
}
