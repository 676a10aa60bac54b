//! Per-pass configuration for render list building.

use std::fmt;

use glam::{DVec2, Mat4};

/// Which view a render list is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderPass {
	/// Main camera.
	Primary,
	/// Shadow caster (sun/light) view.
	Shadow,
}

impl RenderPass {
	pub const ALL: [RenderPass; 2] = [RenderPass::Primary, RenderPass::Shadow];

	/// Dense index for per-pass arrays.
	#[inline]
	pub fn index(self) -> usize {
		match self {
			RenderPass::Primary => 0,
			RenderPass::Shadow => 1,
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			RenderPass::Primary => "primary",
			RenderPass::Shadow => "shadow",
		}
	}
}

impl fmt::Display for RenderPass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Frustum culling toggles, one per pass.
///
/// Disabling culling for one pass never affects the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CullingConfig {
	/// Render every section in the primary pass.
	pub disable_frustum_culling: bool,
	/// Render every section in the shadow pass.
	pub disable_shadow_pass_frustum_culling: bool,
}

impl CullingConfig {
	/// Both passes culled.
	pub const DEFAULT: Self = Self {
		disable_frustum_culling: false,
		disable_shadow_pass_frustum_culling: false,
	};

	/// Nothing culled (debugging).
	pub const NO_CULLING: Self = Self {
		disable_frustum_culling: true,
		disable_shadow_pass_frustum_culling: true,
	};

	/// Primary pass culled, shadow map always gets full geometry.
	pub const SHADOW_UNCULLED: Self = Self {
		disable_frustum_culling: false,
		disable_shadow_pass_frustum_culling: true,
	};

	/// Check if culling is enabled for `pass`.
	#[inline]
	pub fn culling_enabled(&self, pass: RenderPass) -> bool {
		match pass {
			RenderPass::Primary => !self.disable_frustum_culling,
			RenderPass::Shadow => !self.disable_shadow_pass_frustum_culling,
		}
	}
}

impl Default for CullingConfig {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// Vertical extent of the world, in blocks. `max_y` is inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldHeight {
	pub min_y: i32,
	pub max_y: i32,
}

impl WorldHeight {
	pub const DEFAULT: Self = Self { min_y: -64, max_y: 320 };

	pub fn new(min_y: i32, max_y: i32) -> Self {
		Self { min_y, max_y }
	}

	/// Build from a minimum and a total height.
	pub fn from_min_and_height(min_y: i32, height: i32) -> Self {
		Self {
			min_y,
			max_y: min_y.saturating_add(height),
		}
	}
}

impl Default for WorldHeight {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// Camera (or light) state for one pass of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewParams {
	/// XZ point render lists are sorted around.
	pub center: DVec2,
	/// World-to-clip transform fed to the frustum.
	pub view_projection: Mat4,
	pub world_height: WorldHeight,
}

impl ViewParams {
	pub fn new(center: DVec2, view_projection: Mat4, world_height: WorldHeight) -> Self {
		Self {
			center,
			view_projection,
			world_height,
		}
	}
}
