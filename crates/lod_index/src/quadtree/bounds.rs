//! World-space footprint of a section on the XZ plane.

use glam::DVec2;

/// Square block-space footprint of a section.
///
/// `min` is inclusive, `min + width` is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SectionBounds {
	/// Minimum X corner in blocks.
	pub min_x: i64,
	/// Minimum Z corner in blocks.
	pub min_z: i64,
	/// Edge length in blocks.
	pub width: i64,
}

impl SectionBounds {
	/// Create a footprint from its min corner and width.
	///
	/// # Panics
	/// Debug-asserts that width > 0.
	pub fn new(min_x: i64, min_z: i64, width: i64) -> Self {
		debug_assert!(width > 0, "section width must be positive");
		Self { min_x, min_z, width }
	}

	/// Exclusive max X corner.
	#[inline]
	pub fn max_x(&self) -> i64 {
		self.min_x + self.width
	}

	/// Exclusive max Z corner.
	#[inline]
	pub fn max_z(&self) -> i64 {
		self.min_z + self.width
	}

	/// Center of the footprint.
	#[inline]
	pub fn center(&self) -> DVec2 {
		let half = self.width as f64 * 0.5;
		DVec2::new(self.min_x as f64 + half, self.min_z as f64 + half)
	}

	/// Check if two footprints share any interior area.
	#[inline]
	pub fn overlaps(&self, other: &SectionBounds) -> bool {
		self.min_x < other.max_x()
			&& self.max_x() > other.min_x
			&& self.min_z < other.max_z()
			&& self.max_z() > other.min_z
	}

	/// Check if a block-space point lies inside the footprint.
	#[inline]
	pub fn contains_point(&self, x: f64, z: f64) -> bool {
		x >= self.min_x as f64 && x < self.max_x() as f64 && z >= self.min_z as f64 && z < self.max_z() as f64
	}
}
