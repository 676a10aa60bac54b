//! SectionPos - packed, immutable address of a quad-tree section.
//!
//! A section is identified by its detail level and its X/Z grid coordinates
//! at that level. Detail level 0 = finest (one block), higher = coarser.
//! Parent/child relationships are pure coordinate math; see the layout
//! diagram in [`crate::constants`].

use std::fmt;

use glam::DVec2;

use super::SectionBounds;
use crate::constants::{
  BASE_UNIT, COORD_MASK, DETAIL_LEVEL_MASK, DETAIL_LEVEL_SHIFT, MAX_COORD, MAX_DETAIL_LEVEL,
  MIN_COORD, X_SHIFT,
};
use crate::error::{SectionPosError, SectionPosResult};

/// Quad-tree section position, packed into a single u64.
///
/// Equality, hashing and ordering all work on the packed value, which
/// includes the detail level, so same-coordinate sections at different levels
/// never compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(try_from = "u64", into = "u64")
)]
pub struct SectionPos(u64);

impl SectionPos {
  /// Pack a section position.
  ///
  /// Fails with [`SectionPosError::OutOfRange`] when any field exceeds its
  /// reserved bit width.
  pub fn new(detail_level: u8, x: i32, z: i32) -> SectionPosResult<Self> {
    if detail_level > MAX_DETAIL_LEVEL {
      return Err(SectionPosError::OutOfRange {
        field: "detail_level",
        value: detail_level as i64,
        min: 0,
        max: MAX_DETAIL_LEVEL as i64,
      });
    }
    check_coord("x", x)?;
    check_coord("z", z)?;

    let packed = ((detail_level as u64) << DETAIL_LEVEL_SHIFT)
      | (((x as u32 as u64) & COORD_MASK) << X_SHIFT)
      | ((z as u32 as u64) & COORD_MASK);
    Ok(Self(packed))
  }

  /// Rebuild a position from its packed value.
  ///
  /// The coordinate fields always decode; only the detail level is checked.
  pub fn from_packed(packed: u64) -> SectionPosResult<Self> {
    let detail_level = (packed >> DETAIL_LEVEL_SHIFT) & DETAIL_LEVEL_MASK;
    if detail_level > MAX_DETAIL_LEVEL as u64 {
      return Err(SectionPosError::OutOfRange {
        field: "detail_level",
        value: detail_level as i64,
        min: 0,
        max: MAX_DETAIL_LEVEL as i64,
      });
    }
    Ok(Self(packed))
  }

  /// Raw packed value (map key / wire form).
  #[inline]
  pub fn packed(&self) -> u64 {
    self.0
  }

  /// Level of detail (0 = finest).
  #[inline]
  pub fn detail_level(&self) -> u8 {
    ((self.0 >> DETAIL_LEVEL_SHIFT) & DETAIL_LEVEL_MASK) as u8
  }

  /// Grid X at this section's own detail level.
  #[inline]
  pub fn x(&self) -> i32 {
    sign_extend((self.0 >> X_SHIFT) & COORD_MASK)
  }

  /// Grid Z at this section's own detail level.
  #[inline]
  pub fn z(&self) -> i32 {
    sign_extend(self.0 & COORD_MASK)
  }

  /// Unpack into `(detail_level, x, z)`.
  #[inline]
  pub fn decode(&self) -> (u8, i32, i32) {
    (self.detail_level(), self.x(), self.z())
  }

  /// Edge length in blocks: `BASE_UNIT << detail_level`.
  #[inline]
  pub fn width(&self) -> i64 {
    BASE_UNIT << self.detail_level()
  }

  /// World-space footprint (min corner + width).
  #[inline]
  pub fn bounds(&self) -> SectionBounds {
    let width = self.width();
    SectionBounds::new(self.x() as i64 * width, self.z() as i64 * width, width)
  }

  /// World-space center of the footprint on the XZ plane.
  #[inline]
  pub fn center(&self) -> DVec2 {
    self.bounds().center()
  }

  /// Euclidean distance between the world-space centers of two sections.
  ///
  /// Works across detail levels since it never looks at raw grid coordinates.
  #[inline]
  pub fn distance_to(&self, other: &SectionPos) -> f64 {
    self.center().distance(other.center())
  }

  /// Euclidean distance from this section's center to a world-space point.
  #[inline]
  pub fn distance_to_point(&self, point: DVec2) -> f64 {
    self.center().distance(point)
  }

  /// Manhattan distance between the world-space centers of two sections.
  #[inline]
  pub fn manhattan_distance_to(&self, other: &SectionPos) -> f64 {
    let d = (self.center() - other.center()).abs();
    d.x + d.y
  }

  /// Ancestor at a coarser detail level.
  ///
  /// Fails with [`SectionPosError::InvalidLevel`] unless
  /// `detail_level < target <= MAX_DETAIL_LEVEL`.
  pub fn parent_at(&self, target: u8) -> SectionPosResult<Self> {
    let level = self.detail_level();
    if target <= level || target > MAX_DETAIL_LEVEL {
      return Err(SectionPosError::InvalidLevel {
        from: level,
        to: target,
      });
    }
    let shift = (target - level) as u32;
    // Arithmetic shift floors negative coordinates onto the right parent.
    Self::new(target, self.x() >> shift, self.z() >> shift)
  }

  /// Direct parent (detail level + 1), `None` at the coarsest level.
  pub fn parent(&self) -> Option<Self> {
    self.parent_at(self.detail_level() + 1).ok()
  }

  /// Child in the given quadrant (detail level - 1).
  ///
  /// Quadrant bits: bit 0 = +X, bit 1 = +Z. Returns `None` at detail level 0,
  /// for quadrants outside 0..4, or when the child coordinate does not pack.
  pub fn child(&self, quadrant: u8) -> Option<Self> {
    let level = self.detail_level();
    if level == 0 || quadrant >= 4 {
      return None;
    }
    let cx = (quadrant & 1) as i32;
    let cz = ((quadrant >> 1) & 1) as i32;
    let x = self.x().checked_mul(2)?.checked_add(cx)?;
    let z = self.z().checked_mul(2)?.checked_add(cz)?;
    Self::new(level - 1, x, z).ok()
  }

  /// Quadrant this section occupies inside its parent (inverse of [`child`]).
  ///
  /// [`child`]: SectionPos::child
  #[inline]
  pub fn quadrant(&self) -> u8 {
    ((self.x() & 1) | ((self.z() & 1) << 1)) as u8
  }

  /// All packable children in quadrant order.
  pub fn children(&self) -> impl Iterator<Item = SectionPos> + '_ {
    (0..4u8).filter_map(move |quadrant| self.child(quadrant))
  }

  /// True if `other` is this section or lies inside its footprint at a finer
  /// detail level.
  pub fn contains(&self, other: &SectionPos) -> bool {
    let level = self.detail_level();
    let other_level = other.detail_level();
    if other_level > level {
      return false;
    }
    if other_level == level {
      return self == other;
    }
    other.parent_at(level).is_ok_and(|p| p == *self)
  }
}

impl TryFrom<u64> for SectionPos {
  type Error = SectionPosError;

  fn try_from(packed: u64) -> SectionPosResult<Self> {
    Self::from_packed(packed)
  }
}

impl From<SectionPos> for u64 {
  fn from(pos: SectionPos) -> u64 {
    pos.packed()
  }
}

fn check_coord(field: &'static str, value: i32) -> SectionPosResult<()> {
  if value < MIN_COORD || value > MAX_COORD {
    return Err(SectionPosError::OutOfRange {
      field,
      value: value as i64,
      min: MIN_COORD as i64,
      max: MAX_COORD as i64,
    });
  }
  Ok(())
}

#[inline]
fn sign_extend(field: u64) -> i32 {
  // Shift the 28-bit field to the top of an i32, then back down arithmetically.
  (((field as u32) << 4) as i32) >> 4
}

impl fmt::Display for SectionPos {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}*{},{}", self.detail_level(), self.x(), self.z())
  }
}

impl fmt::Debug for SectionPos {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "SectionPos({self})")
  }
}

#[cfg(test)]
#[path = "section_pos_test.rs"]
mod section_pos_test;
