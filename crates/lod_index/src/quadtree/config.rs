//! QuadTreeConfig - detail level range of a quad-tree index.

use super::SectionPos;
use crate::constants::{BLOCK_DETAIL_LEVEL, MAX_DETAIL_LEVEL};
use crate::error::{IndexError, IndexResult};

/// Detail level range accepted by a [`QuadTreeIndex`](super::QuadTreeIndex).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadTreeConfig {
  /// Coarsest level; sections at this level are the tree roots.
  pub top_detail_level: u8,

  /// Finest level that may hold a section. Typically 0.
  pub min_detail_level: u8,
}

impl QuadTreeConfig {
  /// Roots 4096 blocks wide, leaves down to single blocks.
  pub const DEFAULT: Self = Self {
    top_detail_level: 12,
    min_detail_level: BLOCK_DETAIL_LEVEL,
  };

  /// Create a config, clamping the top level to the packable range.
  pub fn new(min_detail_level: u8, top_detail_level: u8) -> Self {
    let top_detail_level = top_detail_level.min(MAX_DETAIL_LEVEL);
    Self {
      top_detail_level,
      min_detail_level: min_detail_level.min(top_detail_level),
    }
  }

  /// Number of levels between the roots and the finest sections, inclusive.
  #[inline]
  pub fn level_count(&self) -> u8 {
    self.top_detail_level - self.min_detail_level + 1
  }

  /// Check that a section fits in this tree.
  pub fn validate(&self, pos: &SectionPos) -> IndexResult<()> {
    let level = pos.detail_level();
    if level > self.top_detail_level || level < self.min_detail_level {
      return Err(IndexError::LevelOutOfTree {
        level,
        min: self.min_detail_level,
        top: self.top_detail_level,
      });
    }
    Ok(())
  }

  /// Root section containing `pos`.
  pub fn root_of(&self, pos: &SectionPos) -> IndexResult<SectionPos> {
    self.validate(pos)?;
    if pos.detail_level() == self.top_detail_level {
      return Ok(*pos);
    }
    Ok(pos.parent_at(self.top_detail_level)?)
  }
}

impl Default for QuadTreeConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
