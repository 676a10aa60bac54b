//! RenderList - sections ordered near-to-far around the view center.
//!
//! Renderers submit translucent geometry in this order, so the order is part
//! of the contract: ascending Euclidean distance between the section's
//! world-space center and the view center, ties broken by packed position.
//! Each position appears at most once; inserting it again moves the entry.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::quadtree::SectionPos;

/// f64 with a total order, so it can key a `BTreeMap`.
#[derive(Clone, Copy, Debug)]
struct DistanceKey(f64);

impl PartialEq for DistanceKey {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for DistanceKey {}

impl PartialOrd for DistanceKey {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for DistanceKey {
  fn cmp(&self, other: &Self) -> Ordering {
    self.0.total_cmp(&other.0)
  }
}

/// One entry of a [`RenderList`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderEntry<'a, H> {
  pub pos: SectionPos,
  pub distance: f64,
  pub handle: &'a H,
}

/// Distance-ordered, position-deduplicated set of render handles.
#[derive(Clone, Debug)]
pub struct RenderList<H> {
  ordered: BTreeMap<(DistanceKey, SectionPos), H>,
  distances: FxHashMap<SectionPos, DistanceKey>,
}

impl<H> RenderList<H> {
  pub fn new() -> Self {
    Self {
      ordered: BTreeMap::new(),
      distances: FxHashMap::default(),
    }
  }

  /// Add or move the entry for `pos`. Returns the handle it replaced.
  pub fn insert(&mut self, pos: SectionPos, distance: f64, handle: H) -> Option<H> {
    let previous = self.remove(&pos);
    let key = DistanceKey(distance);
    self.distances.insert(pos, key);
    self.ordered.insert((key, pos), handle);
    previous
  }

  pub fn remove(&mut self, pos: &SectionPos) -> Option<H> {
    let key = self.distances.remove(pos)?;
    self.ordered.remove(&(key, *pos))
  }

  pub fn contains(&self, pos: &SectionPos) -> bool {
    self.distances.contains_key(pos)
  }

  /// Distance the entry for `pos` is sorted by.
  pub fn distance_of(&self, pos: &SectionPos) -> Option<f64> {
    self.distances.get(pos).map(|key| key.0)
  }

  pub fn len(&self) -> usize {
    self.ordered.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ordered.is_empty()
  }

  pub fn clear(&mut self) {
    self.ordered.clear();
    self.distances.clear();
  }

  /// Entries nearest first.
  pub fn iter(&self) -> impl Iterator<Item = RenderEntry<'_, H>> + '_ {
    self
      .ordered
      .iter()
      .map(|(&(DistanceKey(distance), pos), handle)| RenderEntry {
        pos,
        distance,
        handle,
      })
  }

  /// Handles nearest first.
  pub fn handles(&self) -> impl Iterator<Item = &H> + '_ {
    self.ordered.values()
  }

  /// Positions nearest first.
  pub fn positions(&self) -> Vec<SectionPos> {
    self.ordered.keys().map(|(_, pos)| *pos).collect()
  }
}

impl<H> Default for RenderList<H> {
  fn default() -> Self {
    Self::new()
  }
}
