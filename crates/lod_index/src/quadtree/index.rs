//! QuadTreeIndex - sparse quad-tree of sections keyed by [`SectionPos`].
//!
//! There are no parent/child pointers. Each node only remembers which of its
//! four quadrants hold a node (`child_mask`); the positions themselves come
//! from coordinate math. Inserting a section links every ancestor up to the
//! configured top level, so the roots reach every populated section.
//!
//! # Concurrency
//!
//! Workers insert and remove sections while the render thread walks the
//! tree. The traversal takes the read lock for one node visit at a time, so
//! a pass never blocks writers for longer than a single hash lookup. A node
//! removed mid-walk is simply not visited.

use std::collections::BTreeSet;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::{QuadTreeConfig, SectionPos};
use crate::error::IndexResult;

/// One node of the sparse tree.
struct QuadNode<P> {
  payload: Option<P>,
  /// Bit per quadrant (see [`SectionPos::child`]) with a child node present.
  child_mask: u8,
}

impl<P> QuadNode<P> {
  fn empty() -> Self {
    Self {
      payload: None,
      child_mask: 0,
    }
  }

  fn is_prunable(&self) -> bool {
    self.payload.is_none() && self.child_mask == 0
  }
}

struct TreeState<P> {
  nodes: FxHashMap<SectionPos, QuadNode<P>>,
  roots: BTreeSet<SectionPos>,
  invalid: FxHashSet<SectionPos>,
  payload_count: usize,
}

impl<P> TreeState<P> {
  fn new() -> Self {
    Self {
      nodes: FxHashMap::default(),
      roots: BTreeSet::new(),
      invalid: FxHashSet::default(),
      payload_count: 0,
    }
  }

  /// Create/link ancestors from `pos` up to the top level.
  fn link_ancestors(&mut self, pos: SectionPos, top: u8) {
    let mut child = pos;
    while child.detail_level() < top {
      let Some(parent) = child.parent() else {
        break;
      };
      let bit = 1u8 << child.quadrant();
      let node = self.nodes.entry(parent).or_insert_with(QuadNode::empty);
      if node.child_mask & bit != 0 {
        // Already linked, and so is everything above it.
        return;
      }
      node.child_mask |= bit;
      child = parent;
    }
    self.roots.insert(child);
  }

  /// Remove empty, childless nodes from `pos` upward.
  fn prune_from(&mut self, pos: SectionPos, top: u8) {
    let mut current = pos;
    loop {
      match self.nodes.get(&current) {
        Some(node) if node.is_prunable() => {}
        _ => return,
      }
      self.nodes.remove(&current);

      if current.detail_level() >= top {
        self.roots.remove(&current);
        return;
      }
      let Some(parent) = current.parent() else {
        return;
      };
      if let Some(node) = self.nodes.get_mut(&parent) {
        node.child_mask &= !(1u8 << current.quadrant());
      }
      current = parent;
    }
  }

  fn take_payload(&mut self, pos: &SectionPos) -> Option<P> {
    let previous = self.nodes.get_mut(pos).and_then(|node| node.payload.take());
    if previous.is_some() {
      self.payload_count -= 1;
    }
    previous
  }
}

/// A node produced by [`QuadTreeIndex::traverse`].
#[derive(Clone, Debug)]
pub struct TraversalNode<P> {
  pub pos: SectionPos,
  /// `None` for structural nodes that only exist to reach their children.
  pub payload: Option<P>,
}

/// Sparse quad-tree of sections, safe to share between threads.
///
/// `P` is the per-section payload. Traversal hands out clones, so payloads
/// are usually cheap handles (`Arc<...>`).
pub struct QuadTreeIndex<P> {
  config: QuadTreeConfig,
  state: RwLock<TreeState<P>>,
}

impl<P> QuadTreeIndex<P> {
  /// Create an empty index.
  pub fn new(config: QuadTreeConfig) -> Self {
    Self {
      config,
      state: RwLock::new(TreeState::new()),
    }
  }

  pub fn config(&self) -> &QuadTreeConfig {
    &self.config
  }

  /// Store a payload at `pos`, creating structural ancestors as needed.
  ///
  /// Returns the payload previously stored there. Inserting at a position
  /// marked invalid re-syncs it.
  pub fn insert(&self, pos: SectionPos, payload: P) -> IndexResult<Option<P>> {
    self.config.validate(&pos)?;

    let mut state = self.state.write();
    state.invalid.remove(&pos);
    let previous = state
      .nodes
      .entry(pos)
      .or_insert_with(QuadNode::empty)
      .payload
      .replace(payload);
    if previous.is_none() {
      state.payload_count += 1;
    }
    state.link_ancestors(pos, self.config.top_detail_level);
    Ok(previous)
  }

  /// Remove the payload at `pos`, pruning nodes left empty.
  ///
  /// A structural node that still has children stays in place, so sibling
  /// sections remain reachable.
  pub fn remove(&self, pos: &SectionPos) -> Option<P> {
    let mut state = self.state.write();
    let previous = state.take_payload(pos);
    state.prune_from(*pos, self.config.top_detail_level);
    previous
  }

  /// Drop the payload at `pos` and flag the position as invalid.
  ///
  /// Used when a section's persisted data turns out to be corrupted. The
  /// flag is cleared by the next [`insert`](Self::insert) at `pos`.
  pub fn mark_invalid(&self, pos: &SectionPos) -> Option<P> {
    let mut state = self.state.write();
    state.invalid.insert(*pos);
    let previous = state.take_payload(pos);
    state.prune_from(*pos, self.config.top_detail_level);
    previous
  }

  /// Check if `pos` is flagged invalid.
  pub fn is_invalid(&self, pos: &SectionPos) -> bool {
    self.state.read().invalid.contains(pos)
  }

  /// Check if `pos` holds a payload.
  pub fn contains(&self, pos: &SectionPos) -> bool {
    self
      .state
      .read()
      .nodes
      .get(pos)
      .is_some_and(|node| node.payload.is_some())
  }

  /// Number of sections holding a payload.
  pub fn len(&self) -> usize {
    self.state.read().payload_count
  }

  /// Check if no section holds a payload.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Number of nodes, structural ones included.
  pub fn node_count(&self) -> usize {
    self.state.read().nodes.len()
  }

  /// Number of root nodes.
  pub fn root_count(&self) -> usize {
    self.state.read().roots.len()
  }

  /// Positions holding a payload, in ascending packed order.
  pub fn positions(&self) -> Vec<SectionPos> {
    let state = self.state.read();
    let mut positions: Vec<_> = state
      .nodes
      .iter()
      .filter(|(_, node)| node.payload.is_some())
      .map(|(pos, _)| *pos)
      .collect();
    positions.sort_unstable();
    positions
  }

  /// Drop every node and invalid flag.
  pub fn clear(&self) {
    *self.state.write() = TreeState::new();
  }
}

impl<P: Clone> QuadTreeIndex<P> {
  /// Clone of the payload at `pos`.
  pub fn get(&self, pos: &SectionPos) -> Option<P> {
    self
      .state
      .read()
      .nodes
      .get(pos)
      .and_then(|node| node.payload.clone())
  }

  /// Lazy depth-first walk with subtree skipping.
  ///
  /// `stop(pos, payload)` runs once per visited node. Returning `true` skips
  /// that node and its whole subtree. An empty payload is not a reason to
  /// stop; structural nodes are yielded and their children visited.
  ///
  /// Roots are visited in ascending packed order, children in quadrant order.
  /// Every call starts a fresh walk.
  pub fn traverse<F>(&self, stop: F) -> Traversal<'_, P, F>
  where
    F: FnMut(SectionPos, Option<&P>) -> bool,
  {
    let stack = self.state.read().roots.iter().rev().copied().collect();
    Traversal {
      index: self,
      stack,
      stop,
    }
  }
}

impl<P> Default for QuadTreeIndex<P> {
  fn default() -> Self {
    Self::new(QuadTreeConfig::default())
  }
}

/// Iterator returned by [`QuadTreeIndex::traverse`].
pub struct Traversal<'a, P, F> {
  index: &'a QuadTreeIndex<P>,
  stack: Vec<SectionPos>,
  stop: F,
}

impl<P, F> Iterator for Traversal<'_, P, F>
where
  P: Clone,
  F: FnMut(SectionPos, Option<&P>) -> bool,
{
  type Item = TraversalNode<P>;

  fn next(&mut self) -> Option<Self::Item> {
    while let Some(pos) = self.stack.pop() {
      let (payload, children, invalid) = {
        let state = self.index.state.read();
        let Some(node) = state.nodes.get(&pos) else {
          continue;
        };
        let children: SmallVec<[SectionPos; 4]> = (0..4u8)
          .filter(|quadrant| node.child_mask & (1 << quadrant) != 0)
          .filter_map(|quadrant| pos.child(quadrant))
          .collect();
        (node.payload.clone(), children, state.invalid.contains(&pos))
      };

      // Invalid sections are hidden, their descendants are not.
      if invalid {
        self.stack.extend(children.into_iter().rev());
        continue;
      }

      if (self.stop)(pos, payload.as_ref()) {
        continue;
      }

      // Reversed so quadrant 0 pops first.
      self.stack.extend(children.into_iter().rev());
      return Some(TraversalNode { pos, payload });
    }
    None
  }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
