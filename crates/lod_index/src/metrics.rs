//! Render pass metrics for debug overlays.
//!
//! Feature-gated (`metrics`) and runtime-toggled via [`COLLECT_METRICS`].
//! Counters on [`RenderStats`] are always kept; only the timing history and
//! running totals here are skipped when collection is off.
//!
//! # Usage
//!
//! ```ignore
//! use lod_index::metrics::COLLECT_METRICS;
//!
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! let avg = builder.metrics().avg_build_us(RenderPass::Shadow);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::render::{RenderPass, RenderStats};

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Fixed-capacity history, oldest evicted first.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity: capacity.max(1),
    }
  }

  pub fn push(&mut self, value: T) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Oldest to newest.
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl RollingWindow<u64> {
  pub fn sum(&self) -> u64 {
    self.buffer.iter().sum()
  }

  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      return 0.0;
    }
    self.sum() as f64 / self.buffer.len() as f64
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(128) // ~2 seconds at 60fps
  }
}

/// Per-pass history of render list builds.
#[derive(Debug, Clone, Default)]
pub struct RenderMetrics {
  /// Build times in microseconds, indexed by [`RenderPass::index`].
  pub build_timings: [RollingWindow<u64>; 2],
  /// Stats of the most recent recorded build per pass.
  pub last_stats: [Option<RenderStats>; 2],
  /// Builds recorded since creation.
  pub total_builds: u64,
  /// Box tests that failed and were treated as visible.
  pub total_culling_errors: u64,
  /// Sections skipped because their payload failed to collect.
  pub total_collect_errors: u64,
  /// Passes that fell back to no culling after a frustum update failure.
  pub total_frustum_fallbacks: u64,
}

impl RenderMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record one finished pass.
  pub fn record_pass(&mut self, stats: &RenderStats) {
    if !is_enabled() {
      return;
    }
    let slot = stats.pass.index();
    self.build_timings[slot].push(stats.build_us);
    self.last_stats[slot] = Some(*stats);
    self.total_builds += 1;
    self.total_culling_errors += stats.culling_errors as u64;
    self.total_collect_errors += stats.collect_errors as u64;
    if stats.frustum_fallback {
      self.total_frustum_fallbacks += 1;
    }
  }

  pub fn avg_build_us(&self, pass: RenderPass) -> f64 {
    self.build_timings[pass.index()].average()
  }

  pub fn last(&self, pass: RenderPass) -> Option<&RenderStats> {
    self.last_stats[pass.index()].as_ref()
  }

  /// Clear history. Running totals are cumulative and kept.
  pub fn reset(&mut self) {
    for window in &mut self.build_timings {
      window.clear();
    }
    self.last_stats = [None, None];
  }
}
