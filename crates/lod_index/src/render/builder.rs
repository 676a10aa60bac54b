//! RenderListBuilder - per-frame, per-pass render list assembly.
//!
//! Each pass runs the same steps:
//!
//! ```text
//! clear         drop last frame's list, reset counters
//! select        culling toggle for this pass
//! update        frustum.update(world height, view-projection)
//! traverse      index.traverse(stop = culling on && payload && !frustum.intersects(node))
//! collect       enabled payloads with a handle -> list, keyed by distance
//! publish       counters + timing
//! ```
//!
//! Nothing on this path aborts a pass. A failed frustum update disables
//! culling for the pass, a failed box test keeps the node, a payload that
//! fails to collect is skipped for this frame only. Each case is logged with
//! the section position.

use tracing::{debug, warn};
use web_time::Instant;

use super::{CullingConfig, RenderList, RenderPass, RenderSource, ViewParams};
use crate::culling::CullingFrustum;
use crate::metrics::RenderMetrics;
use crate::quadtree::QuadTreeIndex;

/// Counters published after a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderStats {
  pub pass: RenderPass,
  /// Sections in the render list.
  pub visible: usize,
  /// Sections rejected by the frustum. Sections below a rejected one are
  /// skipped without being counted.
  pub culled: usize,
  /// Whether culling actually ran for this pass.
  pub culling_enabled: bool,
  /// The frustum update failed and the pass fell back to no culling.
  pub frustum_fallback: bool,
  /// Box tests that failed and were treated as visible.
  pub culling_errors: usize,
  /// Payloads skipped because they failed to collect.
  pub collect_errors: usize,
  /// Wall time of the pass in microseconds.
  pub build_us: u64,
}

impl RenderStats {
  pub fn new(pass: RenderPass) -> Self {
    Self {
      pass,
      visible: 0,
      culled: 0,
      culling_enabled: false,
      frustum_fallback: false,
      culling_errors: 0,
      collect_errors: 0,
      build_us: 0,
    }
  }

  /// Debug overlay line, e.g. `VBO Render Count: [12/40]`.
  ///
  /// The `/total` part is only shown while culling is on.
  pub fn debug_line(&self) -> String {
    let prefix = match self.pass {
      RenderPass::Primary => "VBO Render Count",
      RenderPass::Shadow => "Shadow VBO Render Count",
    };
    if self.culling_enabled {
      format!("{prefix}: [{}/{}]", self.visible, self.visible + self.culled)
    } else {
      format!("{prefix}: [{}]", self.visible)
    }
  }
}

/// One pass request for [`RenderListBuilder::build_frame`].
pub struct PassRequest<'a> {
  pub frustum: &'a mut dyn CullingFrustum,
  pub view: &'a ViewParams,
}

struct PassState<H> {
  list: RenderList<H>,
  stats: RenderStats,
}

impl<H> PassState<H> {
  fn new(pass: RenderPass) -> Self {
    Self {
      list: RenderList::new(),
      stats: RenderStats::new(pass),
    }
  }
}

/// Builds one render list per pass. Lists are rebuilt from scratch every
/// call, never patched.
pub struct RenderListBuilder<H> {
  config: CullingConfig,
  primary: PassState<H>,
  shadow: PassState<H>,
  metrics: RenderMetrics,
}

impl<H: Send> RenderListBuilder<H> {
  pub fn new(config: CullingConfig) -> Self {
    Self {
      config,
      primary: PassState::new(RenderPass::Primary),
      shadow: PassState::new(RenderPass::Shadow),
      metrics: RenderMetrics::new(),
    }
  }

  pub fn config(&self) -> &CullingConfig {
    &self.config
  }

  /// Takes effect on the next build.
  pub fn set_config(&mut self, config: CullingConfig) {
    self.config = config;
  }

  /// List produced by the last build of `pass`.
  pub fn render_list(&self, pass: RenderPass) -> &RenderList<H> {
    &self.state(pass).list
  }

  /// Counters of the last build of `pass`.
  pub fn stats(&self, pass: RenderPass) -> &RenderStats {
    &self.state(pass).stats
  }

  pub fn debug_line(&self, pass: RenderPass) -> String {
    self.stats(pass).debug_line()
  }

  pub fn metrics(&self) -> &RenderMetrics {
    &self.metrics
  }

  /// Rebuild the list for one pass.
  pub fn build<P>(
    &mut self,
    pass: RenderPass,
    index: &QuadTreeIndex<P>,
    frustum: &mut dyn CullingFrustum,
    view: &ViewParams,
  ) -> &RenderList<H>
  where
    P: RenderSource<Handle = H> + Clone,
  {
    let culling_enabled = self.config.culling_enabled(pass);
    let state = match pass {
      RenderPass::Primary => &mut self.primary,
      RenderPass::Shadow => &mut self.shadow,
    };
    build_pass(state, index, frustum, view, culling_enabled);
    self.metrics.record_pass(&state.stats);
    &state.list
  }

  /// Rebuild the primary list and, if requested, the shadow list.
  ///
  /// The two passes share nothing but the index, so they run in parallel.
  pub fn build_frame<P>(
    &mut self,
    index: &QuadTreeIndex<P>,
    primary: PassRequest<'_>,
    shadow: Option<PassRequest<'_>>,
  ) where
    P: RenderSource<Handle = H> + Clone + Send + Sync,
  {
    let primary_culling = self.config.culling_enabled(RenderPass::Primary);
    let shadow_culling = self.config.culling_enabled(RenderPass::Shadow);
    let primary_state = &mut self.primary;
    let shadow_state = &mut self.shadow;

    match shadow {
      Some(shadow) => {
        rayon::join(
          || build_pass(primary_state, index, primary.frustum, primary.view, primary_culling),
          || build_pass(shadow_state, index, shadow.frustum, shadow.view, shadow_culling),
        );
        self.metrics.record_pass(&self.primary.stats);
        self.metrics.record_pass(&self.shadow.stats);
      }
      None => {
        build_pass(primary_state, index, primary.frustum, primary.view, primary_culling);
        self.metrics.record_pass(&self.primary.stats);
      }
    }
  }

  fn state(&self, pass: RenderPass) -> &PassState<H> {
    match pass {
      RenderPass::Primary => &self.primary,
      RenderPass::Shadow => &self.shadow,
    }
  }
}

impl<H: Send> Default for RenderListBuilder<H> {
  fn default() -> Self {
    Self::new(CullingConfig::default())
  }
}

fn build_pass<H, P>(
  state: &mut PassState<H>,
  index: &QuadTreeIndex<P>,
  frustum: &mut dyn CullingFrustum,
  view: &ViewParams,
  culling_enabled: bool,
) where
  P: RenderSource<Handle = H> + Clone,
{
  let pass = state.stats.pass;
  let _span = tracing::info_span!("render_list::build", pass = pass.label()).entered();
  let start = Instant::now();

  // Clear
  let mut stats = {
    let _span = tracing::info_span!("clear").entered();
    state.list.clear();
    let mut stats = RenderStats::new(pass);
    stats.culling_enabled = culling_enabled;
    stats
  };

  // Update
  if stats.culling_enabled {
    let _span = tracing::info_span!("update_frustum").entered();
    let height = view.world_height;
    if let Err(error) = frustum.update(
      height.min_y as f64,
      height.max_y as f64,
      &view.view_projection,
    ) {
      warn!(%pass, %error, "frustum update failed; rendering pass without culling");
      stats.culling_enabled = false;
      stats.frustum_fallback = true;
    }
  }

  // Traverse + collect
  {
    let _span = tracing::info_span!("traverse").entered();
    let frustum: &dyn CullingFrustum = frustum;
    let culling_enabled = stats.culling_enabled;
    let mut culled = 0usize;
    let mut culling_errors = 0usize;

    // Structural nodes were never candidates: not tested, not counted.
    let nodes = index.traverse(|pos, payload| {
      if !culling_enabled || payload.is_none() {
        return false;
      }
      let bounds = pos.bounds();
      match frustum.intersects(bounds.min_x, bounds.min_z, bounds.width, pos.detail_level()) {
        Ok(true) => false,
        Ok(false) => {
          culled += 1;
          true
        }
        Err(error) => {
          warn!(%pass, pos = %pos, %error, "culling test failed; keeping section");
          culling_errors += 1;
          false
        }
      }
    });

    for node in nodes {
      let Some(payload) = node.payload else {
        continue;
      };
      if !payload.rendering_enabled() {
        continue;
      }
      match payload.render_handle() {
        Ok(Some(handle)) => {
          let distance = node.pos.distance_to_point(view.center);
          state.list.insert(node.pos, distance, handle);
        }
        Ok(None) => {}
        Err(error) => {
          warn!(%pass, pos = %node.pos, %error, "skipping section for this frame");
          stats.collect_errors += 1;
        }
      }
    }

    stats.culled = culled;
    stats.culling_errors = culling_errors;
  }

  // Publish
  let _span = tracing::info_span!("publish").entered();
  stats.visible = state.list.len();
  stats.build_us = start.elapsed().as_micros() as u64;
  debug!(
    %pass,
    visible = stats.visible,
    culled = stats.culled,
    culling = stats.culling_enabled,
    build_us = stats.build_us,
    "render list built"
  );
  state.stats = stats;
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
