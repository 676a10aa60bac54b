//! Render-side payloads stored in the quad-tree index.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::CollectError;
use crate::interner::{BlockBiomePair, IdentityInterner};
use crate::quadtree::SectionPos;

/// A payload the render list builder can collect.
pub trait RenderSource {
  /// Opaque handle the renderer draws (typically a GPU buffer id).
  type Handle;

  /// `false` when the section was explicitly hidden.
  fn rendering_enabled(&self) -> bool;

  /// Current handle, `None` while nothing has been uploaded.
  ///
  /// Errors mean the payload failed a consistency check; the builder skips
  /// the section for this frame.
  fn render_handle(&self) -> Result<Option<Self::Handle>, CollectError>;
}

impl<T: RenderSource + ?Sized> RenderSource for Arc<T> {
  type Handle = T::Handle;

  fn rendering_enabled(&self) -> bool {
    (**self).rendering_enabled()
  }

  fn render_handle(&self) -> Result<Option<Self::Handle>, CollectError> {
    (**self).render_handle()
  }
}

/// Render state of one loaded section.
///
/// Shared between the worker that uploads its buffer and the render thread,
/// so everything mutable sits behind a lock or an atomic.
pub struct RenderSection<H> {
  pos: SectionPos,
  id_map: RwLock<Option<Arc<IdentityInterner<BlockBiomePair>>>>,
  buffer: RwLock<Option<H>>,
  enabled: AtomicBool,
}

impl<H: Clone> RenderSection<H> {
  /// Empty, enabled section.
  pub fn new(pos: SectionPos) -> Self {
    Self {
      pos,
      id_map: RwLock::new(None),
      buffer: RwLock::new(None),
      enabled: AtomicBool::new(true),
    }
  }

  /// Section whose column data is described by `id_map`.
  pub fn with_id_map(pos: SectionPos, id_map: Arc<IdentityInterner<BlockBiomePair>>) -> Self {
    let section = Self::new(pos);
    *section.id_map.write() = Some(id_map);
    section
  }

  pub fn pos(&self) -> SectionPos {
    self.pos
  }

  pub fn id_map(&self) -> Option<Arc<IdentityInterner<BlockBiomePair>>> {
    self.id_map.read().clone()
  }

  pub fn set_id_map(&self, id_map: Option<Arc<IdentityInterner<BlockBiomePair>>>) {
    *self.id_map.write() = id_map;
  }

  pub fn buffer(&self) -> Option<H> {
    self.buffer.read().clone()
  }

  /// Swap in a new buffer handle, returning the old one for disposal.
  pub fn set_buffer(&self, buffer: Option<H>) -> Option<H> {
    std::mem::replace(&mut *self.buffer.write(), buffer)
  }

  pub fn set_rendering_enabled(&self, enabled: bool) {
    self.enabled.store(enabled, Ordering::Release);
  }
}

impl<H: Clone> RenderSource for RenderSection<H> {
  type Handle = H;

  fn rendering_enabled(&self) -> bool {
    self.enabled.load(Ordering::Acquire)
  }

  fn render_handle(&self) -> Result<Option<H>, CollectError> {
    let buffer = self.buffer.read();
    if buffer.is_none() {
      return Ok(None);
    }
    // A buffer built from another section's ID map would draw the wrong blocks.
    if let Some(id_map) = self.id_map.read().as_ref() {
      let owner = id_map.pos();
      if owner != self.pos {
        return Err(CollectError::Inconsistent {
          pos: self.pos,
          reason: format!("ID map belongs to section {owner}"),
        });
      }
    }
    Ok(buffer.clone())
  }
}
