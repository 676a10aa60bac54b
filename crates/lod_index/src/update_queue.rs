//! Cell update queue between world-data producers and the index owner.
//!
//! Following the stage pattern: Send (any thread) → Apply (owner) → Report
//!
//! Producers stream, load and unload sections on worker threads and send
//! [`CellUpdate`]s through a `crossbeam-channel`. The owner of the
//! [`QuadTreeIndex`] drains them between frames with
//! [`CellUpdateQueue::apply_pending`]. A section whose persisted data is
//! corrupted is marked invalid and reported; it never fails the drain.

use std::io::Cursor;
use std::sync::Arc;

use crossbeam_channel::{self as channel, Receiver, Sender};
use tracing::{error, warn};

use crate::error::InternerError;
use crate::interner::{BlockBiomePair, IdentityInterner};
use crate::quadtree::{QuadTreeIndex, SectionPos};
use crate::render::RenderSection;

/// One change to the section index.
pub enum CellUpdate<H> {
  /// Store a ready section at its own position.
  Insert(Arc<RenderSection<H>>),
  /// Unload a section.
  Remove(SectionPos),
  /// Rebuild a section from its persisted ID map.
  Load {
    pos: SectionPos,
    /// Stream written by [`IdentityInterner::serialize`].
    id_map_bytes: Vec<u8>,
    buffer: Option<H>,
  },
}

/// Outcome of one [`CellUpdateQueue::apply_pending`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
  pub inserted: usize,
  pub removed: usize,
  pub loaded: usize,
  /// Loads whose data failed to decode; the section is now invalid.
  pub corrupted: usize,
  /// Updates the index refused (detail level outside the tree).
  pub rejected: usize,
}

impl ApplyReport {
  /// Total updates drained.
  pub fn total(&self) -> usize {
    self.inserted + self.removed + self.loaded + self.corrupted + self.rejected
  }
}

/// Multi-producer queue of [`CellUpdate`]s.
pub struct CellUpdateQueue<H> {
  sender: Sender<CellUpdate<H>>,
  receiver: Receiver<CellUpdate<H>>,
}

impl<H> Default for CellUpdateQueue<H> {
  fn default() -> Self {
    Self::new()
  }
}

impl<H> CellUpdateQueue<H> {
  /// Unbounded queue.
  pub fn new() -> Self {
    let (sender, receiver) = channel::unbounded();
    Self { sender, receiver }
  }

  /// Queue that blocks producers once `capacity` updates are pending.
  pub fn bounded(capacity: usize) -> Self {
    let (sender, receiver) = channel::bounded(capacity);
    Self { sender, receiver }
  }

  /// Handle for a producer thread.
  pub fn sender(&self) -> Sender<CellUpdate<H>> {
    self.sender.clone()
  }

  /// Enqueue from the owning thread.
  pub fn send(&self, update: CellUpdate<H>) {
    // The queue holds a receiver, so the channel cannot be disconnected.
    let _ = self.sender.send(update);
  }

  /// Number of updates waiting.
  pub fn pending_count(&self) -> usize {
    self.receiver.len()
  }

  pub fn is_empty(&self) -> bool {
    self.receiver.is_empty()
  }
}

impl<H: Clone> CellUpdateQueue<H> {
  /// Apply every update queued so far to `index`.
  ///
  /// Updates sent while draining are left for the next call.
  pub fn apply_pending(&self, index: &QuadTreeIndex<Arc<RenderSection<H>>>) -> ApplyReport {
    let _span = tracing::info_span!("apply_cell_updates").entered();
    let mut report = ApplyReport::default();

    for update in self.receiver.try_iter().take(self.receiver.len()) {
      match update {
        CellUpdate::Insert(section) => {
          let pos = section.pos();
          match index.insert(pos, section) {
            Ok(_) => report.inserted += 1,
            Err(error) => {
              warn!(pos = %pos, %error, "section rejected by index");
              report.rejected += 1;
            }
          }
        }
        CellUpdate::Remove(pos) => {
          index.remove(&pos);
          report.removed += 1;
        }
        CellUpdate::Load {
          pos,
          id_map_bytes,
          buffer,
        } => match load_section(pos, &id_map_bytes, buffer) {
          Ok(section) => match index.insert(pos, Arc::new(section)) {
            Ok(_) => report.loaded += 1,
            Err(error) => {
              warn!(pos = %pos, %error, "loaded section rejected by index");
              report.rejected += 1;
            }
          },
          Err(error) => {
            error!(pos = %pos, %error, "section data corrupted; marking section invalid");
            index.mark_invalid(&pos);
            report.corrupted += 1;
          }
        },
      }
    }
    report
  }
}

fn load_section<H: Clone>(
  pos: SectionPos,
  id_map_bytes: &[u8],
  buffer: Option<H>,
) -> Result<RenderSection<H>, InternerError> {
  let id_map = IdentityInterner::<BlockBiomePair>::deserialize(&mut Cursor::new(id_map_bytes), pos)?;
  let section = RenderSection::with_id_map(pos, Arc::new(id_map));
  section.set_buffer(buffer);
  Ok(section)
}

#[cfg(test)]
#[path = "update_queue_test.rs"]
mod update_queue_test;
