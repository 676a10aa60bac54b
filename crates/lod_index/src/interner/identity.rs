//! IdentityInterner - dense, stable IDs for a section's attribute tuples.
//!
//! IDs are assigned in insertion order starting at 0 and are never reused or
//! renumbered for the life of an interner. Compact per-column storage refers
//! to entries by position, so the only ways to shrink an interner are
//! [`IdentityInterner::clear`] and dropping it.
//!
//! Workers populate interners concurrently; `add_if_absent` does a read-lock
//! lookup first and only takes the write lock for entries it has not seen.

use std::fmt;
use std::io::{self, Read, Write};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{codec, BlockBiomePair, InternKey};
use crate::error::{InternerError, InternerResult};
use crate::quadtree::SectionPos;

/// Upper bound on entries allocated ahead of reading them.
const PREALLOCATE_LIMIT: usize = 1024;

struct InternerState<T> {
  /// Owning section, for diagnostics only.
  pos: SectionPos,
  /// Index = ID.
  entries: Vec<T>,
  /// First ID assigned to each distinct entry.
  reverse: FxHashMap<T, u32>,
}

impl<T: InternKey> InternerState<T> {
  fn new(pos: SectionPos) -> Self {
    Self {
      pos,
      entries: Vec::new(),
      reverse: FxHashMap::default(),
    }
  }

  /// Append without deduplicating. Earlier IDs keep their reverse mapping.
  fn push(&mut self, entry: T) -> u32 {
    let id = self.entries.len() as u32;
    self.reverse.entry(entry.clone()).or_insert(id);
    self.entries.push(entry);
    id
  }
}

/// Thread-safe interner owned by one section.
pub struct IdentityInterner<T> {
  state: RwLock<InternerState<T>>,
}

impl<T: InternKey> IdentityInterner<T> {
  pub fn new(pos: SectionPos) -> Self {
    Self {
      state: RwLock::new(InternerState::new(pos)),
    }
  }

  /// Position of the owning section.
  pub fn pos(&self) -> SectionPos {
    self.state.read().pos
  }

  pub fn len(&self) -> usize {
    self.state.read().entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Highest assigned ID, `-1` when empty.
  pub fn max_valid_id(&self) -> i64 {
    self.len() as i64 - 1
  }

  /// Entry for `id`.
  ///
  /// An unknown ID means the interner is out of sync with the data that
  /// references it; the error names the owning section.
  pub fn get(&self, id: u32) -> InternerResult<T> {
    let state = self.state.read();
    state
      .entries
      .get(id as usize)
      .cloned()
      .ok_or(InternerError::IdOutOfRange {
        id,
        len: state.entries.len(),
        pos: state.pos,
      })
  }

  /// ID of `entry`, appending it on first sight.
  pub fn add_if_absent(&self, entry: T) -> u32 {
    if let Some(&id) = self.state.read().reverse.get(&entry) {
      return id;
    }

    let mut state = self.state.write();
    // Another worker may have added it between the two locks.
    if let Some(&id) = state.reverse.get(&entry) {
      return id;
    }
    state.push(entry)
  }

  /// Append every entry of `other` in order, duplicates included.
  ///
  /// Used when a data source is read in as-is and IDs must line up with it.
  pub fn add_all(&self, other: &IdentityInterner<T>) {
    let incoming = other.entries();
    let mut state = self.state.write();
    state.entries.reserve(incoming.len());
    for entry in incoming {
      state.push(entry);
    }
  }

  /// Append every entry of `other` and return where each one landed.
  ///
  /// `remap[old_id]` is the ID in `self` of `other`'s entry `old_id`.
  /// Existing IDs in `self` are untouched. Entries already present are still
  /// appended again; deduplication is left to callers that can afford to
  /// rewrite their ID references.
  pub fn merge(&self, other: &IdentityInterner<T>) -> Vec<u32> {
    // Snapshot first so merging an interner into itself cannot deadlock.
    let incoming = other.entries();
    let mut state = self.state.write();
    state.entries.reserve(incoming.len());
    incoming.into_iter().map(|entry| state.push(entry)).collect()
  }

  /// Snapshot of all entries in ID order.
  pub fn entries(&self) -> Vec<T> {
    self.state.read().entries.clone()
  }

  /// Reset for reuse by another section. Never partial.
  pub fn clear(&self, new_pos: SectionPos) {
    *self.state.write() = InternerState::new(new_pos);
  }

  /// Write `entry_count: u32` followed by every entry in ID order.
  pub fn serialize<W: Write>(&self, writer: &mut W) -> InternerResult<()> {
    let state = self.state.read();
    codec::write_u32(writer, state.entries.len() as u32)?;
    for entry in &state.entries {
      entry.write_to(writer)?;
    }
    Ok(())
  }

  /// Rebuild an interner written by [`serialize`](Self::serialize).
  ///
  /// A stream that ends before the declared entry count, or holds an
  /// undecodable entry, fails with [`InternerError::DataCorrupted`]. The
  /// partially read interner is dropped.
  pub fn deserialize<R: Read>(reader: &mut R, pos: SectionPos) -> InternerResult<Self> {
    let declared = codec::read_u32(reader).map_err(|e| corrupted_or_io(e, pos, "entry count"))?;
    if declared > i32::MAX as u32 {
      return Err(InternerError::DataCorrupted {
        pos,
        reason: format!("entry count [{declared}] is negative as a signed int"),
      });
    }

    let mut state = InternerState::new(pos);
    state.entries.reserve((declared as usize).min(PREALLOCATE_LIMIT));
    for read in 0..declared {
      let entry = match T::read_from(reader, pos) {
        Ok(entry) => entry,
        Err(InternerError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
          return Err(InternerError::DataCorrupted {
            pos,
            reason: format!("incorrect entry count: expected [{declared}], stream held [{read}]"),
          });
        }
        Err(InternerError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
          return Err(InternerError::DataCorrupted {
            pos,
            reason: format!("entry [{read}] is undecodable: {e}"),
          });
        }
        Err(e) => return Err(e),
      };
      state.push(entry);
    }

    Ok(Self {
      state: RwLock::new(state),
    })
  }
}

impl IdentityInterner<BlockBiomePair> {
  /// Biome serial string of entry `id`.
  pub fn biome(&self, id: u32) -> InternerResult<String> {
    self.get(id).map(|pair| pair.biome().to_owned())
  }

  /// Block state serial string of entry `id`.
  pub fn block_state(&self, id: u32) -> InternerResult<String> {
    self.get(id).map(|pair| pair.block_state().to_owned())
  }
}

impl<T> fmt::Debug for IdentityInterner<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.state.read();
    f.debug_struct("IdentityInterner")
      .field("pos", &state.pos)
      .field("len", &state.entries.len())
      .finish()
  }
}

fn corrupted_or_io(error: io::Error, pos: SectionPos, what: &str) -> InternerError {
  if error.kind() == io::ErrorKind::UnexpectedEof {
    InternerError::DataCorrupted {
      pos,
      reason: format!("stream ended before {what}"),
    }
  } else {
    InternerError::Io(error)
  }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;
