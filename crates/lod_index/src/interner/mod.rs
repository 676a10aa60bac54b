//! Per-section identity interning.
//!
//! Each section keeps an [`IdentityInterner`] that maps distinct attribute
//! tuples (by default [`BlockBiomePair`]) to dense IDs, so column data can
//! store a small integer instead of the full tuple.
//!
//! # Stream Format
//!
//! ```text
//! entry_count: u32 (big-endian)
//! entry[0] .. entry[entry_count - 1]   each in its InternKey encoding
//! ```

pub mod codec;
pub mod identity;
pub mod pair;

use std::hash::Hash;
use std::io::{Read, Write};

pub use identity::IdentityInterner;
pub use pair::BlockBiomePair;

use crate::error::InternerResult;
use crate::quadtree::SectionPos;

/// A value that can be interned and persisted.
///
/// Equality and hashing must be structural: two values that encode to the
/// same bytes must compare equal.
pub trait InternKey: Clone + Eq + Hash + Send + Sync {
  fn write_to<W: Write>(&self, writer: &mut W) -> InternerResult<()>;

  /// Decode one value. `pos` is the owning section, for error reporting.
  ///
  /// A stream that ends mid-value must surface as
  /// [`InternerError::Io`](crate::error::InternerError::Io) with
  /// `UnexpectedEof` so the caller can report the truncation.
  fn read_from<R: Read>(reader: &mut R, pos: SectionPos) -> InternerResult<Self>;
}
