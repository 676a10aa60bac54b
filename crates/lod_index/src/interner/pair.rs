//! BlockBiomePair - the (biome, block state) identity of a voxel column.

use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;

use super::{codec, InternKey};
use crate::constants::BLOCK_STATE_SEPARATOR;
use crate::error::{InternerError, InternerResult};
use crate::quadtree::SectionPos;

/// Immutable biome + block state pair, compared by serial strings.
///
/// Serial form: `{biome}_DH-BSW_{block_state}`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BlockBiomePair {
  biome: Arc<str>,
  block_state: Arc<str>,
}

impl BlockBiomePair {
  pub fn new(biome: impl Into<Arc<str>>, block_state: impl Into<Arc<str>>) -> Self {
    Self {
      biome: biome.into(),
      block_state: block_state.into(),
    }
  }

  /// Biome serial string, e.g. `minecraft:plains`.
  pub fn biome(&self) -> &str {
    &self.biome
  }

  /// Block state serial string, e.g. `minecraft:stone`.
  pub fn block_state(&self) -> &str {
    &self.block_state
  }

  pub fn serial(&self) -> String {
    format!("{}{BLOCK_STATE_SEPARATOR}{}", self.biome, self.block_state)
  }

  /// Parse a serial string, splitting on the first separator.
  ///
  /// `pos` only feeds the error message.
  pub fn parse(serial: &str, pos: SectionPos) -> InternerResult<Self> {
    let Some((biome, block_state)) = serial.split_once(BLOCK_STATE_SEPARATOR) else {
      return Err(InternerError::DataCorrupted {
        pos,
        reason: format!("unable to find separator in entry [{serial}]"),
      });
    };
    Ok(Self::new(biome, block_state))
  }
}

impl InternKey for BlockBiomePair {
  fn write_to<W: Write>(&self, writer: &mut W) -> InternerResult<()> {
    codec::write_utf(writer, &self.serial())?;
    Ok(())
  }

  fn read_from<R: Read>(reader: &mut R, pos: SectionPos) -> InternerResult<Self> {
    let serial = codec::read_utf(reader)?;
    Self::parse(&serial, pos)
  }
}

impl fmt::Display for BlockBiomePair {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{BLOCK_STATE_SEPARATOR}{}", self.biome, self.block_state)
  }
}

impl fmt::Debug for BlockBiomePair {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BlockBiomePair")
      .field("biome", &&*self.biome)
      .field("block_state", &&*self.block_state)
      .finish()
  }
}
