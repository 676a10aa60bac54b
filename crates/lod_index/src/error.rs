//! Error types.
//!
//! Contract errors ([`SectionPosError`], [`IndexError`]) go straight back to
//! the caller. Data and runtime errors ([`InternerError::DataCorrupted`],
//! [`CullingError`], [`CollectError`]) are turned into a log event and a
//! degraded result by whoever sits on the per-frame path.

use thiserror::Error;

use crate::quadtree::SectionPos;

/// Errors from packing or navigating section positions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionPosError {
  #[error("{field} value {value} outside of packable range [{min}, {max}]")]
  OutOfRange {
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
  },
  #[error("cannot move from detail level {from} to {to}; target must be coarser")]
  InvalidLevel { from: u8, to: u8 },
}

pub type SectionPosResult<T> = Result<T, SectionPosError>;

/// Errors from the per-section identity interner.
#[derive(Error, Debug)]
pub enum InternerError {
  #[error("ID map out of sync for pos {pos}: id [{id}] greater than the number of known ids [{len}]")]
  IdOutOfRange { id: u32, len: usize, pos: SectionPos },
  #[error("ID map for pos {pos} is corrupted: {reason}")]
  DataCorrupted { pos: SectionPos, reason: String },
  #[error("I/O error")]
  Io(#[from] std::io::Error),
}

pub type InternerResult<T> = Result<T, InternerError>;

/// Errors from the quad-tree index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
  #[error("invalid section position")]
  Position(#[from] SectionPosError),
  #[error("section detail level {level} outside of the index range [{min}, {top}]")]
  LevelOutOfTree { level: u8, min: u8, top: u8 },
}

pub type IndexResult<T> = Result<T, IndexError>;

/// Transient frustum failures. Never fatal: the pass renders unculled.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CullingError {
  #[error("view-projection matrix is degenerate")]
  DegenerateMatrix,
  #[error("box bounds are not finite")]
  NonFiniteBounds,
  #[error("frustum not updated for this pass")]
  NotUpdated,
  #[error("{0}")]
  Custom(String),
}

/// A payload failed its consistency check during render list collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectError {
  #[error("section {pos} is inconsistent: {reason}")]
  Inconsistent { pos: SectionPos, reason: String },
}
