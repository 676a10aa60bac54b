//! Big-endian stream primitives for interner persistence.
//!
//! ```text
//! u32        4 bytes, big-endian
//! utf        u16 big-endian byte length, then UTF-8 bytes
//! ```

use std::io::{self, Read, Write};

/// Longest string a `utf` record can hold.
pub const MAX_UTF_LEN: usize = u16::MAX as usize;

pub fn write_u32<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
  writer.write_all(&value.to_be_bytes())
}

pub fn read_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
  let mut buf4 = [0u8; 4];
  reader.read_exact(&mut buf4)?;
  Ok(u32::from_be_bytes(buf4))
}

/// Write a length-prefixed string.
///
/// Fails with `InvalidInput` if the encoded string exceeds [`MAX_UTF_LEN`].
pub fn write_utf<W: Write>(writer: &mut W, value: &str) -> io::Result<()> {
  let bytes = value.as_bytes();
  let len = u16::try_from(bytes.len()).map_err(|_| {
    io::Error::new(
      io::ErrorKind::InvalidInput,
      format!("string of {} bytes exceeds {MAX_UTF_LEN}", bytes.len()),
    )
  })?;
  writer.write_all(&len.to_be_bytes())?;
  writer.write_all(bytes)
}

/// Read a length-prefixed string.
///
/// Invalid UTF-8 is reported as `InvalidData`.
pub fn read_utf<R: Read>(reader: &mut R) -> io::Result<String> {
  let mut buf2 = [0u8; 2];
  reader.read_exact(&mut buf2)?;
  let len = u16::from_be_bytes(buf2) as usize;

  let mut bytes = vec![0u8; len];
  reader.read_exact(&mut bytes)?;
  String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
