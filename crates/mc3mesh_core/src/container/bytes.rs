use crate::container::{ContainerError, Result};

/// Simple bounded cursor over an immutable byte slice.
///
/// Positions are absolute offsets into the backing slice, so errors report
/// file offsets directly.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Create a cursor positioned at `pos`.
	///
	/// Positions past the end are allowed; the first read reports the shortfall.
	pub fn at(bytes: &'a [u8], pos: usize) -> Self {
		Self { bytes, pos }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(ContainerError::TruncatedRead {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a four-byte magic code.
	pub fn read_code4(&mut self) -> Result<[u8; 4]> {
		let raw = self.read_exact(4)?;
		let mut out = [0_u8; 4];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		let raw = self.read_exact(2)?;
		Ok(u16::from_le_bytes([raw[0], raw[1]]))
	}

	/// Read a little-endian `i16`.
	pub fn read_i16_le(&mut self) -> Result<i16> {
		let raw = self.read_exact(2)?;
		Ok(i16::from_le_bytes([raw[0], raw[1]]))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		let raw = self.read_exact(4)?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		Ok(u32::from_le_bytes(buf))
	}

	/// Read bytes up to (not including) the first terminator byte or the end of data.
	///
	/// The terminator itself is consumed when present.
	pub fn read_terminated(&mut self, terminators: &[u8]) -> &'a [u8] {
		let start = self.pos.min(self.bytes.len());
		let rem = &self.bytes[start..];
		match rem.iter().position(|byte| terminators.contains(byte)) {
			Some(rel_end) => {
				self.pos = start + rel_end + 1;
				&rem[..rel_end]
			}
			None => {
				self.pos = self.bytes.len();
				rem
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::container::ContainerError;

	use super::Cursor;

	#[test]
	fn reads_little_endian_scalars() {
		let bytes = [0x34, 0x12, 0xFE, 0xFF, 0x78, 0x56, 0x34, 0x12];
		let mut cursor = Cursor::new(&bytes);
		assert_eq!(cursor.read_u16_le().expect("u16"), 0x1234);
		assert_eq!(cursor.read_i16_le().expect("i16"), -2);
		assert_eq!(cursor.read_u32_le().expect("u32"), 0x1234_5678);
		assert_eq!(cursor.remaining(), 0);
	}

	#[test]
	fn short_read_reports_absolute_offset() {
		let bytes = [0_u8; 6];
		let mut cursor = Cursor::at(&bytes, 4);
		let err = cursor.read_u32_le().expect_err("only two bytes remain");
		assert!(matches!(err, ContainerError::TruncatedRead { at: 4, need: 4, rem: 2 }));
	}

	#[test]
	fn cursor_past_end_fails_on_first_read() {
		let bytes = [1_u8, 2];
		let mut cursor = Cursor::at(&bytes, 10);
		assert_eq!(cursor.remaining(), 0);
		assert!(matches!(cursor.read_u8(), Err(ContainerError::TruncatedRead { at: 10, need: 1, rem: 0 })));
	}

	#[test]
	fn terminated_read_stops_at_any_terminator_or_end() {
		let bytes = b"ab\xCDcd\0ef";
		let mut cursor = Cursor::new(bytes);
		assert_eq!(cursor.read_terminated(&[0x00, 0xCD]), b"ab");
		assert_eq!(cursor.read_terminated(&[0x00, 0xCD]), b"cd");
		assert_eq!(cursor.read_terminated(&[0x00, 0xCD]), b"ef");
		assert_eq!(cursor.read_terminated(&[0x00, 0xCD]), b"");
	}
}
