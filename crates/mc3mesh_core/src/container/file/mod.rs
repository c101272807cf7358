use std::fs;
use std::path::Path;

use crate::container::bytes::Cursor;
use crate::container::reloc::file_offset;
use crate::container::{MagicCheck, Relocation, Result};

/// Opened container with its relocation resolved.
///
/// The whole file is held in memory; every stage reads from this buffer.
#[derive(Debug, Clone)]
pub struct ContainerFile {
	relocation: Relocation,
	bytes: Vec<u8>,
}

impl ContainerFile {
	/// Read a container from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let bytes = fs::read(path)?;
		Self::from_bytes(bytes)
	}

	/// Wrap in-memory container bytes.
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
		let relocation = Relocation::parse(&bytes)?;
		tracing::debug!(offset = relocation.offset(), len = bytes.len(), "container relocation resolved");
		Ok(Self { relocation, bytes })
	}

	/// Return the raw container bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Return container length in bytes.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return whether the container holds no bytes.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Return the pointer relocation for this container.
	pub fn relocation(&self) -> Relocation {
		self.relocation
	}

	/// Return a cursor positioned at `at`.
	pub fn cursor_at(&self, at: usize) -> Cursor<'_> {
		Cursor::at(&self.bytes, at)
	}

	/// Read one byte at `at`.
	pub fn read_u8_at(&self, at: usize) -> Result<u8> {
		self.cursor_at(at).read_u8()
	}

	/// Read a stored pointer at `at` and relocate it to a signed file address.
	pub fn read_ptr_at(&self, at: usize) -> Result<i64> {
		let stored = self.cursor_at(at).read_u32_le()?;
		Ok(self.relocation.apply(stored))
	}

	/// Read a stored pointer at `at` and require a non-negative file address.
	pub fn read_file_ptr_at(&self, at: usize, field: &'static str) -> Result<usize> {
		file_offset(self.read_ptr_at(at)?, field)
	}

	/// Read four bytes at `at` for comparison with `expected`.
	pub fn read_magic_at(&self, at: usize, expected: [u8; 4], structure: &'static str) -> Result<MagicCheck> {
		let found = self.cursor_at(at).read_code4()?;
		Ok(MagicCheck {
			structure,
			at,
			expected,
			found,
		})
	}

	/// Return the bytes in `[start, end)`, shortened to what the file holds.
	pub fn region(&self, start: usize, end: usize) -> &[u8] {
		let end = end.min(self.bytes.len());
		let start = start.min(end);
		&self.bytes[start..end]
	}
}
