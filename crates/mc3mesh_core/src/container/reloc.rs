use crate::container::bytes::Cursor;
use crate::container::{ContainerError, Result};

/// Load-time pointer correction shared by every pointer field in a container.
///
/// Containers store pointers as they were valid when the asset was loaded.
/// The first word of the file holds the load address of the `0x80` header
/// mark, which gives the distance between stored and file addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
	offset: i64,
}

impl Relocation {
	/// File offset the stored load address refers to.
	pub const BASE: i64 = 0x80;

	/// Build a relocation from the stored load address word.
	pub fn from_load_address(load_address: u32) -> Self {
		Self {
			offset: i64::from(load_address) - Self::BASE,
		}
	}

	/// Parse the relocation from the first four bytes of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let load_address = Cursor::new(bytes).read_u32_le()?;
		Ok(Self::from_load_address(load_address))
	}

	/// Signed offset subtracted from every stored pointer.
	pub fn offset(&self) -> i64 {
		self.offset
	}

	/// Map a stored pointer to a (possibly negative) file address.
	pub fn apply(&self, stored: u32) -> i64 {
		i64::from(stored) - self.offset
	}
}

/// Convert a signed file address into a byte offset.
pub(crate) fn file_offset(addr: i64, field: &'static str) -> Result<usize> {
	if addr < 0 {
		return Err(ContainerError::NegativeAddress { field, addr });
	}
	usize::try_from(addr).map_err(|_| ContainerError::AddressOutOfRange { field, addr })
}
