use std::fmt;

use crate::container::reloc::file_offset;
use crate::container::{ContainerError, ContainerFile, Diagnostics, Directory, Result, Warning};

/// Bytes that end a package name.
pub const NAME_TERMINATORS: [u8; 2] = [0x00, 0xCD];
/// Stand-in for name bytes outside printable ASCII.
pub const NAME_PLACEHOLDER: char = '?';

/// Decoded package name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageName {
	/// Name read from the name table.
	Text(String),
	/// The name pointer could not be followed.
	InvalidPointer,
}

impl PackageName {
	/// Return the decoded text, if any.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::InvalidPointer => None,
		}
	}
}

impl fmt::Display for PackageName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) => f.write_str(text),
			Self::InvalidPointer => f.write_str("<invalid pointer>"),
		}
	}
}

/// One selectable package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
	/// 1-based catalog index.
	pub index: usize,
	/// File offset of the package's group header, when resolvable.
	pub address: Option<usize>,
	/// Package name.
	pub name: PackageName,
}

/// Ordered list of packages in a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
	entries: Vec<PackageEntry>,
}

impl Catalog {
	/// Build a catalog from ordered entries.
	pub fn new(entries: Vec<PackageEntry>) -> Self {
		Self { entries }
	}

	/// All entries in stored order.
	pub fn entries(&self) -> &[PackageEntry] {
		&self.entries
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Return whether the catalog has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Look up a 1-based selection.
	pub fn select(&self, index: usize) -> Result<&PackageEntry> {
		index
			.checked_sub(1)
			.and_then(|i| self.entries.get(i))
			.ok_or(ContainerError::InvalidSelection { index, count: self.entries.len() })
	}
}

fn table_slot(table: i64, i: usize) -> Result<usize> {
	file_offset(table + (i * 4) as i64, "package table slot")
}

fn read_address(file: &ContainerFile, directory: &Directory, i: usize) -> Result<usize> {
	let slot = table_slot(directory.package_mesh_list, i)?;
	file.read_file_ptr_at(slot, "package")
}

fn read_name(file: &ContainerFile, directory: &Directory, i: usize) -> Result<String> {
	let slot = table_slot(directory.package_name_list, i)?;
	let at = file.read_file_ptr_at(slot, "package name")?;
	if at >= file.len() {
		return Err(ContainerError::TruncatedRead { at, need: 1, rem: 0 });
	}
	Ok(decode_name(file.cursor_at(at).read_terminated(&NAME_TERMINATORS)))
}

/// Map name bytes to text, replacing anything outside printable ASCII.
pub fn decode_name(raw: &[u8]) -> String {
	raw.iter()
		.map(|byte| {
			if byte.is_ascii_graphic() || *byte == b' ' {
				char::from(*byte)
			} else {
				NAME_PLACEHOLDER
			}
		})
		.collect()
}

/// Pair every package index slot with its name.
///
/// Unresolvable slots leave the address empty or the name as
/// [`PackageName::InvalidPointer`]; the resolver itself never fails.
pub fn resolve_catalog(file: &ContainerFile, directory: &Directory, diag: &mut Diagnostics) -> Catalog {
	let count = usize::from(directory.package_count);
	let mut entries = Vec::with_capacity(count);

	for i in 0..count {
		let index = i + 1;
		let address = match read_address(file, directory, i) {
			Ok(address) => Some(address),
			Err(err) => {
				diag.skip(&err, |reason| Warning::PackageAddressSkipped { index, reason });
				None
			}
		};
		let name = match read_name(file, directory, i) {
			Ok(text) => PackageName::Text(text),
			Err(err) => {
				diag.skip(&err, |reason| Warning::PackageNameSkipped { index, reason });
				PackageName::InvalidPointer
			}
		};
		entries.push(PackageEntry { index, address, name });
	}

	Catalog::new(entries)
}

#[cfg(test)]
mod tests;
