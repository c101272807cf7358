use crate::container::{ContainerFile, Diagnostics, Result};

/// File offset of the stored group-list pointer.
pub const GROUP_LIST_PTR_AT: usize = 0x1A8;
/// Magic expected at the start of the group list.
pub const GROUP_LIST_MAGIC: [u8; 4] = [0x20, 0x94, 0x7A, 0x00];
/// Magic expected at `package list + 0x04`.
pub const PACKAGE_LIST_MAGIC: [u8; 4] = [0xF0, 0x0E, 0x7A, 0x00];

/// Top-level pointer chain of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
	/// File offset of the group list.
	pub group_list: usize,
	/// Whether the group-list magic matched.
	pub group_list_verified: bool,
	/// File offset of the package list.
	pub package_list: usize,
	/// Number of packages in the catalog.
	pub package_count: u8,
	/// Whether the package-list magic matched.
	pub package_list_verified: bool,
	/// Relocated address of the package index table.
	pub package_mesh_list: i64,
	/// Relocated address of the package name-pointer table.
	pub package_name_list: i64,
}

/// Follow the fixed pointer chain from the file header to the package tables.
///
/// Magic mismatches clear the matching `*_verified` flag; short reads and
/// negative addresses are fatal here because nothing downstream can be located.
pub fn walk_directory(file: &ContainerFile, diag: &mut Diagnostics) -> Result<Directory> {
	let group_list = file.read_file_ptr_at(GROUP_LIST_PTR_AT, "group list")?;
	let group_list_verified = diag.verify(file.read_magic_at(group_list, GROUP_LIST_MAGIC, "group list")?)?;

	let package_list = file.read_file_ptr_at(group_list + 0x10, "package list")?;
	let package_count = file.read_u8_at(package_list + 0x02)?;
	let package_list_verified = diag.verify(file.read_magic_at(package_list + 0x04, PACKAGE_LIST_MAGIC, "package list")?)?;

	let package_mesh_list = file.read_ptr_at(package_list + 0x08)?;
	let package_name_list = file.read_ptr_at(package_list + 0x0C)?;

	tracing::debug!(
		group_list = format_args!("0x{group_list:08X}"),
		package_list = format_args!("0x{package_list:08X}"),
		package_count,
		"directory resolved"
	);

	Ok(Directory {
		group_list,
		group_list_verified,
		package_list,
		package_count,
		package_list_verified,
		package_mesh_list,
		package_name_list,
	})
}
